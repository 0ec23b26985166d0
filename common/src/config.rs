//! Configuration parsing – reads an optional `KEY=VALUE` file and overlays
//! the process environment on top of it.
//!
//! The two hosted-backend credentials are mandatory; every other key has a
//! default. The `VITE_`-prefixed names used by the old frontend build are
//! accepted as fallbacks so an existing `.env` keeps working.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::error::ConfigError;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "FLORESCER_CONFIG";

/// Application configuration for the web server.
#[derive(Debug, Clone)]
pub struct Config {
    // ── hosted backend ───────────────────────────────────────────────
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Storage bucket holding plant images.
    pub storage_bucket: String,
    pub http_timeout: Duration,
    /// Mark the session cookie `Secure`. Turn off only for plain-HTTP development.
    pub secure_cookies: bool,

    // ── content ──────────────────────────────────────────────────────
    /// Plant highlighted on the home page.
    pub featured_plant: String,
    /// Planting area highlighted on the home page.
    pub featured_area: String,
    /// How many publications the profile "tips" tab shows.
    pub profile_tips_limit: u32,
}

impl Config {
    /// Default config path.
    pub fn default_path() -> &'static str {
        "florescer.conf"
    }

    /// Load from the file named by `FLORESCER_CONFIG` (or the default path),
    /// then apply the process environment. A missing file is not an error.
    pub fn from_env() -> Result<Config, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| Self::default_path().into());
        let mut map = read_conf(Path::new(&path))?;
        map.extend(std::env::vars());
        Self::from_map(&map)
    }

    /// Build a config from already-collected key/value pairs.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Config, ConfigError> {
        let get = |key: &str| -> Option<String> {
            map.get(key)
                .or_else(|| map.get(&format!("VITE_{key}")))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_u32 = |key: &str, default: u32| -> u32 {
            get(key).and_then(|v| v.parse().ok()).unwrap_or(default)
        };
        let get_bool = |key: &str, default: bool| -> bool {
            match get(key).map(|v| v.to_ascii_lowercase()).as_deref() {
                Some("1" | "true" | "yes" | "on") => true,
                Some("0" | "false" | "no" | "off") => false,
                _ => default,
            }
        };

        let supabase_url = get("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let supabase_anon_key =
            get("SUPABASE_ANON_KEY").ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;

        Ok(Config {
            supabase_url: supabase_url.trim_end_matches('/').to_string(),
            supabase_anon_key,
            storage_bucket: get("STORAGE_BUCKET").unwrap_or_else(|| "plantas".into()),
            http_timeout: Duration::from_secs(get_u32("HTTP_TIMEOUT_SECS", 30) as u64),
            secure_cookies: get_bool("SECURE_COOKIES", true),
            featured_plant: get("FEATURED_PLANT").unwrap_or_else(|| "Pitanga".into()),
            featured_area: get("FEATURED_AREA").unwrap_or_else(|| "Parque Moscoso".into()),
            profile_tips_limit: get_u32("PROFILE_TIPS_LIMIT", 3),
        })
    }
}

/// Read a config file into a map. Absent files yield an empty map.
fn read_conf(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            info!("Loaded config from {}", path.display());
            Ok(parse_conf(&text))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(source) => Err(ConfigError::Read {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Parse `KEY=VALUE` lines into a map, stripping optional double-quotes.
fn parse_conf(text: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, val)) = line.split_once('=') {
            let key = key.trim();
            let val = val.trim().trim_matches('"');
            map.insert(key.to_string(), val.to_string());
        }
    }
    map
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> HashMap<String, String> {
        parse_conf("SUPABASE_URL=https://abc.supabase.co/\nSUPABASE_ANON_KEY=anon\n")
    }

    #[test]
    fn test_parse_conf() {
        let text = r#"
# comment
SUPABASE_URL="https://abc.supabase.co"
FEATURED_PLANT = Ipê Amarelo
PROFILE_TIPS_LIMIT=5
"#;
        let map = parse_conf(text);
        assert_eq!(map["SUPABASE_URL"], "https://abc.supabase.co");
        assert_eq!(map["FEATURED_PLANT"], "Ipê Amarelo");
        assert_eq!(map["PROFILE_TIPS_LIMIT"], "5");
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_map(&credentials()).unwrap();
        assert_eq!(config.supabase_url, "https://abc.supabase.co");
        assert_eq!(config.storage_bucket, "plantas");
        assert_eq!(config.featured_plant, "Pitanga");
        assert_eq!(config.featured_area, "Parque Moscoso");
        assert_eq!(config.profile_tips_limit, 3);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert!(config.secure_cookies);
    }

    #[test]
    fn test_secure_cookies_switch() {
        let mut map = credentials();
        map.insert("SECURE_COOKIES".into(), "false".into());
        assert!(!Config::from_map(&map).unwrap().secure_cookies);

        map.insert("SECURE_COOKIES".into(), "maybe".into());
        assert!(Config::from_map(&map).unwrap().secure_cookies);
    }

    #[test]
    fn test_missing_credentials_is_fatal() {
        let map = parse_conf("SUPABASE_URL=https://abc.supabase.co\n");
        let err = Config::from_map(&map).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_ANON_KEY")));

        let err = Config::from_map(&HashMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SUPABASE_URL")));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let map = parse_conf("SUPABASE_URL=\nSUPABASE_ANON_KEY=anon\n");
        assert!(Config::from_map(&map).is_err());
    }

    #[test]
    fn test_vite_prefixed_names() {
        let map = parse_conf("VITE_SUPABASE_URL=https://v.supabase.co\nVITE_SUPABASE_ANON_KEY=k\n");
        let config = Config::from_map(&map).unwrap();
        assert_eq!(config.supabase_url, "https://v.supabase.co");
        assert_eq!(config.supabase_anon_key, "k");
    }

    #[test]
    fn test_missing_file_is_empty() {
        let map = read_conf(Path::new("/nonexistent/florescer.conf")).unwrap();
        assert!(map.is_empty());
    }
}
