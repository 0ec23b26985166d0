//! Hash addressing for the single-page site.
//!
//! The fragment has the shape `#/<page>?<key>=<value>&...`. Only the page
//! identifier selects what is rendered; the query part carries parameters
//! such as the plant being adopted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every screen the site can show. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Page {
    #[default]
    Home,
    Catalog,
    CatalogAdmin,
    Profile,
    Publications,
    Contact,
    Login,
    Signup,
    Adoption,
    AdoptionSuccess,
}

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Home,
        Page::Catalog,
        Page::CatalogAdmin,
        Page::Profile,
        Page::Publications,
        Page::Contact,
        Page::Login,
        Page::Signup,
        Page::Adoption,
        Page::AdoptionSuccess,
    ];

    /// Identifier used in the URL fragment.
    pub fn slug(&self) -> &'static str {
        match self {
            Page::Home => "inicio",
            Page::Catalog => "catalogo",
            Page::CatalogAdmin => "catalogoAdmin",
            Page::Profile => "perfil",
            Page::Publications => "publicacoes",
            Page::Contact => "contato",
            Page::Login => "login",
            Page::Signup => "cadastro",
            Page::Adoption => "adocao",
            Page::AdoptionSuccess => "adocaoSucesso",
        }
    }

    /// Entries shown in the site header, in order.
    pub fn menu() -> [(Page, &'static str); 5] {
        [
            (Page::Home, "INÍCIO"),
            (Page::Profile, "PERFIL"),
            (Page::Publications, "PUBLICAÇÕES"),
            (Page::Catalog, "CATÁLOGO"),
            (Page::Contact, "CONTATO"),
        ]
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.slug() == s)
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

// ─── Route ───────────────────────────────────────────────────────────────────

/// A page plus the query parameters that followed it in the fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Route {
    pub page: Page,
    pub query: Vec<(String, String)>,
}

impl Route {
    pub fn new(page: Page) -> Self {
        Route {
            page,
            query: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// First value of `key` in the query part.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Fragment text including the leading `#`.
    pub fn to_fragment(&self) -> String {
        let mut out = format!("#/{}", self.page.slug());
        for (i, (k, v)) in self.query.iter().enumerate() {
            out.push(if i == 0 { '?' } else { '&' });
            out.push_str(&encode_component(k));
            out.push('=');
            out.push_str(&encode_component(v));
        }
        out
    }
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        Route::new(page)
    }
}

/// Parse `location.hash`. Anything unrecognised resolves to the home page.
pub fn parse_fragment(hash: &str) -> Route {
    let raw = hash.strip_prefix('#').unwrap_or(hash);
    let raw = raw.strip_prefix('/').unwrap_or(raw);
    let (slug, query) = match raw.split_once('?') {
        Some((slug, query)) => (slug, query),
        None => (raw, ""),
    };

    Route {
        page: slug.parse().unwrap_or_default(),
        query: parse_query(query),
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(k), decode_component(v))
        })
        .collect()
}

// ─── Navigator ───────────────────────────────────────────────────────────────

/// Navigation state: one active route, kept in step with the fragment.
///
/// The browser side owns the actual `location.hash`; this type only decides
/// what the active route becomes and whether the fragment must be rewritten.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: Route,
}

impl Navigator {
    /// Initial state from the fragment present at load time.
    pub fn from_fragment(hash: &str) -> Self {
        Navigator {
            current: parse_fragment(hash),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn page(&self) -> Page {
        self.current.page
    }

    /// Re-sync after an external `hashchange`.
    pub fn sync(&mut self, hash: &str) {
        self.current = parse_fragment(hash);
    }

    /// Switch to `route`. Returns the fragment to write when the current one
    /// does not already reflect the new route. A bare page that is already
    /// shown keeps the fragment's query parameters.
    pub fn navigate(&mut self, route: Route, current_hash: &str) -> Option<String> {
        let shown = parse_fragment(current_hash);
        let write = if route.query.is_empty() {
            shown.page != route.page
        } else {
            shown != route
        };
        if write {
            let fragment = route.to_fragment();
            self.current = route;
            Some(fragment)
        } else {
            self.current = shown;
            None
        }
    }
}

// ─── Percent-encoding ────────────────────────────────────────────────────────

fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3])
                    .ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(v) => {
                        out.push(v);
                        i += 3;
                    }
                    None => {
                        out.push(b'%');
                        i += 1;
                    }
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_round_trip_for_every_page() {
        for page in Page::ALL {
            assert_eq!(page.slug().parse::<Page>(), Ok(page));
        }
    }

    #[test]
    fn test_unknown_fragment_is_home() {
        assert_eq!(parse_fragment("#/jardim").page, Page::Home);
        assert_eq!(parse_fragment("").page, Page::Home);
        assert_eq!(parse_fragment("#/").page, Page::Home);
        assert_eq!(parse_fragment("#/CATALOGO").page, Page::Home);
    }

    #[test]
    fn test_fragment_forms() {
        assert_eq!(parse_fragment("#/catalogo").page, Page::Catalog);
        assert_eq!(parse_fragment("#catalogo").page, Page::Catalog);
        assert_eq!(parse_fragment("catalogoAdmin").page, Page::CatalogAdmin);
    }

    #[test]
    fn test_adoption_query() {
        let route = parse_fragment("#/adocao?id=42");
        assert_eq!(route.page, Page::Adoption);
        assert_eq!(route.param("id"), Some("42"));
        assert_eq!(route.param("x"), None);
    }

    #[test]
    fn test_query_decoding() {
        let route = parse_fragment("#/publicacoes?q=ip%C3%AA+amarelo&flag");
        assert_eq!(route.param("q"), Some("ipê amarelo"));
        assert_eq!(route.param("flag"), Some(""));
    }

    #[test]
    fn test_truncated_escape_is_kept() {
        let route = parse_fragment("#/adocao?id=4%2");
        assert_eq!(route.param("id"), Some("4%2"));
    }

    #[test]
    fn test_to_fragment() {
        let route = Route::new(Page::Adoption).with_param("id", "a b");
        assert_eq!(route.to_fragment(), "#/adocao?id=a%20b");
        assert_eq!(parse_fragment(&route.to_fragment()), route);
    }

    #[test]
    fn test_navigate_writes_only_when_needed() {
        let mut nav = Navigator::from_fragment("#/inicio");
        assert_eq!(
            nav.navigate(Page::Catalog.into(), "#/inicio"),
            Some("#/catalogo".to_string())
        );
        assert_eq!(nav.page(), Page::Catalog);

        // Already reflected, query parameters in the fragment are preserved.
        assert_eq!(nav.navigate(Page::Adoption.into(), "#/adocao?id=3"), None);
        assert_eq!(nav.page(), Page::Adoption);
        assert_eq!(nav.current().param("id"), Some("3"));
    }

    #[test]
    fn test_navigate_distinguishes_prefix_slugs() {
        let mut nav = Navigator::from_fragment("#/catalogoAdmin");
        assert_eq!(
            nav.navigate(Page::Catalog.into(), "#/catalogoAdmin"),
            Some("#/catalogo".to_string())
        );
    }

    #[test]
    fn test_navigate_with_params_always_matches_query() {
        let mut nav = Navigator::default();
        let target = Route::new(Page::Adoption).with_param("id", "42");
        assert_eq!(
            nav.navigate(target.clone(), "#/adocao?id=7"),
            Some("#/adocao?id=42".to_string())
        );
        assert_eq!(nav.navigate(target, "#/adocao?id=42"), None);
    }

    #[test]
    fn test_sync_follows_external_change() {
        let mut nav = Navigator::from_fragment("#/perfil");
        nav.sync("#/nada");
        assert_eq!(nav.page(), Page::Home);
        nav.sync("#/login");
        assert_eq!(nav.current(), &Route::new(Page::Login));
    }
}
