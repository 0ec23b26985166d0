//! The viewer's access token, kept in an HTTP-only cookie.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use cookie::time::Duration;
use cookie::{Cookie, SameSite};
use leptos::prelude::*;
use leptos_axum::ResponseOptions;

use florescer_common::backend::supabase::SupabaseClient;
use florescer_common::backend::Session;

pub const SESSION_COOKIE: &str = "florescer_token";

/// Value of the session cookie in a `Cookie` header, if present and non-empty.
pub fn token_from_cookie_header(header: &str) -> Option<String> {
    Cookie::split_parse(header)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.value_trimmed().to_string())
        .filter(|value| !value.is_empty())
}

fn build(value: String, max_age: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(max_age)
        .build()
}

pub fn session_cookie(token: &str, max_age_secs: u64, secure: bool) -> Cookie<'static> {
    let max_age = Duration::seconds(i64::try_from(max_age_secs).unwrap_or(i64::MAX));
    build(token.to_string(), max_age, secure)
}

pub fn expired_cookie(secure: bool) -> Cookie<'static> {
    build(String::new(), Duration::ZERO, secure)
}

/// Token sent with the current request.
pub fn request_token() -> Option<String> {
    let parts = use_context::<Parts>()?;
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(token_from_cookie_header)
}

/// Backend client scoped to the requesting viewer (anonymous without a cookie).
pub fn backend() -> Result<SupabaseClient, ServerFnError> {
    let state = super::state()?;
    Ok(match request_token() {
        Some(token) => state.backend.with_token(&token),
        None => state.backend,
    })
}

/// Set the cookie for a fresh session.
pub fn remember(session: &Session) -> Result<(), ServerFnError> {
    let secure = super::state()?.config.secure_cookies;
    set_cookie(session_cookie(&session.access_token, session.expires_in, secure))
}

pub fn forget() -> Result<(), ServerFnError> {
    let secure = super::state()?.config.secure_cookies;
    set_cookie(expired_cookie(secure))
}

fn set_cookie(cookie: Cookie<'_>) -> Result<(), ServerFnError> {
    let response = use_context::<ResponseOptions>()
        .ok_or_else(|| ServerFnError::new("Missing ResponseOptions"))?;
    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    response.append_header(SET_COOKIE, value);
    Ok(())
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_among_other_cookies() {
        let header = "theme=dark; florescer_token=abc.def; lang=pt";
        assert_eq!(token_from_cookie_header(header).as_deref(), Some("abc.def"));
    }

    #[test]
    fn test_missing_or_cleared_token() {
        assert_eq!(token_from_cookie_header("theme=dark"), None);
        assert_eq!(token_from_cookie_header("florescer_token="), None);
        assert_eq!(token_from_cookie_header(""), None);
    }

    #[test]
    fn test_quoted_token() {
        let header = "florescer_token=\"abc\"";
        assert_eq!(token_from_cookie_header(header).as_deref(), Some("abc"));
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok", 3600, true);
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(3600)));

        let header = cookie.to_string();
        assert!(header.contains("Secure"));
        assert!(header.contains("HttpOnly"));
    }

    #[test]
    fn test_insecure_cookie_for_plain_http() {
        let cookie = session_cookie("tok", 60, false);
        assert!(!cookie.to_string().contains("Secure"));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_cookie(true);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
        assert_eq!(cookie.secure(), Some(true));
    }
}
