//! Supabase REST client.
//!
//! Talks to the three services of a Supabase project over HTTPS:
//! PostgREST (`/rest/v1`), Storage (`/storage/v1`) and GoTrue (`/auth/v1`).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::{AuthUser, HostedBackend, Query, Session, SignUp, UserMetadata};
use crate::config::Config;
use crate::error::BackendError;
use crate::upload::IMAGE_CACHE_SECONDS;

/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

/// Error body shared (loosely) by PostgREST, Storage and GoTrue.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// GoTrue answers sign-up with a session, or with the bare user when
/// e-mail confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(Session),
    User(AuthUser),
}

impl SupabaseClient {
    pub fn new(config: &Config) -> Result<Self, BackendError> {
        let http = Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| BackendError::new(format!("Cannot create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            access_token: None,
        })
    }

    /// A client acting on behalf of the user owning `token`.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            access_token: Some(token.to_string()),
            ..self.clone()
        }
    }

    fn select_request(&self, query: &Query) -> RequestBuilder {
        self.http
            .get(self.url(&format!("/rest/v1/{}", query.table)))
            .query(&query.params())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach `apikey` and a bearer token (the user's, else the anon key).
    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        req.header("apikey", &self.anon_key).bearer_auth(bearer)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, BackendError> {
        let resp = self
            .authorize(req)
            .send()
            .await
            .map_err(|e| BackendError::new(format!("request failed: {e}")))?;
        if resp.status().is_success() {
            return Ok(resp);
        }
        Err(error_from(resp).await)
    }
}

async fn error_from(resp: Response) -> BackendError {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    error_from_body(status, &text)
}

/// Map a failed response to a [`BackendError`], keeping the status and
/// the PostgREST/GoTrue error code when the body carries one.
fn error_from_body(status: StatusCode, text: &str) -> BackendError {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();

    let message = body
        .message
        .or(body.msg)
        .or(body.error_description)
        .or(body.error)
        .unwrap_or_else(|| {
            if text.trim().is_empty() {
                status.to_string()
            } else {
                text.to_string()
            }
        });
    let mut err = BackendError::new(message).with_status(status.as_u16());
    match body.code {
        Some(Value::String(code)) => err = err.with_code(code),
        Some(Value::Number(code)) => err = err.with_code(code.to_string()),
        _ => {}
    }
    err
}

async fn json_body<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, BackendError> {
    resp.json()
        .await
        .map_err(|e| BackendError::new(format!("invalid response: {e}")))
}

#[async_trait]
impl HostedBackend for SupabaseClient {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, BackendError> {
        debug!("select {} {:?}", query.table, query.params());
        let resp = self.send(self.select_request(query)).await?;
        json_body(resp).await
    }

    async fn insert(&self, table: &str, row: Value) -> Result<(), BackendError> {
        let req = self
            .http
            .post(self.url(&format!("/rest/v1/{table}")))
            .header("Prefer", "return=minimal")
            .json(&row);
        self.send(req).await?;
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), BackendError> {
        let req = self
            .http
            .post(self.url(&format!("/storage/v1/object/{bucket}/{name}")))
            .header("Content-Type", content_type)
            .header("Cache-Control", format!("max-age={IMAGE_CACHE_SECONDS}"))
            .header("x-upsert", "false")
            .body(bytes);
        self.send(req).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        self.url(&format!("/storage/v1/object/public/{bucket}/{name}"))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let req = self
            .http
            .post(self.url("/auth/v1/token?grant_type=password"))
            .json(&json!({ "email": email, "password": password }));
        let resp = self.send(req).await?;
        json_body(resp).await
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> Result<SignUp, BackendError> {
        let req = self
            .http
            .post(self.url("/auth/v1/signup"))
            .json(&json!({ "email": email, "password": password, "data": metadata }));
        let resp = self.send(req).await?;
        Ok(match json_body::<SignUpBody>(resp).await? {
            SignUpBody::Session(session) => SignUp {
                user: session.user.clone(),
                session: Some(session),
            },
            SignUpBody::User(user) => SignUp {
                user,
                session: None,
            },
        })
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError> {
        if self.access_token.is_none() {
            return Ok(None);
        }
        match self.send(self.http.get(self.url("/auth/v1/user"))).await {
            Ok(resp) => Ok(Some(json_body(resp).await?)),
            // Expired or revoked token: treat as signed out.
            Err(e) if matches!(e.status, Some(401) | Some(403)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        if self.access_token.is_none() {
            return Ok(());
        }
        self.send(self.http.post(self.url("/auth/v1/logout"))).await?;
        Ok(())
    }
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn client() -> SupabaseClient {
        let map: HashMap<String, String> = [
            ("SUPABASE_URL", "https://abc.supabase.co/"),
            ("SUPABASE_ANON_KEY", "anon"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        SupabaseClient::new(&Config::from_map(&map).unwrap()).unwrap()
    }

    #[test]
    fn test_public_url() {
        assert_eq!(
            client().public_url("plantas", "17.png"),
            "https://abc.supabase.co/storage/v1/object/public/plantas/17.png"
        );
    }

    #[test]
    fn test_sign_up_body_variants() {
        let with_session: SignUpBody = serde_json::from_value(json!({
            "access_token": "t",
            "expires_in": 60,
            "user": { "id": "u" }
        }))
        .unwrap();
        assert!(matches!(with_session, SignUpBody::Session(_)));

        let pending: SignUpBody = serde_json::from_value(json!({
            "id": "u",
            "email": "ana@example.com",
            "user_metadata": { "nome": "Ana" }
        }))
        .unwrap();
        assert!(matches!(pending, SignUpBody::User(_)));
    }

    #[test]
    fn test_select_request_encodes_filters() {
        let query = Query::from("areas_plantio")
            .eq("nome", "Parque Moscoso")
            .is_in("id", vec!["1".into(), "a,b".into()])
            .order("nome", true);
        let req = client().select_request(&query).build().unwrap();
        let url = req.url();
        assert_eq!(url.path(), "/rest/v1/areas_plantio");

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, query.params());
        assert!(url.query().unwrap().contains("nome=eq.Parque+Moscoso"));
        assert!(url.query().unwrap().contains("id=in.%28%221%22%2C%22a%2Cb%22%29"));
    }

    #[test]
    fn test_unique_violation_body() {
        let err = error_from_body(
            StatusCode::CONFLICT,
            r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value violates unique constraint \"plantios_usuario_id_planta_id_key\""}"#,
        );
        assert_eq!(err.status, Some(409));
        assert_eq!(err.code.as_deref(), Some("23505"));
        assert!(err.message.starts_with("duplicate key value"));
        assert!(err.is_unique_violation());
    }

    #[test]
    fn test_auth_error_description() {
        let err = error_from_body(
            StatusCode::BAD_REQUEST,
            r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#,
        );
        assert_eq!(err.status, Some(400));
        assert_eq!(err.message, "Invalid login credentials");
        assert_eq!(err.code, None);
    }

    #[test]
    fn test_numeric_code() {
        let err = error_from_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"code":422,"msg":"Password should be at least 6 characters"}"#,
        );
        assert_eq!(err.code.as_deref(), Some("422"));
        assert_eq!(err.message, "Password should be at least 6 characters");
    }

    #[test]
    fn test_empty_and_plain_bodies() {
        let err = error_from_body(StatusCode::BAD_GATEWAY, "");
        assert_eq!(err.message, StatusCode::BAD_GATEWAY.to_string());
        assert_eq!(err.status, Some(502));
        assert_eq!(err.code, None);

        let err = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, "upstream timeout");
        assert_eq!(err.message, "upstream timeout");
    }

    #[tokio::test]
    async fn test_anonymous_client_has_no_user() {
        assert!(client().current_user().await.unwrap().is_none());
    }
}
