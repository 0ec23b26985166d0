//! The hosted backend boundary: tables, object storage and auth.
//!
//! Everything the site persists lives in the hosted service. This module
//! describes the handful of operations the site issues against it;
//! [`supabase::SupabaseClient`] speaks the real REST API and
//! `memory::MemoryBackend` is an in-process stand-in for tests (compiled
//! under `cfg(test)` or the `memory` feature).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;
use crate::model::{Role, Viewer, DEFAULT_USER_NAME};

#[cfg(any(test, feature = "memory"))]
pub mod memory;
#[cfg(feature = "supabase")]
pub mod supabase;

// ─── Queries ─────────────────────────────────────────────────────────────────

/// Row filter. Values are compared as text, the way PostgREST receives them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq(String, String),
    In(String, Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

/// A `select` against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub table: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<u32>,
}

impl Query {
    pub fn from(table: &str) -> Self {
        Query {
            table: table.to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq(column.to_string(), value.into()));
        self
    }

    pub fn is_in(mut self, column: &str, values: Vec<String>) -> Self {
        self.filters.push(Filter::In(column.to_string(), values));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// PostgREST query parameters, unencoded. The HTTP client encodes them.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        for f in &self.filters {
            match f {
                Filter::Eq(col, val) => params.push((col.clone(), format!("eq.{val}"))),
                Filter::In(col, vals) => {
                    let list: Vec<String> = vals
                        .iter()
                        .map(|v| format!("\"{}\"", v.replace('"', "\\\"")))
                        .collect();
                    params.push((col.clone(), format!("in.({})", list.join(","))));
                }
            }
        }
        if let Some(o) = &self.order {
            let dir = if o.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{dir}", o.column)));
        }
        if let Some(n) = self.limit {
            params.push(("limit".to_string(), n.to_string()));
        }
        params
    }
}

// ─── Auth ────────────────────────────────────────────────────────────────────

/// `user_metadata` written at signup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(rename = "nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "tipo_usuario", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A user as the auth provider reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl AuthUser {
    pub fn role(&self) -> Role {
        Role::from_metadata(self.user_metadata.role.as_deref())
    }

    pub fn display_name(&self) -> String {
        self.user_metadata
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string())
    }

    pub fn viewer(&self) -> Viewer {
        Viewer {
            id: self.id.clone(),
            name: self.display_name(),
            email: self.email.clone(),
            role: self.role(),
        }
    }
}

/// Tokens issued by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
    pub user: AuthUser,
}

fn default_expires_in() -> u64 {
    3600
}

/// Result of a sign-up. `session` is `None` when the provider requires
/// e-mail confirmation before the first login.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUp {
    pub user: AuthUser,
    pub session: Option<Session>,
}

// ─── Backend trait ───────────────────────────────────────────────────────────

/// Operations issued against the hosted backend.
///
/// Implementations are scoped to at most one signed-in user: row access and
/// [`HostedBackend::current_user`] use that user's token.
#[async_trait]
pub trait HostedBackend: Send + Sync {
    /// Rows of `query.table` matching the query, as raw JSON.
    async fn select(&self, query: &Query) -> Result<Vec<serde_json::Value>, BackendError>;

    /// Insert one row.
    async fn insert(&self, table: &str, row: serde_json::Value) -> Result<(), BackendError>;

    /// Store an object in `bucket` under `name`. Never overwrites.
    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), BackendError>;

    /// Public address of a stored object.
    fn public_url(&self, bucket: &str, name: &str) -> String;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> Result<SignUp, BackendError>;

    /// The user the backend is scoped to, if any.
    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError>;

    /// Invalidate the scoped user's session.
    async fn sign_out(&self) -> Result<(), BackendError>;
}

/// Typed `select`.
pub async fn fetch<T, B>(backend: &B, query: &Query) -> Result<Vec<T>, BackendError>
where
    T: DeserializeOwned,
    B: HostedBackend + ?Sized,
{
    let rows = backend.select(query).await?;
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| {
                BackendError::new(format!("unexpected row in {}: {e}", query.table))
            })
        })
        .collect()
}

/// Typed `select` expecting zero or one row.
pub async fn fetch_optional<T, B>(backend: &B, query: Query) -> Result<Option<T>, BackendError>
where
    T: DeserializeOwned,
    B: HostedBackend + ?Sized,
{
    let query = query.limit(1);
    Ok(fetch(backend, &query).await?.into_iter().next())
}

/// Typed `insert`.
pub async fn insert<T, B>(backend: &B, table: &str, row: &T) -> Result<(), BackendError>
where
    T: Serialize + Sync,
    B: HostedBackend + ?Sized,
{
    let value = serde_json::to_value(row)
        .map_err(|e| BackendError::new(format!("cannot encode row for {table}: {e}")))?;
    backend.insert(table, value).await
}

// ─── tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_params_order_and_filters() {
        let q = Query::from("plantas").eq("nome", "Pitanga").order("nome", true).limit(1);
        assert_eq!(
            q.params(),
            pairs(&[("select", "*"), ("nome", "eq.Pitanga"), ("order", "nome.asc"), ("limit", "1")])
        );
    }

    #[test]
    fn test_params_keep_values_raw() {
        let q = Query::from("areas_plantio").eq("nome", "Parque Moscoso");
        assert_eq!(q.params(), pairs(&[("select", "*"), ("nome", "eq.Parque Moscoso")]));
    }

    #[test]
    fn test_params_in_list_quotes_values() {
        let q = Query::from("plantas").is_in("id", vec!["1".into(), "a,b".into(), "x\"y".into()]);
        assert_eq!(
            q.params(),
            pairs(&[("select", "*"), ("id", r#"in.("1","a,b","x\"y")"#)])
        );
    }

    #[test]
    fn test_auth_user_viewer() {
        let user: AuthUser = serde_json::from_value(serde_json::json!({
            "id": "u1",
            "email": "ana@example.com",
            "user_metadata": { "nome": "Ana", "tipo_usuario": "admin" }
        }))
        .unwrap();
        let viewer = user.viewer();
        assert!(viewer.is_admin());
        assert_eq!(viewer.name, "Ana");
    }

    #[test]
    fn test_auth_user_defaults() {
        let user: AuthUser = serde_json::from_value(serde_json::json!({ "id": "u2" })).unwrap();
        assert_eq!(user.role(), Role::User);
        assert_eq!(user.display_name(), "Usuário");
    }
}
