//! In-process backend with the same observable behaviour as the hosted one:
//! generated ids and timestamps, the unique constraints of the schema,
//! no-overwrite uploads and token-scoped auth.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use super::{AuthUser, Filter, HostedBackend, Query, Session, SignUp, UserMetadata};
use crate::error::{BackendError, UNIQUE_VIOLATION};
use crate::model::{PLANTINGS_TABLE, USERS_TABLE};

/// Column sets that must be unique per table.
const UNIQUE_KEYS: &[(&str, &[&str])] = &[
    (USERS_TABLE, &["id"]),
    (PLANTINGS_TABLE, &["usuario_id", "planta_id"]),
];

#[derive(Debug, Default)]
struct Account {
    password: String,
    user: Option<AuthUser>,
}

#[derive(Debug, Default)]
struct State {
    tables: HashMap<String, Vec<Value>>,
    objects: HashMap<(String, String), (String, Vec<u8>)>,
    accounts: HashMap<String, Account>,
    sessions: HashMap<String, String>,
    next_id: u64,
    calls: u64,
    fail_inserts: HashMap<String, BackendError>,
}

impl State {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Cloneable handle; clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
    token: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle acting on behalf of the session `token`.
    pub fn with_token(&self, token: &str) -> Self {
        MemoryBackend {
            state: Arc::clone(&self.state),
            token: Some(token.to_string()),
        }
    }

    /// Insert a row directly, bypassing constraints.
    pub fn seed(&self, table: &str, row: Value) {
        self.lock().tables.entry(table.to_string()).or_default().push(row);
    }

    /// All rows of `table`.
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// Names of stored objects in `bucket`.
    pub fn objects(&self, bucket: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .lock()
            .objects
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, n)| n.clone())
            .collect();
        names.sort();
        names
    }

    /// Number of backend operations issued so far.
    pub fn calls(&self) -> u64 {
        self.lock().calls
    }

    /// Make every insert into `table` fail with `error`.
    pub fn fail_inserts_into(&self, table: &str, error: BackendError) {
        self.lock().fail_inserts.insert(table.to_string(), error);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test thread must not wedge the other handles.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn scoped_user(&self, state: &State) -> Option<AuthUser> {
        let token = self.token.as_ref()?;
        let email = state.sessions.get(token)?;
        state.accounts.get(email)?.user.clone()
    }
}

fn text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches(row: &Value, filter: &Filter) -> bool {
    match filter {
        Filter::Eq(col, val) => row.get(col).and_then(text).as_deref() == Some(val.as_str()),
        Filter::In(col, vals) => row
            .get(col)
            .and_then(text)
            .map(|t| vals.contains(&t))
            .unwrap_or(false),
    }
}

fn compare(a: &Value, b: &Value) -> std::cmp::Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        _ => text(a).cmp(&text(b)),
    }
}

#[async_trait]
impl HostedBackend for MemoryBackend {
    async fn select(&self, query: &Query) -> Result<Vec<Value>, BackendError> {
        let mut state = self.lock();
        state.calls += 1;
        let mut rows: Vec<Value> = state
            .tables
            .get(&query.table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| query.filters.iter().all(|f| matches(r, f)))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(order) = &query.order {
            rows.sort_by(|a, b| {
                let ord = compare(&a[&order.column], &b[&order.column]);
                if order.ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(n) = query.limit {
            rows.truncate(n as usize);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, mut row: Value) -> Result<(), BackendError> {
        let mut state = self.lock();
        state.calls += 1;
        if let Some(err) = state.fail_inserts.get(table) {
            return Err(err.clone());
        }

        if let Some((_, cols)) = UNIQUE_KEYS.iter().find(|(t, _)| *t == table) {
            let key: Vec<Option<String>> = cols.iter().map(|c| row.get(*c).and_then(text)).collect();
            let clash = state.tables.get(table).is_some_and(|rows| {
                rows.iter()
                    .any(|r| cols.iter().map(|c| r.get(*c).and_then(text)).collect::<Vec<_>>() == key)
            });
            if clash {
                return Err(BackendError::new(format!(
                    "duplicate key value violates unique constraint on {table}"
                ))
                .with_status(409)
                .with_code(UNIQUE_VIOLATION));
            }
        }

        let id = state.next_id();
        if let Some(obj) = row.as_object_mut() {
            obj.entry("id").or_insert_with(|| json!(id));
            obj.entry("created_at")
                .or_insert_with(|| json!(Utc::now().to_rfc3339()));
        }
        state.tables.entry(table.to_string()).or_default().push(row);
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), BackendError> {
        let mut state = self.lock();
        state.calls += 1;
        let key = (bucket.to_string(), name.to_string());
        if state.objects.contains_key(&key) {
            return Err(BackendError::new("The resource already exists").with_status(409));
        }
        state.objects.insert(key, (content_type.to_string(), bytes));
        Ok(())
    }

    fn public_url(&self, bucket: &str, name: &str) -> String {
        format!("memory://storage/{bucket}/{name}")
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let mut state = self.lock();
        state.calls += 1;
        let user = match state.accounts.get(email) {
            Some(acc) if acc.password == password => acc.user.clone(),
            _ => None,
        };
        let user = user.ok_or_else(|| {
            BackendError::new("Invalid login credentials").with_status(400)
        })?;
        let token = format!("token-{}", state.next_id());
        state.sessions.insert(token.clone(), email.to_string());
        Ok(Session {
            access_token: token,
            refresh_token: None,
            expires_in: 3600,
            user,
        })
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: UserMetadata,
    ) -> Result<SignUp, BackendError> {
        let mut state = self.lock();
        state.calls += 1;
        if state.accounts.contains_key(email) {
            return Err(BackendError::new("User already registered").with_status(422));
        }
        let user = AuthUser {
            id: format!("user-{}", state.next_id()),
            email: Some(email.to_string()),
            user_metadata: metadata,
        };
        state.accounts.insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user: Some(user.clone()),
            },
        );
        let token = format!("token-{}", state.next_id());
        state.sessions.insert(token.clone(), email.to_string());
        Ok(SignUp {
            session: Some(Session {
                access_token: token,
                refresh_token: None,
                expires_in: 3600,
                user: user.clone(),
            }),
            user,
        })
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError> {
        let mut state = self.lock();
        state.calls += 1;
        Ok(self.scoped_user(&state))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let mut state = self.lock();
        state.calls += 1;
        if let Some(token) = &self.token {
            state.sessions.remove(token);
        }
        Ok(())
    }
}

// ─── tests ───────────────────────────────────────────────────────────────
