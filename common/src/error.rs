//! Error taxonomy shared by the services and the web server.

use thiserror::Error;

/// PostgreSQL `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Startup configuration problems. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),

    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A failed call to the hosted backend (database, storage or auth).
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{message}")]
pub struct BackendError {
    /// HTTP status, when the failure came back as a response.
    pub status: Option<u16>,
    /// PostgREST / Postgres error code (`23505`, `PGRST116`, ...).
    pub code: Option<String>,
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// True when the backend rejected a write because of a unique constraint.
    pub fn is_unique_violation(&self) -> bool {
        self.code.as_deref() == Some(UNIQUE_VIOLATION)
            || self.status == Some(409)
            || self.message.contains("Conflict")
    }
}

/// Failures surfaced to a view. The `Display` text is what the user reads.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ServiceError {
    /// Input rejected before any network call.
    #[error("{0}")]
    Validation(String),

    #[error("Você precisa estar logado para adotar uma planta.")]
    Unauthenticated,

    #[error("Acesso restrito a administradores.")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("Você já adotou esta planta!")]
    DuplicateAdoption,

    /// Backend failure with the operation-specific prefix already applied.
    #[error("{context}: {source}")]
    Backend {
        context: &'static str,
        #[source]
        source: BackendError,
    },
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn backend(context: &'static str, source: BackendError) -> Self {
        ServiceError::Backend { context, source }
    }
}

// ─── tests ───────────────────────────────────────────────────────────────
