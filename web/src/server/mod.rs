//! Server-side plumbing for the server functions: shared state, the
//! session cookie and error conversion.

pub mod session;

use std::sync::Arc;

use leptos::prelude::*;
use tower_http::services::ServeDir;

use florescer_common::backend::supabase::SupabaseClient;
use florescer_common::config::Config;
use florescer_common::ServiceError;

/// Server-side application state, provided as Leptos context for server functions.
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Anonymous client; scope it with [`session::backend`].
    pub backend: SupabaseClient,
    pub leptos_options: LeptosOptions,
}

pub fn state() -> Result<AppState, ServerFnError> {
    use_context::<AppState>().ok_or_else(|| ServerFnError::new("Missing AppState"))
}

/// Turn a service failure into the message the page shows.
pub fn to_server_error(err: ServiceError) -> ServerFnError {
    match &err {
        ServiceError::Backend { .. } => tracing::error!("{err}"),
        _ => tracing::debug!("Rejected: {err}"),
    }
    ServerFnError::new(err.to_string())
}

/// Static assets (WASM bundle, CSS, images) under the site root.
pub fn static_files(site_root: &str) -> ServeDir {
    ServeDir::new(site_root)
}

// ─── tests ───────────────────────────────────────────────────────────────
