//! Server entry-point – Axum + Leptos SSR.
#![recursion_limit = "256"]

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use std::sync::Arc;

    use anyhow::Context;
    use axum::{extract::DefaultBodyLimit, Router};
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use tower_http::trace::TraceLayer;

    use florescer_common::backend::supabase::SupabaseClient;
    use florescer_common::config::Config;
    use florescer_web::app::{shell, App};
    use florescer_web::server::{static_files, AppState};

    // Plant images are capped at 5 MB; leave room for the other form fields.
    const BODY_LIMIT: usize = 8 * 1024 * 1024;

    // ── Tracing ──────────────────────────────────────────────────────────
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "florescer_web=info,florescer_common=info,tower_http=info".into()
            }),
        )
        .init();

    // ── Configuration ────────────────────────────────────────────────────
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("Cannot load configuration: {e}");
            std::process::exit(1);
        }
    };
    let backend = SupabaseClient::new(&config).context("building Supabase client")?;
    tracing::info!("Backend at {}", config.supabase_url);

    let conf = get_configuration(None).context("reading Leptos options")?;
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let site_root = leptos_options.site_root.clone();

    let state = AppState {
        config: Arc::new(config),
        backend,
        leptos_options: leptos_options.clone(),
    };

    // ── Routes ───────────────────────────────────────────────────────────
    let routes = generate_route_list(App);

    let app = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            {
                let state = state.clone();
                move || provide_context(state.clone())
            },
            {
                let options = leptos_options.clone();
                move || shell(options.clone())
            },
        )
        .fallback_service(static_files(&site_root))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(leptos_options);

    tracing::info!("Florescer listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("serving")?;
    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    // This binary is only built with the `ssr` feature.
    // The WASM entry point is `lib::hydrate()`.
}
