//! Site header: brand, page menu and the viewer's account links.

use leptos::prelude::*;

use florescer_common::model::Viewer;
use florescer_common::route::Page;

use crate::navigation::use_navigation;

// ─── Server functions ────────────────────────────────────────────────────────

/// The signed-in viewer, or `None` for anonymous visitors.
#[server]
pub async fn get_viewer() -> Result<Option<Viewer>, ServerFnError> {
    use crate::server::{session, to_server_error};
    use florescer_common::services::auth;

    let backend = session::backend()?;
    auth::viewer(&backend).await.map_err(to_server_error)
}

// ─── Component ───────────────────────────────────────────────────────────────

#[component]
pub fn Header() -> impl IntoView {
    let nav = use_navigation();
    let viewer = Resource::new(move || nav.auth_version(), |_| get_viewer());

    view! {
        <header class="site-header">
            <div class="brand">
                <span class="brand-icon">"🌱"</span>
                <h1 class="brand-name">"FLORESCER"</h1>
                <p class="brand-tagline">"Conectando você à essência da natureza"</p>
            </div>
            <nav class="nav-bar">
                <ul class="nav-links">
                    {Page::menu()
                        .into_iter()
                        .map(|(page, label)| {
                            view! {
                                <li>
                                    <button
                                        class="nav-link"
                                        class:active=move || nav.page() == page
                                        on:click=move |_| nav.go(page)
                                    >
                                        {label}
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <div class="nav-account">
                    <Transition fallback=|| ()>
                        {move || viewer.get().map(|res| match res {
                            Ok(Some(v)) => view! {
                                <button class="nav-link viewer" on:click=move |_| nav.go(Page::Profile)>
                                    {v.name}
                                </button>
                            }.into_any(),
                            _ => view! {
                                <button class="nav-link" on:click=move |_| nav.go(Page::Login)>"ENTRAR"</button>
                                <button class="nav-link" on:click=move |_| nav.go(Page::Signup)>"CADASTRAR"</button>
                            }.into_any(),
                        })}
                    </Transition>
                </div>
            </nav>
        </header>
    }
}
