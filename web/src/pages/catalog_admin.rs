//! Admin catalog: the public listing plus the "new plant" dialog.
//!
//! Nothing is rendered until the role check answers. A negative answer (or
//! a failed check) sends the visitor back to the public catalog, and the
//! check runs again whenever the viewer signs in or out.

use leptos::prelude::*;

use florescer_common::route::Page;

use crate::components::plant_form::PlantFormDialog;
use crate::components::plant_gallery::PlantGallery;
use crate::feedback::{error_text, ErrorNotice, Loading};
use crate::navigation::use_navigation;
use crate::pages::catalog::list_plants;

// ─── Server functions ────────────────────────────────────────────────────────

/// Whether the requesting viewer has the admin role.
#[server]
pub async fn check_admin() -> Result<bool, ServerFnError> {
    use crate::server::{session, to_server_error};
    use florescer_common::services::auth;
    use florescer_common::ServiceError;

    let backend = session::backend()?;
    match auth::require_admin(&backend).await {
        Ok(_) => Ok(true),
        Err(ServiceError::Forbidden) => Ok(false),
        Err(e) => Err(to_server_error(e)),
    }
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn CatalogAdminPage() -> impl IntoView {
    let nav = use_navigation();
    let is_admin = Resource::new(move || nav.auth_version(), |_| check_admin());

    Effect::new(move |_| {
        if matches!(is_admin.get(), Some(Ok(false)) | Some(Err(_))) {
            nav.go(Page::Catalog);
        }
    });

    view! {
        <Suspense fallback=|| view! { <Loading text="Verificando acesso..."/> }>
            {move || is_admin.get().map(|res| match res {
                Ok(true) => view! { <AdminCatalog/> }.into_any(),
                _ => ().into_any(),
            })}
        </Suspense>
    }
}

#[component]
fn AdminCatalog() -> impl IntoView {
    let refresh = RwSignal::new(0u32);
    let plants = Resource::new(move || refresh.get(), |_| list_plants());
    let (creating, set_creating) = signal(false);

    view! {
        <div class="catalog-page admin">
            <div class="page-header">
                <h2 class="page-title">"CATÁLOGO"</h2>
                <button
                    class="btn btn-primary"
                    aria-label="Cadastrar nova planta"
                    on:click=move |_| set_creating.set(true)
                >
                    "+ CADASTRAR PLANTA"
                </button>
            </div>
            <p class="page-quote">"\"Do clique ao canteiro: cultive o futuro agora.\""</p>

            <Suspense fallback=|| view! { <Loading/> }>
                {move || plants.get().map(|res| match res {
                    Ok(list) => view! { <PlantGallery plants=list/> }.into_any(),
                    Err(e) => view! { <ErrorNotice message=error_text(&e)/> }.into_any(),
                })}
            </Suspense>

            <Show when=move || creating.get()>
                <PlantFormDialog
                    on_close=move |_| set_creating.set(false)
                    on_created=move |_| {
                        set_creating.set(false);
                        refresh.update(|n| *n += 1);
                    }
                />
            </Show>
        </div>
    }
}
