//! Public plant catalog.

use leptos::prelude::*;

use florescer_common::model::Plant;

use crate::components::plant_gallery::PlantGallery;
use crate::feedback::{error_text, ErrorNotice, Loading};

// ─── Server functions ────────────────────────────────────────────────────────

/// All plants ordered by name.
#[server]
pub async fn list_plants() -> Result<Vec<Plant>, ServerFnError> {
    use crate::server::{session, to_server_error};
    use florescer_common::services::plants;

    let backend = session::backend()?;
    plants::get_all(&backend).await.map_err(to_server_error)
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn CatalogPage() -> impl IntoView {
    let plants = Resource::new(|| (), |_| list_plants());

    view! {
        <div class="catalog-page">
            <h2 class="page-title">"CATÁLOGO"</h2>
            <p class="page-quote">"\"Do clique ao canteiro: cultive o futuro agora.\""</p>

            <Suspense fallback=|| view! { <Loading/> }>
                {move || plants.get().map(|res| match res {
                    Ok(list) => view! { <PlantGallery plants=list adoptable=true/> }.into_any(),
                    Err(e) => view! { <ErrorNotice message=error_text(&e)/> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}
