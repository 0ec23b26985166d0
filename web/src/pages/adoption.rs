//! Adoption page: `#/adocao?id=<plant>`.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::SubmitEvent;

use florescer_common::form::{AdoptionForm, SubmitState};
use florescer_common::model::Plant;
use florescer_common::route::Page;

use crate::components::plant_card::image_src;
use crate::feedback::{error_text, ErrorNotice, Loading};
use crate::navigation::use_navigation;

// ─── Server functions ────────────────────────────────────────────────────────

#[server]
pub async fn get_plant(id: String) -> Result<Option<Plant>, ServerFnError> {
    use crate::server::{session, to_server_error};
    use florescer_common::services::plants;

    let backend = session::backend()?;
    plants::get_by_id(&backend, &id).await.map_err(to_server_error)
}

/// Record the adoption for the requesting viewer.
#[server]
pub async fn adopt_plant(plant_id: String, form: AdoptionForm) -> Result<(), ServerFnError> {
    use crate::server::{session, to_server_error};
    use florescer_common::services::adoption;

    let backend = session::backend()?;
    adoption::adopt(&backend, &plant_id, &form, chrono::Utc::now())
        .await
        .map_err(to_server_error)
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn AdoptionPage() -> impl IntoView {
    let nav = use_navigation();
    let plant_id = nav
        .route()
        .with_untracked(|r| r.param("id").map(str::to_string));

    let Some(plant_id) = plant_id else {
        return view! {
            <div class="adoption-page">
                <ErrorNotice message="Planta não especificada."/>
                <BackToCatalog/>
            </div>
        }
        .into_any();
    };

    let plant = Resource::new(
        {
            let id = plant_id.clone();
            move || id.clone()
        },
        get_plant,
    );

    view! {
        <div class="adoption-page">
            <Suspense fallback=|| view! { <Loading/> }>
                {move || {
                    let plant_id = plant_id.clone();
                    plant.get().map(|res| match res {
                        Ok(Some(p)) => view! { <AdoptionPanel plant=p plant_id=plant_id/> }.into_any(),
                        Ok(None) => view! {
                            <div class="not-found">
                                <h2>"Planta não encontrada"</h2>
                                <BackToCatalog/>
                            </div>
                        }.into_any(),
                        Err(e) => view! {
                            <ErrorNotice message=error_text(&e)/>
                            <BackToCatalog/>
                        }.into_any(),
                    })
                }}
            </Suspense>
        </div>
    }
    .into_any()
}

#[component]
fn AdoptionPanel(plant: Plant, plant_id: String) -> impl IntoView {
    let nav = use_navigation();
    let location = RwSignal::new(String::new());
    let notes = RwSignal::new(String::new());
    let state = RwSignal::new(SubmitState::default());
    let busy = move || state.with(SubmitState::is_submitting);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if state.with_untracked(SubmitState::is_submitting) {
            return;
        }
        let form = AdoptionForm {
            location: location.get_untracked(),
            notes: notes.get_untracked(),
        };
        if let Err(e) = form.validate() {
            state.update(|s| {
                s.reject(e.to_string());
            });
            return;
        }

        let mut started = false;
        state.update(|s| started = s.begin());
        if !started {
            return;
        }
        let plant_id = plant_id.clone();
        spawn_local(async move {
            let outcome = adopt_plant(plant_id, form).await.map_err(|e| error_text(&e));
            state.update(|s| s.finish(&outcome));
        });
    };

    view! {
        <Show when=move || state.with(SubmitState::is_success)>
            <div class="overlay" role="dialog" aria-modal="true">
                <div class="modal success-modal">
                    <span class="success-icon">"🌱"</span>
                    <h3>"Adoção Confirmada!"</h3>
                    <p>"Parabéns! Você acaba de dar um novo lar para esta plantinha."</p>
                    <div class="modal-actions">
                        <button class="btn btn-primary" on:click=move |_| nav.go(Page::Profile)>
                            "Ver Minhas Plantas"
                        </button>
                        <button class="btn btn-outline" on:click=move |_| nav.go(Page::Catalog)>
                            "Voltar ao Catálogo"
                        </button>
                    </div>
                </div>
            </div>
        </Show>

        <h2 class="page-title">"ADOÇÃO DE PLANTA"</h2>
        <p class="page-quote">"\"Um novo lar para uma nova vida.\""</p>

        <div class="adoption-layout">
            <div class="adoption-plant">
                <img src=image_src(plant.image_url.as_deref()) alt=plant.name.clone()/>
                <h3>{plant.name.clone()}</h3>
                <p class="scientific-name">{plant.scientific_name.clone()}</p>
            </div>

            <form class="adoption-form" on:submit=on_submit>
                <label>
                    "📍 Local do Plantio"
                    <input
                        type="text"
                        required
                        placeholder="Ex: Quintal, Vaso na sala, Jardim comunitário..."
                        bind:value=location
                    />
                </label>
                <label>
                    "📝 Observações (Opcional)"
                    <textarea
                        placeholder="Alguma nota especial sobre este plantio?"
                        bind:value=notes
                    ></textarea>
                </label>

                {move || state.with(|s| s.error().map(|m| view! { <ErrorNotice message=m.to_string()/> }))}

                <div class="form-actions">
                    <button type="button" class="btn btn-outline" on:click=move |_| nav.go(Page::Catalog)>
                        "Cancelar"
                    </button>
                    <button type="submit" class="btn btn-primary" disabled=busy>
                        {move || if busy() { "Adotando..." } else { "🌱 Confirmar Adoção" }}
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
fn BackToCatalog() -> impl IntoView {
    let nav = use_navigation();
    view! {
        <button class="btn btn-primary" on:click=move |_| nav.go(Page::Catalog)>
            "Voltar ao Catálogo"
        </button>
    }
}
