//! Plant grid with the detail overlay.
//!
//! Clicking a card opens the overlay on that plant. Inside the overlay the
//! arrows (buttons or ArrowLeft/ArrowRight) walk the list circularly, the
//! thumbnail strip jumps directly, Escape or a click on the backdrop closes.

use leptos::ev;
use leptos::prelude::*;

use florescer_common::carousel::{self, OverlayKey, Step};
use florescer_common::model::Plant;
use florescer_common::route::{Page, Route};

use crate::components::plant_card::{image_src, PlantCard};
use crate::navigation::use_navigation;

#[component]
pub fn PlantGallery(
    plants: Vec<Plant>,
    /// Show the "Adotar Planta" button in the overlay.
    #[prop(optional)]
    adoptable: bool,
) -> impl IntoView {
    let plants = StoredValue::new(plants);
    let selected = RwSignal::new(None::<String>);

    let step = move |s: Step| {
        let Some(id) = selected.get_untracked() else {
            return;
        };
        let next = plants.with_value(|ps| carousel::step_from(ps, &id, s).map(|p| p.id.clone()));
        if next.is_some() {
            selected.set(next);
        }
    };

    Effect::new(move |_| {
        let handle = window_event_listener(ev::keydown, move |e| {
            if selected.get_untracked().is_none() {
                return;
            }
            match OverlayKey::from_key(&e.key()) {
                Some(OverlayKey::Close) => selected.set(None),
                Some(OverlayKey::Move(s)) => step(s),
                None => {}
            }
        });
        on_cleanup(move || handle.remove());
    });

    let on_select = Callback::new(move |id: String| selected.set(Some(id)));

    view! {
        <div class="plant-grid">
            {plants
                .get_value()
                .into_iter()
                .map(|plant| view! { <PlantCard plant=plant on_select=on_select/> })
                .collect_view()}
        </div>

        <Show when=move || selected.get().is_some()>
            <div
                class="overlay"
                role="dialog"
                aria-modal="true"
                aria-labelledby="plant-modal-title"
                on:click=move |_| selected.set(None)
            >
                <div class="modal plant-modal" on:click=|e| e.stop_propagation()>
                    <button class="modal-arrow prev" aria-label="Anterior" on:click=move |_| step(Step::Previous)>
                        "‹"
                    </button>
                    <button class="modal-arrow next" aria-label="Próximo" on:click=move |_| step(Step::Next)>
                        "›"
                    </button>
                    <button class="modal-close" aria-label="Fechar" on:click=move |_| selected.set(None)>
                        "Fechar"
                    </button>

                    {move || {
                        let id = selected.get()?;
                        let plant = plants.with_value(|ps| carousel::selected(ps, &id).cloned())?;
                        Some(view! {
                            <PlantDetail plant=plant adoptable=adoptable on_close=move |_| selected.set(None)/>
                        })
                    }}

                    <div class="thumb-strip">
                        {move || {
                            let current = selected.get().unwrap_or_default();
                            plants
                                .get_value()
                                .into_iter()
                                .map(|p| {
                                    let id = p.id.clone();
                                    view! {
                                        <button
                                            class="thumb"
                                            class:active=p.id == current
                                            on:click=move |e| {
                                                e.stop_propagation();
                                                selected.set(Some(id.clone()));
                                            }
                                        >
                                            <img src=image_src(p.image_url.as_deref()) alt=p.name.clone() loading="lazy"/>
                                        </button>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[component]
fn PlantDetail(
    plant: Plant,
    adoptable: bool,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let nav = use_navigation();
    let adopt_route = Route::new(Page::Adoption).with_param("id", plant.id.clone());

    view! {
        <div class="plant-detail">
            <div class="plant-detail-img">
                <img src=image_src(plant.image_url.as_deref()) alt=plant.name.clone() loading="lazy"/>
            </div>
            <div class="plant-detail-body">
                <h3 id="plant-modal-title">{plant.name.clone()}</h3>
                <p class="scientific-name">{plant.scientific_name.clone()}</p>
                {plant.description.clone().map(|d| view! { <p class="description">{d}</p> })}
                <ul class="characteristics">
                    {plant
                        .characteristics
                        .iter()
                        .map(|c| view! { <li><span class="leaf">"🌿"</span>{c.clone()}</li> })
                        .collect_view()}
                </ul>
                {plant.trivia.clone().map(|t| view! { <div class="trivia"><p>{t}</p></div> })}
                <div class="modal-actions">
                    <button class="btn btn-outline" on:click=move |_| on_close.run(())>"Fechar"</button>
                    {adoptable.then(|| view! {
                        <button class="btn btn-primary" on:click=move |_| nav.go(adopt_route.clone())>
                            "Adotar Planta"
                        </button>
                    })}
                </div>
            </div>
        </div>
    }
}
