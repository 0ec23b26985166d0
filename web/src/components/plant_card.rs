//! Catalog tile: photo and common name.

use leptos::prelude::*;

use florescer_common::model::Plant;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder-plant.svg";

pub fn image_src(url: Option<&str>) -> String {
    url.filter(|u| !u.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
        .to_string()
}

#[component]
pub fn PlantCard(plant: Plant, #[prop(into)] on_select: Callback<String>) -> impl IntoView {
    let id = plant.id.clone();
    view! {
        <button class="plant-card" on:click=move |_| on_select.run(id.clone())>
            <div class="plant-img-wrap">
                <img
                    src=image_src(plant.image_url.as_deref())
                    alt=plant.name.clone()
                    class="plant-img"
                    loading="lazy"
                />
            </div>
            <h3 class="plant-name">{plant.name}</h3>
        </button>
    }
}
