//! Home page: project introduction and the featured plant and planting area.

use leptos::prelude::*;

use florescer_common::services::content::Highlights;

use crate::components::plant_card::image_src;

// ─── Server functions ────────────────────────────────────────────────────────

#[server]
pub async fn get_highlights() -> Result<Highlights, ServerFnError> {
    use crate::server::{self, session, to_server_error};
    use florescer_common::services::content;

    let state = server::state()?;
    let backend = session::backend()?;
    content::highlights(&backend, &state.config.featured_plant, &state.config.featured_area)
        .await
        .map_err(to_server_error)
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn HomePage() -> impl IntoView {
    let highlights = Resource::new(|| (), |_| get_highlights());

    view! {
        <div class="home-page">
            <section class="intro-card">
                <h2>"PROJETO FLORESCER"</h2>
                <p class="lead">
                    <span>"🌱 "</span>
                    <strong>"O Florescer nasce de uma reflexão essencial:"</strong>
                    " como podemos contribuir, de forma real, para transformar o planeta?"
                </p>
                <p>
                    "Nosso propósito é reduzir os impactos ambientais e recuperar áreas degradadas "
                    "por meio do plantio de mudas nativas, respeitando as características de cada "
                    "região do país. Assim, buscamos não apenas combater os efeitos das mudanças "
                    "climáticas, mas também restaurar a presença de áreas verdes nas metrópoles e "
                    "incentivar uma relação mais harmoniosa entre pessoas e natureza."
                </p>
                <p>
                    "Com foco em "
                    <strong>"sustentabilidade e preservação da biodiversidade"</strong>
                    ", o Florescer visa transformar nossas cidades em lugares mais saudáveis, verdes "
                    "e acolhedores, cultivando um ambiente equilibrado para as futuras gerações. 🌿"
                </p>
            </section>

            <Suspense fallback=|| ()>
                {move || highlights.get().map(|res| match res {
                    Ok(h) => view! {
                        <div class="highlights">
                            <section class="highlight">
                                <span class="badge">"BROTINHOS"</span>
                                {h.plant.map(|p| view! {
                                    <div class="highlight-body">
                                        <img class="round" src=image_src(p.image_url.as_deref()) alt=p.name.clone() loading="lazy"/>
                                        <h3>{p.name}</h3>
                                        <p class="scientific-name">{p.scientific_name}</p>
                                    </div>
                                })}
                            </section>
                            <section class="highlight">
                                <span class="badge">"ÁREAS DE PLANTIO"</span>
                                {h.area.map(|a| view! {
                                    <div class="highlight-body">
                                        <img src=image_src(a.image_url.as_deref()) alt=a.name.clone() loading="lazy"/>
                                        <h3>{a.name}</h3>
                                        <p>{a.location}</p>
                                    </div>
                                })}
                            </section>
                        </div>
                    }.into_any(),
                    Err(e) => {
                        leptos::logging::warn!("highlights unavailable: {e}");
                        ().into_any()
                    }
                })}
            </Suspense>
        </div>
    }
}
