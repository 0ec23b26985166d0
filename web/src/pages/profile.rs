//! Profile page: the viewer's plantings, their growth, planting areas and tips.

use leptos::prelude::*;
use leptos::task::spawn_local;

use florescer_common::route::Page;
use florescer_common::services::profile::{GrowthEntry, Profile};

use crate::components::plant_card::image_src;
use crate::feedback::{error_text, ErrorNotice, Loading};
use crate::navigation::use_navigation;

// ─── Server functions ────────────────────────────────────────────────────────

#[server]
pub async fn get_profile() -> Result<Option<Profile>, ServerFnError> {
    use crate::server::{self, session, to_server_error};
    use florescer_common::services::profile;

    let state = server::state()?;
    let backend = session::backend()?;
    profile::load(&backend, state.config.profile_tips_limit, chrono::Utc::now())
        .await
        .map_err(to_server_error)
}

/// End the session. The cookie is cleared even when the backend call fails.
#[server]
pub async fn sign_out() -> Result<(), ServerFnError> {
    use crate::server::{session, to_server_error};
    use florescer_common::services::auth;

    let backend = session::backend()?;
    let outcome = auth::sign_out(&backend).await;
    session::forget()?;
    outcome.map_err(to_server_error)
}

// ─── Page component ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Planting,
    Growth,
    Map,
    Tips,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Planting, Tab::Growth, Tab::Map, Tab::Tips];

    fn label(self) -> &'static str {
        match self {
            Tab::Planting => "ESTOU PLANTANDO/JÁ PLANTEI",
            Tab::Growth => "ACOMPANHAR CRESCIMENTO",
            Tab::Map => "MAPA DE PLANTIO",
            Tab::Tips => "DICAS",
        }
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let nav = use_navigation();
    let profile = Resource::new(move || nav.auth_version(), |_| get_profile());
    let tab = RwSignal::new(Tab::Planting);

    let on_sign_out = move |_: leptos::ev::MouseEvent| {
        spawn_local(async move {
            if let Err(e) = sign_out().await {
                leptos::logging::warn!("sign out: {}", error_text(&e));
            }
            nav.auth_changed();
            nav.go(Page::Home);
        });
    };

    view! {
        <div class="profile-page">
            <Suspense fallback=|| view! { <Loading/> }>
                {move || profile.get().map(|res| match res {
                    Ok(Some(p)) => {
                        let name = p.viewer.name.clone();
                        view! {
                            <div class="page-header">
                                <h2 class="page-title">"PERFIL"</h2>
                                <span class="viewer-name">{name}</span>
                                <button class="btn btn-primary" on:click=on_sign_out>"SAIR"</button>
                            </div>
                            <div class="tabs">
                                {Tab::ALL
                                    .into_iter()
                                    .map(|t| view! {
                                        <button
                                            class="tab"
                                            class:active=move || tab.get() == t
                                            on:click=move |_| tab.set(t)
                                        >
                                            {t.label()}
                                        </button>
                                    })
                                    .collect_view()}
                            </div>
                            <ProfileTab profile=p tab=tab/>
                        }.into_any()
                    }
                    Ok(None) => view! {
                        <div class="login-prompt">
                            <h2 class="page-title">"PERFIL"</h2>
                            <p>"Entre na sua conta para acompanhar suas plantas."</p>
                            <button class="btn btn-primary" on:click=move |_| nav.go(Page::Login)>"ENTRAR"</button>
                        </div>
                    }.into_any(),
                    Err(e) => view! { <ErrorNotice message=error_text(&e)/> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn ProfileTab(profile: Profile, tab: RwSignal<Tab>) -> impl IntoView {
    let profile = StoredValue::new(profile);
    let nav = use_navigation();

    move || match tab.get() {
        Tab::Planting => profile.with_value(|p| {
            if p.plantings.is_empty() {
                return view! {
                    <div class="empty">
                        <p>"Você ainda não adotou nenhuma planta."</p>
                        <button class="btn btn-primary" on:click=move |_| nav.go(Page::Catalog)>
                            "Ver Catálogo"
                        </button>
                    </div>
                }
                .into_any();
            }
            view! {
                <div class="planting-grid">
                    {p.plantings.iter().cloned().map(|e| view! { <PlantingCard entry=e/> }).collect_view()}
                </div>
            }
            .into_any()
        }),
        Tab::Growth => profile.with_value(|p| {
            view! {
                <ul class="growth-list">
                    {p.plantings.iter().map(|e| {
                        let name = e.planting.plant.as_ref().map(|pl| pl.name.clone()).unwrap_or_default();
                        let days = e.growth.days;
                        let width = format!("{}%", e.growth.bar_percent);
                        view! {
                            <li class="growth-row">
                                <span class="growth-name">{name}</span>
                                <div class="growth-bar"><div class="growth-fill" style:width=width></div></div>
                                <span class="growth-days">{days} " dias"</span>
                            </li>
                        }
                    }).collect_view()}
                </ul>
            }
            .into_any()
        }),
        Tab::Map => profile.with_value(|p| {
            view! {
                <div class="area-grid">
                    {p.areas.iter().map(|a| view! {
                        <div class="area-card">
                            <img src=image_src(a.image_url.as_deref()) alt=a.name.clone() loading="lazy"/>
                            <h3>{a.name.clone()}</h3>
                            <p>"📍 " {a.location.clone()}</p>
                            {a.description.clone().map(|d| view! { <p class="description">{d}</p> })}
                        </div>
                    }).collect_view()}
                </div>
            }
            .into_any()
        }),
        Tab::Tips => profile.with_value(|p| {
            view! {
                <div class="tips">
                    {p.tips.iter().map(|t| view! {
                        <button class="tip" on:click=move |_| nav.go(Page::Publications)>
                            <h4>"🌱 " {t.title.clone()}</h4>
                            <p>{t.views} " visualizações"</p>
                        </button>
                    }).collect_view()}
                </div>
            }
            .into_any()
        }),
    }
}

#[component]
fn PlantingCard(entry: GrowthEntry) -> impl IntoView {
    let planting = entry.planting.planting;
    let plant = entry.planting.plant;
    let planted_on = planting.planted_at.format("%d/%m/%Y").to_string();

    view! {
        <div class="planting-card">
            {plant.map(|p| view! {
                <img src=image_src(p.image_url.as_deref()) alt=p.name.clone() loading="lazy"/>
                <h3>{p.name}</h3>
                <p class="scientific-name">{p.scientific_name}</p>
            })}
            <p>"Plantada em " {planted_on}</p>
            {planting.location.map(|l| view! { <p>"📍 " {l}</p> })}
            <span class="status">{planting.status}</span>
            {planting.notes.map(|n| view! { <p class="notes">{n}</p> })}
        </div>
    }
}
