//! Publications: most-read list with title search and a reading pane.

use leptos::prelude::*;

use florescer_common::model::{filter_by_title, Publication};

use crate::feedback::{error_text, ErrorNotice, Loading};

// ─── Server functions ────────────────────────────────────────────────────────

#[server]
pub async fn list_publications() -> Result<Vec<Publication>, ServerFnError> {
    use crate::server::{session, to_server_error};
    use florescer_common::services::content;

    let backend = session::backend()?;
    content::publications(&backend).await.map_err(to_server_error)
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn PublicationsPage() -> impl IntoView {
    let publications = Resource::new(|| (), |_| list_publications());
    let search = RwSignal::new(String::new());
    let selected = RwSignal::new(None::<Publication>);

    view! {
        <div class="publications-page">
            <h2 class="page-title">"PUBLICAÇÕES"</h2>
            <p class="page-quote">
                "\"De um scroll na natureza: dicas, histórias e descobertas para quem planta o futuro.\""
            </p>

            <div class="publications-layout">
                <article class="reader">
                    {move || match selected.get() {
                        Some(post) => view! { <PublicationDetail post=post on_back=move |_| selected.set(None)/> }.into_any(),
                        None => view! {
                            <div class="reader-empty">
                                <p>"Selecione um artigo para começar a leitura"</p>
                            </div>
                        }.into_any(),
                    }}
                </article>

                <aside class="most-read">
                    <input class="search" type="text" placeholder="Buscar 🔍" bind:value=search/>
                    <h3>"MAIS LIDOS"</h3>
                    <Suspense fallback=|| view! { <Loading/> }>
                        {move || publications.get().map(|res| match res {
                            Ok(list) => {
                                let term = search.get();
                                filter_by_title(&list, &term)
                                    .into_iter()
                                    .cloned()
                                    .map(|post| {
                                        let title = post.title.clone();
                                        let views = post.views;
                                        view! {
                                            <button class="post-link" on:click=move |_| selected.set(Some(post.clone()))>
                                                <span class="leaf">"🌱"</span>
                                                <div>
                                                    <h4>{title}</h4>
                                                    <p>{views} " visualizações"</p>
                                                </div>
                                            </button>
                                        }
                                    })
                                    .collect_view()
                                    .into_any()
                            }
                            Err(e) => view! { <ErrorNotice message=error_text(&e)/> }.into_any(),
                        })}
                    </Suspense>
                </aside>
            </div>
        </div>
    }
}

#[component]
fn PublicationDetail(post: Publication, #[prop(into)] on_back: Callback<()>) -> impl IntoView {
    let published_on = post.published_on();
    let paragraphs: Vec<String> = post.paragraphs().map(str::to_string).collect();

    view! {
        <div class="publication">
            <button class="btn btn-link" on:click=move |_| on_back.run(())>"← Voltar"</button>
            {post.cover_url.clone().map(|url| view! {
                <div class="cover"><img src=url alt=post.title.clone()/></div>
            })}
            <h3>{post.title.clone()}</h3>
            <div class="byline">
                <span>"Por " {post.author.clone()}</span>
                <span>"•"</span>
                <span>{post.views} " visualizações"</span>
                <span>"•"</span>
                <span>{published_on}</span>
            </div>
            <div class="publication-body">
                {paragraphs.into_iter().map(|p| view! { <p>{p}</p> }).collect_view()}
            </div>
        </div>
    }
}
