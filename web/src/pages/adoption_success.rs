use leptos::prelude::*;

use florescer_common::route::Page;

use crate::navigation::use_navigation;

#[component]
pub fn AdoptionSuccessPage() -> impl IntoView {
    let nav = use_navigation();

    view! {
        <div class="adoption-success-page">
            <div class="success-card">
                <span class="success-icon">"✔"</span>
                <h2>"Adoção Confirmada!"</h2>
                <p>"Parabéns! Você acaba de dar um novo lar para uma plantinha. Cuide dela com carinho."</p>
                <div class="modal-actions">
                    <button class="btn btn-primary" on:click=move |_| nav.go(Page::Profile)>
                        "🌱 Ver Minhas Plantas"
                    </button>
                    <button class="btn btn-outline" on:click=move |_| nav.go(Page::Catalog)>
                        "Voltar ao Catálogo"
                    </button>
                </div>
            </div>
        </div>
    }
}
