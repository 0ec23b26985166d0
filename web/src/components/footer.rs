use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <p>"© 2025 Florescer. Todos os direitos reservados."</p>
        </footer>
    }
}
