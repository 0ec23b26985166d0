//! Root Leptos application: HTML shell, meta tags and the single-page site.
//!
//! All screens live under `/`; the page shown is chosen by the URL fragment
//! through [`Navigation`].

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Meta, MetaTags, Stylesheet, Title};
use leptos_router::components::{Route as RouterRoute, Router, Routes};
use leptos_router::path;

use florescer_common::route::Page;

use crate::components::{footer::Footer, header::Header};
use crate::navigation::Navigation;
use crate::pages::{
    adoption::AdoptionPage, adoption_success::AdoptionSuccessPage, catalog::CatalogPage,
    catalog_admin::CatalogAdminPage, contact::ContactPage, home::HomePage, login::LoginPage,
    profile::ProfilePage, publications::PublicationsPage, signup::SignupPage,
};

/// Document rendered by the server around `<App/>`.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/florescer-web.css"/>
        <Title text="Florescer – Cultivando o Futuro"/>
        <Meta name="description" content="Adote uma planta e acompanhe o seu crescimento"/>

        <Router>
            <Routes fallback=|| "Página não encontrada.">
                <RouterRoute path=path!("/") view=Site/>
            </Routes>
        </Router>
    }
}

#[component]
fn Site() -> impl IntoView {
    let nav = Navigation::provide();
    let page = Memo::new(move |_| nav.route().with(|r| r.page));

    view! {
        <Header/>
        <main class="main-content">
            {move || match page.get() {
                Page::Home => view! { <HomePage/> }.into_any(),
                Page::Catalog => view! { <CatalogPage/> }.into_any(),
                Page::CatalogAdmin => view! { <CatalogAdminPage/> }.into_any(),
                Page::Profile => view! { <ProfilePage/> }.into_any(),
                Page::Publications => view! { <PublicationsPage/> }.into_any(),
                Page::Contact => view! { <ContactPage/> }.into_any(),
                Page::Login => view! { <LoginPage/> }.into_any(),
                Page::Signup => view! { <SignupPage/> }.into_any(),
                Page::Adoption => view! { <AdoptionPage/> }.into_any(),
                Page::AdoptionSuccess => view! { <AdoptionSuccessPage/> }.into_any(),
            }}
        </main>
        <Footer/>
    }
}
