use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::SubmitEvent;

use florescer_common::form::{SignupForm, SubmitState};
use florescer_common::route::Page;

use crate::feedback::{error_text, ErrorNotice};
use crate::navigation::use_navigation;

// ─── Server functions ────────────────────────────────────────────────────────

/// Create an account. Returns `true` when the provider opened a session
/// right away (no e-mail confirmation pending).
#[server]
pub async fn signup(form: SignupForm) -> Result<bool, ServerFnError> {
    use crate::server::{self, session, to_server_error};
    use florescer_common::services::auth;

    let state = server::state()?;
    let created = auth::sign_up(&state.backend, &form)
        .await
        .map_err(to_server_error)?;
    match &created.session {
        Some(s) => {
            session::remember(s)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn SignupPage() -> impl IntoView {
    let nav = use_navigation();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let admin = RwSignal::new(false);
    let state = RwSignal::new(SubmitState::default());
    let busy = move || state.with(SubmitState::is_submitting);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if state.with_untracked(SubmitState::is_submitting) {
            return;
        }
        let form = SignupForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm: confirm.get_untracked(),
            admin: admin.get_untracked(),
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
        spawn_local(async move {
            let outcome = signup(form).await.map_err(|e| error_text(&e));
            state.update(|s| s.finish(&outcome));
            if let Ok(signed_in) = outcome {
                if signed_in {
                    nav.auth_changed();
                }
                nav.go(Page::Home);
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"CADASTRAR"</h2>
                <form on:submit=on_submit>
                    <label>
                        "Nome"
                        <input type="text" placeholder="Seu nome" required bind:value=name/>
                    </label>
                    <label>
                        "Email"
                        <input type="email" placeholder="seu@email.com" required bind:value=email/>
                    </label>
                    <label>
                        "Senha"
                        <input type="password" placeholder="••••••••" required bind:value=password/>
                    </label>
                    <label>
                        "Confirmar Senha"
                        <input type="password" placeholder="••••••••" required bind:value=confirm/>
                    </label>
                    <label class="checkbox">
                        <input id="isAdmin" type="checkbox" bind:checked=admin/>
                        "Sou administrador"
                    </label>

                    {move || state.with(|s| s.error().map(|m| view! { <ErrorNotice message=m.to_string()/> }))}

                    <button type="submit" class="btn btn-primary" disabled=busy>
                        {move || if busy() { "Cadastrando..." } else { "Cadastrar" }}
                    </button>
                </form>
                <button class="btn btn-link" on:click=move |_| nav.go(Page::Login)>
                    "Já tem conta? Entrar"
                </button>
            </div>
        </div>
    }
}
