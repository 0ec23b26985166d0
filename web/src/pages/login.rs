use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::SubmitEvent;

use florescer_common::form::{LoginForm, SubmitState};
use florescer_common::model::Viewer;
use florescer_common::route::Page;

use crate::feedback::{error_text, ErrorNotice};
use crate::navigation::use_navigation;

// ─── Server functions ────────────────────────────────────────────────────────

/// Password sign-in. Starts the session cookie on success.
#[server]
pub async fn login(form: LoginForm) -> Result<Viewer, ServerFnError> {
    use crate::server::{self, session, to_server_error};
    use florescer_common::services::auth;

    let state = server::state()?;
    let started = auth::sign_in(&state.backend, &form)
        .await
        .map_err(to_server_error)?;
    session::remember(&started)?;
    Ok(started.user.viewer())
}

// ─── Page component ──────────────────────────────────────────────────────────

#[component]
pub fn LoginPage() -> impl IntoView {
    let nav = use_navigation();
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let state = RwSignal::new(SubmitState::default());
    let busy = move || state.with(SubmitState::is_submitting);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if state.with_untracked(SubmitState::is_submitting) {
            return;
        }
        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
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
            let outcome = login(form).await.map_err(|e| error_text(&e));
            let ok = outcome.is_ok();
            state.update(|s| s.finish(&outcome));
            if ok {
                nav.auth_changed();
                nav.go(Page::Home);
            }
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h2>"ENTRAR"</h2>
                <form on:submit=on_submit>
                    <label>
                        "Email"
                        <input type="email" placeholder="seu@email.com" required bind:value=email/>
                    </label>
                    <label>
                        "Senha"
                        <input type="password" placeholder="••••••••" required bind:value=password/>
                    </label>

                    {move || state.with(|s| s.error().map(|m| view! { <ErrorNotice message=m.to_string()/> }))}

                    <button type="submit" class="btn btn-primary" disabled=busy>
                        {move || if busy() { "Entrando..." } else { "Entrar" }}
                    </button>
                </form>
                <button class="btn btn-link" on:click=move |_| nav.go(Page::Signup)>
                    "Não tem conta? Cadastre-se"
                </button>
            </div>
        </div>
    }
}
