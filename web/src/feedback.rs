//! How server-function failures reach the page.

use leptos::prelude::*;

/// Message to show for a failed server function. Service errors carry
/// their user-facing text; transport failures get a generic one.
pub fn error_text(err: &ServerFnError) -> String {
    match err {
        ServerFnError::ServerError(msg) => msg.clone(),
        other => format!("Falha de comunicação com o servidor ({other})"),
    }
}

#[component]
pub fn ErrorNotice(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="alert alert-error" role="alert" aria-live="polite">
            <span class="alert-icon">"⚠"</span>
            <span>{message}</span>
        </div>
    }
}

#[component]
pub fn Loading(#[prop(optional, into)] text: Option<String>) -> impl IntoView {
    let text = text.unwrap_or_else(|| "Carregando...".to_string());
    view! { <p class="loading">{text}</p> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_message_passes_through() {
        let err = ServerFnError::new("Você já adotou esta planta!");
        assert_eq!(error_text(&err), "Você já adotou esta planta!");
    }

    #[test]
    fn test_transport_failure_is_generic() {
        let err: ServerFnError = ServerFnError::Request("connection refused".into());
        assert!(error_text(&err).starts_with("Falha de comunicação"));
    }
}
