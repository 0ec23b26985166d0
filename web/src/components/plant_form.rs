//! Admin dialog for registering a new plant species.

use leptos::prelude::*;
use leptos::task::spawn_local;
use server_fn::codec::{MultipartData, MultipartFormData};
use wasm_bindgen::JsCast;
use web_sys::{File, FormData, HtmlFormElement, SubmitEvent};

use florescer_common::form::{PlantForm, SubmitState};
use florescer_common::upload::{self, IMAGE_FIELD};

use crate::feedback::{error_text, ErrorNotice};

const TEXT_FIELDS: [&str; 5] = [
    "nome",
    "nomeCientifico",
    "descricao",
    "caracteristicasTexto",
    "curiosidades",
];

// ─── Server functions ────────────────────────────────────────────────────────

/// Store the picked image (if any) and insert the plant. Admins only.
#[server(input = MultipartFormData)]
pub async fn create_plant(data: MultipartData) -> Result<(), ServerFnError> {
    use crate::server::{self, session, to_server_error};
    use florescer_common::services::{auth, plants};
    use florescer_common::upload::ImageUpload;

    let state = server::state()?;
    let backend = session::backend()?;
    auth::require_admin(&backend).await.map_err(to_server_error)?;

    let mut fields = data
        .into_inner()
        .ok_or_else(|| ServerFnError::new("Formulário inválido"))?;
    let mut form = PlantForm::default();
    let mut image = None;

    while let Some(field) = fields
        .next_field()
        .await
        .map_err(|e| ServerFnError::new(format!("Formulário inválido: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(|m| m.to_string()).unwrap_or_default();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServerFnError::new(format!("Erro no upload: {e}")))?;
            if !bytes.is_empty() {
                image = Some(ImageUpload::new(file_name, content_type, bytes.to_vec()));
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ServerFnError::new(format!("Formulário inválido: {e}")))?;
            form.set(&name, value);
        }
    }

    plants::create_from_form(&backend, &state.config.storage_bucket, &form, image)
        .await
        .map_err(to_server_error)
}

// ─── Component ───────────────────────────────────────────────────────────────

/// Checks run in the browser before the form is sent.
fn precheck(data: &FormData) -> Result<(), String> {
    let mut draft = PlantForm::default();
    for name in TEXT_FIELDS {
        if let Some(value) = data.get(name).as_string() {
            draft.set(name, value);
        }
    }
    draft.validate().map_err(|e| e.to_string())?;

    if let Ok(file) = data.get(IMAGE_FIELD).dyn_into::<File>() {
        if file.size() > 0.0 {
            upload::check_image(&file.type_(), file.size() as usize).map_err(|e| e.to_string())?;
        }
    }
    Ok(())
}

#[component]
pub fn PlantFormDialog(
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_created: Callback<()>,
) -> impl IntoView {
    let state = RwSignal::new(SubmitState::default());
    let busy = move || state.with(SubmitState::is_submitting);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if state.with_untracked(SubmitState::is_submitting) {
            return;
        }
        let Some(form) = ev
            .target()
            .and_then(|t| t.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };
        let Ok(data) = FormData::new_with_form(&form) else {
            return;
        };
        if let Err(msg) = precheck(&data) {
            state.update(|s| {
                s.reject(msg);
            });
            return;
        }

        let mut started = false;
        state.update(|s| started = s.begin());
        if !started {
            return;
        }
        spawn_local(async move {
            let outcome = create_plant(data.into()).await.map_err(|e| error_text(&e));
            let created = outcome.is_ok();
            state.update(|s| s.finish(&outcome));
            if created {
                on_created.run(());
            }
        });
    };

    view! {
        <div
            class="overlay"
            role="dialog"
            aria-modal="true"
            aria-labelledby="create-plant-title"
            on:click=move |_| {
                if !busy() {
                    on_close.run(());
                }
            }
        >
            <div class="modal form-modal" on:click=|e| e.stop_propagation()>
                <h3 id="create-plant-title">"Cadastrar nova espécie"</h3>

                {move || state.with(|s| s.error().map(|m| view! { <ErrorNotice message=m.to_string()/> }))}

                <form class="plant-form" on:submit=on_submit>
                    <label>
                        "Nome popular"
                        <input name="nome" required/>
                    </label>
                    <label>
                        "Nome científico"
                        <input name="nomeCientifico" required/>
                    </label>
                    <label>
                        "Descrição"
                        <textarea name="descricao" rows="3"></textarea>
                    </label>
                    <label>
                        "Imagem"
                        <input type="file" name=IMAGE_FIELD accept="image/*" required/>
                    </label>
                    <label>
                        "Características (uma por linha)"
                        <textarea
                            name="caracteristicasTexto"
                            rows="4"
                            placeholder="Ex: Frutos ricos em vitamina C\nResistente ao sol"
                            required
                        ></textarea>
                    </label>
                    <label>
                        "Curiosidades"
                        <textarea name="curiosidades" rows="3"></textarea>
                    </label>

                    <div class="form-actions">
                        <button
                            type="button"
                            class="btn btn-outline"
                            disabled=busy
                            on:click=move |_| on_close.run(())
                        >
                            "Cancelar"
                        </button>
                        <button type="submit" class="btn btn-primary" disabled=busy>
                            {move || if busy() { "Salvando..." } else { "Salvar" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
