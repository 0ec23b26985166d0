//! Contact page. The form is not sent anywhere; submitting it only
//! acknowledges the message locally.

use leptos::prelude::*;
use web_sys::SubmitEvent;

#[component]
pub fn ContactPage() -> impl IntoView {
    let (sent, set_sent) = signal(false);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_sent.set(true);
    };

    view! {
        <div class="contact-page">
            <h2 class="page-title">"CONTATO"</h2>
            <p class="page-quote">"\"Vamos crescer juntos? Entre em contato conosco.\""</p>

            <div class="contact-layout">
                <div class="contact-form-card">
                    <h3>"Envie sua mensagem"</h3>
                    <Show
                        when=move || sent.get()
                        fallback=move || view! {
                            <form class="contact-form" on:submit=on_submit>
                                <label for="contato-nome">"Nome"</label>
                                <input type="text" id="contato-nome" placeholder="Seu nome completo"/>
                                <label for="contato-email">"Email"</label>
                                <input type="email" id="contato-email" placeholder="seu@email.com"/>
                                <label for="contato-mensagem">"Mensagem"</label>
                                <textarea rows="5" id="contato-mensagem" placeholder="Como podemos ajudar você?"></textarea>
                                <button type="submit" class="btn btn-primary">"Enviar Mensagem"</button>
                            </form>
                        }
                    >
                        <p class="ack">"Mensagem recebida! Obrigado pelo contato."</p>
                        <button class="btn btn-link" on:click=move |_| set_sent.set(false)>"Enviar outra mensagem"</button>
                    </Show>
                </div>

                <div class="contact-details">
                    <div class="detail"><h4>"✉ Email"</h4><p>"contato@florescer.com.br"</p></div>
                    <div class="detail"><h4>"☎ Telefone"</h4><p>"(27) 3333-4444"</p></div>
                    <div class="detail"><h4>"📍 Endereço"</h4><p>"Parque Moscoso" <br/> "Vitória - ES"</p></div>
                    <div class="detail hours">
                        <h4>"Horário de Atendimento"</h4>
                        <p>"Segunda a Sexta: 8h às 18h"</p>
                        <p>"Sábado: 9h às 13h"</p>
                        <p>"Domingo: Fechado"</p>
                    </div>
                </div>
            </div>
        </div>
    }
}
