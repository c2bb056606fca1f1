use dioxus::prelude::*;
use gloo_net::http::Request;
use serde::Deserialize;

use crate::config::RuntimeConfig;
use crate::notify::{push_notice, Notice, NoticeKind};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    /// All three fields are required; whitespace does not count.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.message.trim().is_empty()
        {
            return Err("Please fill in all fields.");
        }
        Ok(())
    }
}

/// Builds the `application/x-www-form-urlencoded` body the endpoint expects.
pub fn encode_form_body(form: &ContactForm) -> String {
    format!(
        "name={}&email={}&message={}",
        urlencoding::encode(form.name.trim()),
        urlencoding::encode(form.email.trim()),
        urlencoding::encode(form.message.trim()),
    )
}

/// Error envelope the form endpoint returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Fire-and-forget POST. The contract is binary: `Ok` on any 2xx, `Err`
/// with a single message otherwise.
async fn submit_message(endpoint: &str, body: String) -> Result<(), String> {
    let response = Request::post(endpoint)
        .header("Accept", "application/json")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(body)
        .map_err(|err| format!("request failed: {err}"))?
        .send()
        .await
        .map_err(|err| format!("request failed: {err}"))?;
    if response.ok() {
        return Ok(());
    }
    let status = response.status();
    if let Ok(text) = response.text().await {
        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&text) {
            if let Some(detail) = envelope.errors.first() {
                return Err(detail.message.clone());
            }
        }
    }
    Err(format!("submission failed: status {status}"))
}

#[component]
pub fn ContactSection() -> Element {
    let config = use_context::<RuntimeConfig>();
    let notices = use_context::<Signal<Option<Notice>>>();
    let mut form = use_signal(ContactForm::default);
    let sending = use_signal(|| false);

    let endpoint = config.contact_endpoint_url.clone();

    rsx! {
        section { id: "contact", class: "contact",
            div { class: "section-inner contact-content",
                h2 { class: "section-title", "Get In Touch" }
                p { class: "section-subtitle",
                    "Have a project in mind or just want to say hi? Drop a message below."
                }
                form {
                    class: "contact-form",
                    onsubmit: move |event| {
                        event.prevent_default();
                        if sending() {
                            return;
                        }
                        let current = form();
                        if let Err(message) = current.validate() {
                            push_notice(notices, NoticeKind::Error, message);
                            return;
                        }
                        let body = encode_form_body(&current);
                        let endpoint = endpoint.clone();
                        let mut sending = sending;
                        let mut form = form;
                        spawn(async move {
                            sending.set(true);
                            match submit_message(&endpoint, body).await {
                                Ok(()) => {
                                    push_notice(
                                        notices,
                                        NoticeKind::Success,
                                        "Message sent successfully!",
                                    );
                                    form.set(ContactForm::default());
                                }
                                Err(err) => {
                                    tracing::warn!("contact: {err}");
                                    push_notice(
                                        notices,
                                        NoticeKind::Error,
                                        "Oops! Something went wrong. Please try again.",
                                    );
                                }
                            }
                            sending.set(false);
                        });
                    },
                    div { class: "form-row",
                        label { r#for: "contact-name", "Name" }
                        input {
                            id: "contact-name",
                            r#type: "text",
                            name: "name",
                            value: "{form().name}",
                            maxlength: "80",
                            disabled: sending(),
                            oninput: move |event| {
                                let mut next = form();
                                next.name = event.value();
                                form.set(next);
                            },
                        }
                    }
                    div { class: "form-row",
                        label { r#for: "contact-email", "Email" }
                        input {
                            id: "contact-email",
                            r#type: "email",
                            name: "email",
                            value: "{form().email}",
                            maxlength: "120",
                            disabled: sending(),
                            oninput: move |event| {
                                let mut next = form();
                                next.email = event.value();
                                form.set(next);
                            },
                        }
                    }
                    div { class: "form-row",
                        label { r#for: "contact-message", "Message" }
                        textarea {
                            id: "contact-message",
                            name: "message",
                            value: "{form().message}",
                            maxlength: "2000",
                            rows: "8",
                            disabled: sending(),
                            oninput: move |event| {
                                let mut next = form();
                                next.message = event.value();
                                form.set(next);
                            },
                        }
                    }
                    button {
                        r#type: "submit",
                        class: "btn btn-submit",
                        disabled: sending(),
                        if sending() { "Sending..." } else { "Send Message" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            message: "Hello & welcome!".to_string(),
        }
    }

    #[test]
    fn blank_fields_fail_validation() {
        assert!(ContactForm::default().validate().is_err());
        let mut form = filled();
        form.message = "   ".to_string();
        assert!(form.validate().is_err());
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn body_is_form_encoded() {
        let body = encode_form_body(&filled());
        assert_eq!(
            body,
            "name=Ada%20Lovelace&email=ada%40example.com&message=Hello%20%26%20welcome%21"
        );
    }

    #[test]
    fn body_trims_surrounding_whitespace() {
        let mut form = filled();
        form.name = "  Ada  ".to_string();
        assert!(encode_form_body(&form).starts_with("name=Ada&"));
    }
}
