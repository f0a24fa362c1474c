use log::{error, warn};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::notification::{Notice, Notifier};
use crate::components::phone_input::PhoneInput;
use crate::config::SiteConfig;
use crate::lead::{ContactFields, LeadForm, LeadSubmission, ModalFields, ServiceKind};
use crate::pricing::QuoteSnapshot;
use crate::telemetry::{Goal, TelemetryHandle};
use crate::webhook::WebhookClient;
use crate::Route;

pub const SENT_MESSAGE: &str = "Мы свяжемся с вами в ближайшее время.";
pub const FAILED_TITLE: &str = "Ошибка отправки";

#[derive(Clone, PartialEq)]
pub struct LeadContext {
    pub config: SiteConfig,
    pub client: WebhookClient,
    pub telemetry: TelemetryHandle,
}

impl LeadContext {
    pub fn new(config: SiteConfig, telemetry: TelemetryHandle) -> Self {
        let client = WebhookClient::fetch(config.webhook_url.clone());
        Self {
            config,
            client,
            telemetry,
        }
    }
}

pub async fn deliver_lead(ctx: &LeadContext, lead: LeadSubmission) -> Notice {
    let (sent_title, goal) = match lead.form {
        LeadForm::Modal { .. } => ("Заявка отправлена!", Goal::SubmitModalForm),
        LeadForm::Contact { .. } => ("Сообщение отправлено!", Goal::SubmitContactForm),
    };

    match ctx.client.submit(&lead).await {
        Ok(_) => {
            ctx.telemetry.record(goal);
            Notice::success(sent_title, SENT_MESSAGE)
        }
        Err(e) => {
            error!("Error sending {} form: {}", lead.form.form_type(), e);
            Notice::error(FAILED_TITLE, ctx.config.call_us_message())
        }
    }
}

pub async fn submit_modal(
    ctx: &LeadContext,
    fields: &mut ModalFields,
    title: &str,
    quote: Option<QuoteSnapshot>,
    page_url: String,
) -> Notice {
    let lead = LeadSubmission::new(fields.to_form(title), quote, page_url);
    let notice = deliver_lead(ctx, lead).await;
    if notice.is_success() {
        *fields = ModalFields::default();
    }
    notice
}

pub async fn submit_contact(ctx: &LeadContext, fields: &mut ContactFields, page_url: String) -> Notice {
    let lead = LeadSubmission::new(fields.to_form(), None, page_url);
    let notice = deliver_lead(ctx, lead).await;
    if notice.is_success() {
        *fields = ContactFields::default();
    }
    notice
}

fn page_url() -> String {
    web_sys::window()
        .and_then(|w| w.location().href().ok())
        .unwrap_or_default()
}

fn announce(notifier: &Option<Notifier>, notice: Notice) {
    match notifier {
        Some(notifier) => notifier.show(notice),
        None => warn!("No notification area mounted, dropping: {}", notice.title),
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalFormProps {
    pub ctx: LeadContext,
    pub title: String,
    #[prop_or_default]
    pub quote: Option<QuoteSnapshot>,
    pub on_sent: Callback<()>,
}

#[function_component(ModalForm)]
pub fn modal_form(props: &ModalFormProps) -> Html {
    let fields = use_state(ModalFields::default);
    let notifier = use_context::<Notifier>();

    let onsubmit = {
        let fields = fields.clone();
        let ctx = props.ctx.clone();
        let title = props.title.clone();
        let quote = props.quote.clone();
        let on_sent = props.on_sent.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let fields = fields.clone();
            let ctx = ctx.clone();
            let title = title.clone();
            let quote = quote.clone();
            let on_sent = on_sent.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                let mut draft = (*fields).clone();
                let notice = submit_modal(&ctx, &mut draft, &title, quote, page_url()).await;
                let sent = notice.is_success();
                announce(&notifier, notice);
                if sent {
                    on_sent.emit(());
                    fields.set(draft);
                }
            });
        })
    };

    let on_name = {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            fields.set(ModalFields {
                name: input.value(),
                ..(*fields).clone()
            });
        })
    };

    let on_phone = {
        let fields = fields.clone();
        Callback::from(move |phone: String| {
            fields.set(ModalFields {
                phone,
                ..(*fields).clone()
            });
        })
    };

    html! {
        <form id="modalForm" class="modal__form" {onsubmit}>
            <input
                type="text"
                id="modal-name"
                class="form__input"
                placeholder="Ваше имя"
                autocomplete="name"
                required=true
                value={fields.name.clone()}
                oninput={on_name}
            />
            <PhoneInput id="modal-phone" value={fields.phone.clone()} on_change={on_phone} />
            <button type="submit" class="btn btn--primary btn--full">{"Отправить заявку"}</button>
            <p class="form__note">
                {"Нажимая кнопку, вы соглашаетесь с "}
                <Link<Route> to={Route::Privacy}>{"политикой конфиденциальности"}</Link<Route>>
            </p>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactFormProps {
    pub ctx: LeadContext,
}

#[function_component(ContactForm)]
pub fn contact_form(props: &ContactFormProps) -> Html {
    let fields = use_state(ContactFields::default);
    let notifier = use_context::<Notifier>();
    let form_ref = use_node_ref();

    let onsubmit = {
        let fields = fields.clone();
        let ctx = props.ctx.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let fields = fields.clone();
            let ctx = ctx.clone();
            let notifier = notifier.clone();
            spawn_local(async move {
                let mut draft = (*fields).clone();
                let notice = submit_contact(&ctx, &mut draft, page_url()).await;
                let sent = notice.is_success();
                announce(&notifier, notice);
                if sent {
                    fields.set(draft);
                }
            });
        })
    };

    let text_field = |apply: fn(&mut ContactFields, String)| {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let value = match e.target_dyn_into::<HtmlTextAreaElement>() {
                Some(area) => area.value(),
                None => e.target_unchecked_into::<HtmlInputElement>().value(),
            };
            let mut next = (*fields).clone();
            apply(&mut next, value);
            fields.set(next);
        })
    };

    let on_phone = {
        let fields = fields.clone();
        Callback::from(move |phone: String| {
            fields.set(ContactFields {
                phone,
                ..(*fields).clone()
            });
        })
    };

    let on_service = {
        let fields = fields.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            fields.set(ContactFields {
                service: select.value(),
                ..(*fields).clone()
            });
        })
    };

    // Enter on a select does not submit natively.
    let on_select_key = {
        let form_ref = form_ref.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                if let Some(form) = form_ref.cast::<HtmlFormElement>() {
                    let _ = form.request_submit();
                }
            }
        })
    };

    html! {
        <form id="contactForm" class="contact__form" ref={form_ref} {onsubmit}>
            <div class="form__row">
                <input
                    type="text"
                    id="name"
                    class="form__input"
                    placeholder="Ваше имя"
                    autocomplete="name"
                    required=true
                    value={fields.name.clone()}
                    oninput={text_field(|f, v| f.name = v)}
                />
                <PhoneInput id="phone" value={fields.phone.clone()} on_change={on_phone} />
            </div>
            <input
                type="email"
                id="email"
                class="form__input"
                placeholder="Email (необязательно)"
                autocomplete="email"
                value={fields.email.clone()}
                oninput={text_field(|f, v| f.email = v)}
            />
            <select
                id="service"
                class="form__input"
                onchange={on_service}
                onkeypress={on_select_key}
            >
                <option value="" selected={fields.service.is_empty()}>{"Выберите услугу"}</option>
                { for ServiceKind::ALL.iter().map(|s| html! {
                    <option value={s.value()} selected={fields.service == s.value()}>
                        {s.display_name()}
                    </option>
                }) }
            </select>
            <textarea
                id="message"
                class="form__input"
                rows="4"
                placeholder="Сообщение"
                value={fields.message.clone()}
                oninput={text_field(|f, v| f.message = v)}
            />
            <button type="submit" class="btn btn--primary">{"Отправить сообщение"}</button>
        </form>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::testing::RecordingTelemetry;
    use crate::webhook::testing::CannedTransport;
    use futures::executor::block_on;

    fn ctx(transport: CannedTransport, telemetry: RecordingTelemetry) -> LeadContext {
        let config = SiteConfig {
            webhook_url: "https://hooks.example/lead".to_string(),
            fallback_phone: "+7 (900) 696-30-25".to_string(),
            metrika_counter_id: None,
        };
        LeadContext {
            client: WebhookClient::new(config.webhook_url.clone(), transport),
            config,
            telemetry: TelemetryHandle::new(telemetry),
        }
    }

    fn filled_contact() -> ContactFields {
        ContactFields {
            name: "Олег".to_string(),
            phone: "+7 (999) 123-45-67".to_string(),
            email: "oleg@example.ru".to_string(),
            service: "glossy".to_string(),
            message: "Кухня 12 м²".to_string(),
        }
    }

    #[test]
    fn contact_success_clears_fields_and_reports_success() {
        let telemetry = RecordingTelemetry::default();
        let ctx = ctx(CannedTransport::status(200, r#"{"status":"ok"}"#), telemetry.clone());
        let mut fields = filled_contact();

        let notice = block_on(submit_contact(&ctx, &mut fields, "https://example.ru/".to_string()));

        assert_eq!(notice, Notice::success("Сообщение отправлено!", SENT_MESSAGE));
        assert_eq!(fields, ContactFields::default());
        assert_eq!(*telemetry.goals.borrow(), vec![Goal::SubmitContactForm]);
    }

    #[test]
    fn contact_failure_keeps_fields_and_points_to_phone() {
        let telemetry = RecordingTelemetry::default();
        let ctx = ctx(CannedTransport::status(502, "Bad Gateway"), telemetry.clone());
        let mut fields = filled_contact();

        let notice = block_on(submit_contact(&ctx, &mut fields, String::new()));

        assert!(!notice.is_success());
        assert_eq!(notice.title, FAILED_TITLE);
        assert!(notice.message.contains("+7 (900) 696-30-25"));
        assert_eq!(fields, filled_contact());
        assert!(telemetry.goals.borrow().is_empty());
    }

    #[test]
    fn transport_failure_keeps_fields() {
        let ctx = ctx(CannedTransport::unreachable(), RecordingTelemetry::default());
        let mut fields = filled_contact();
        let notice = block_on(submit_contact(&ctx, &mut fields, String::new()));
        assert_eq!(notice.title, FAILED_TITLE);
        assert_eq!(fields, filled_contact());
    }

    #[test]
    fn contact_payload_carries_service_name_and_page() {
        let transport = CannedTransport::status(200, "{}");
        let ctx = ctx(transport.clone(), RecordingTelemetry::default());
        let mut fields = filled_contact();

        block_on(submit_contact(&ctx, &mut fields, "https://example.ru/#contacts".to_string()));

        let sent = transport.sent.borrow();
        let body = &sent[0].1;
        assert_eq!(body["form_type"], "contact");
        assert_eq!(body["service"], "Глянцевые потолки");
        assert_eq!(body["page_url"], "https://example.ru/#contacts");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn modal_with_quote_snapshot_sends_calculator_fields() {
        let transport = CannedTransport::status(200, "{}");
        let telemetry = RecordingTelemetry::default();
        let ctx = ctx(transport.clone(), telemetry.clone());
        let mut fields = ModalFields {
            name: "Анна".to_string(),
            phone: "+7 (999) 000-11-22".to_string(),
        };
        let quote = QuoteSnapshot {
            area: "18".to_string(),
            ceiling_type: "Сатиновый".to_string(),
            total: "9\u{a0}900 ₽".to_string(),
        };

        let notice = block_on(submit_modal(
            &ctx,
            &mut fields,
            "Заказать точный расчет",
            Some(quote),
            String::new(),
        ));

        assert_eq!(notice.title, "Заявка отправлена!");
        assert_eq!(fields, ModalFields::default());
        let sent = transport.sent.borrow();
        let body = &sent[0].1;
        assert_eq!(body["title"], "Заказать точный расчет");
        assert_eq!(body["calculator_area"], "18");
        assert_eq!(body["calculator_type"], "Сатиновый");
        assert_eq!(body["calculator_total"], "9\u{a0}900 ₽");
        assert_eq!(*telemetry.goals.borrow(), vec![Goal::SubmitModalForm]);
    }

    #[test]
    fn modal_without_quote_omits_calculator_fields() {
        let transport = CannedTransport::status(200, "{}");
        let ctx = ctx(transport.clone(), RecordingTelemetry::default());
        let mut fields = ModalFields::default();

        block_on(submit_modal(&ctx, &mut fields, "Заказать звонок", None, String::new()));

        let sent = transport.sent.borrow();
        let body = &sent[0].1;
        assert!(body.get("calculator_area").is_none());
        assert!(body.get("calculator_type").is_none());
        assert!(body.get("calculator_total").is_none());
    }

    #[test]
    fn malformed_success_body_still_counts_as_sent() {
        let ctx = ctx(CannedTransport::status(200, "OK"), RecordingTelemetry::default());
        let mut fields = filled_contact();
        let notice = block_on(submit_contact(&ctx, &mut fields, String::new()));
        assert!(notice.is_success());
    }
}
