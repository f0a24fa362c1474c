use std::rc::Rc;

use log::info;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;
use yew_hooks::use_event_with_window;

use crate::components::forms::{LeadContext, ModalForm};
use crate::pricing::QuoteSnapshot;
use crate::telemetry::{Goal, TelemetryHandle};

pub const CALLBACK_TITLE: &str = "Заказать звонок";
pub const CALLBACK_DESCRIPTION: &str =
    "Оставьте свои контакты и мы свяжемся с вами в ближайшее время";
pub const EXACT_QUOTE_TITLE: &str = "Заказать точный расчет";
pub const EXACT_QUOTE_DESCRIPTION: &str =
    "Замерщик приедет бесплатно и рассчитает стоимость с точностью до рубля";

#[derive(Clone, Debug, PartialEq)]
pub enum ModalTrigger {
    Callback,
    ExactQuote,
    Custom { title: String, description: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModalContent {
    pub title: String,
    pub description: String,
    pub quote: Option<QuoteSnapshot>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(ModalContent),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn content(&self) -> Option<&ModalContent> {
        match self {
            ModalState::Open(content) => Some(content),
            ModalState::Closed => None,
        }
    }
}

pub enum ModalAction {
    Open {
        trigger: ModalTrigger,
        last_quote: Option<QuoteSnapshot>,
    },
    Close,
}

impl Reducible for ModalState {
    type Action = ModalAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ModalAction::Open {
                trigger,
                last_quote,
            } => {
                let content = match trigger {
                    ModalTrigger::Callback => ModalContent {
                        title: CALLBACK_TITLE.to_string(),
                        description: CALLBACK_DESCRIPTION.to_string(),
                        quote: None,
                    },
                    ModalTrigger::ExactQuote => ModalContent {
                        title: EXACT_QUOTE_TITLE.to_string(),
                        description: EXACT_QUOTE_DESCRIPTION.to_string(),
                        quote: last_quote,
                    },
                    ModalTrigger::Custom { title, description } => ModalContent {
                        title,
                        description,
                        quote: None,
                    },
                };
                Rc::new(ModalState::Open(content))
            }
            ModalAction::Close if self.is_open() => Rc::new(ModalState::Closed),
            ModalAction::Close => self,
        }
    }
}

pub fn open_action(
    trigger: ModalTrigger,
    last_quote: Option<QuoteSnapshot>,
    telemetry: &TelemetryHandle,
) -> ModalAction {
    info!("Opening modal: {:?}", trigger);
    telemetry.record(Goal::OpenModal);
    ModalAction::Open {
        trigger,
        last_quote,
    }
}

fn set_body_scroll_locked(locked: bool) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        let _ = body
            .style()
            .set_property("overflow", if locked { "hidden" } else { "" });
    }
}

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub state: ModalState,
    pub ctx: LeadContext,
    pub on_close: Callback<()>,
}

// stays mounted, only the `active` class toggles
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let is_open = props.state.is_open();

    {
        use_effect_with_deps(
            move |open| {
                set_body_scroll_locked(*open);
                if *open {
                    focus_modal_name();
                }
                || ()
            },
            is_open,
        );
    }

    {
        let on_close = props.on_close.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                on_close.emit(());
            }
        });
    }

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            let clicked_backdrop = match (e.target(), e.current_target()) {
                (Some(target), Some(current)) => target == current,
                _ => false,
            };
            if clicked_backdrop {
                on_close.emit(());
            }
        })
    };

    let on_close_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| {
            on_close.emit(());
        })
    };

    let on_sent = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| {
            info!("Modal lead sent, closing");
            on_close.emit(());
        })
    };

    let (title, description, quote) = match props.state.content() {
        Some(content) => (
            content.title.clone(),
            content.description.clone(),
            content.quote.clone(),
        ),
        None => (CALLBACK_TITLE.to_string(), CALLBACK_DESCRIPTION.to_string(), None),
    };

    html! {
        <div
            id="modal"
            class={classes!("modal", is_open.then(|| "active"))}
            onclick={on_backdrop}
            aria-hidden={(!is_open).to_string()}
        >
            <div class="modal__content" role="dialog" aria-modal="true" aria-labelledby="modal-title">
                <button type="button" class="modal__close" aria-label="Закрыть" onclick={on_close_button}>
                    {"×"}
                </button>
                <h3 id="modal-title" class="modal__title">{title.clone()}</h3>
                <p id="modal-description" class="modal__description">{description}</p>
                {
                    if let Some(quote) = quote.as_ref() {
                        html! {
                            <div class="modal__quote">
                                <span>{format!("{} м², {}", quote.area, quote.ceiling_type)}</span>
                                <strong>{quote.total.clone()}</strong>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
                <ModalForm ctx={props.ctx.clone()} {title} {quote} {on_sent} />
            </div>
        </div>
    }
}

fn focus_modal_name() {
    if let Some(input) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id("modal-name"))
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        let _ = input.focus();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::testing::RecordingTelemetry;

    fn snapshot() -> QuoteSnapshot {
        QuoteSnapshot {
            area: "15".to_string(),
            ceiling_type: "Матовый".to_string(),
            total: "6\u{a0}750 ₽".to_string(),
        }
    }

    fn open(trigger: ModalTrigger, last_quote: Option<QuoteSnapshot>) -> Rc<ModalState> {
        Rc::new(ModalState::Closed).reduce(ModalAction::Open {
            trigger,
            last_quote,
        })
    }

    #[test]
    fn starts_closed() {
        assert!(!ModalState::default().is_open());
    }

    #[test]
    fn exact_quote_trigger_keeps_snapshot() {
        let state = open(ModalTrigger::ExactQuote, Some(snapshot()));
        let content = state.content().unwrap();
        assert_eq!(content.title, EXACT_QUOTE_TITLE);
        assert_eq!(content.quote, Some(snapshot()));
    }

    #[test]
    fn exact_quote_without_calculation_has_no_snapshot() {
        let state = open(ModalTrigger::ExactQuote, None);
        assert_eq!(state.content().unwrap().quote, None);
    }

    #[test]
    fn other_triggers_drop_snapshot() {
        let callback = open(ModalTrigger::Callback, Some(snapshot()));
        assert_eq!(callback.content().unwrap().title, CALLBACK_TITLE);
        assert_eq!(callback.content().unwrap().quote, None);

        let custom = open(
            ModalTrigger::Custom {
                title: "Вызвать замерщика".to_string(),
                description: "Бесплатно".to_string(),
            },
            Some(snapshot()),
        );
        assert_eq!(custom.content().unwrap().title, "Вызвать замерщика");
        assert_eq!(custom.content().unwrap().quote, None);
    }

    #[test]
    fn close_clears_snapshot() {
        let state = open(ModalTrigger::ExactQuote, Some(snapshot()));
        let closed = state.reduce(ModalAction::Close);
        assert_eq!(*closed, ModalState::Closed);
        assert!(closed.content().is_none());
    }

    #[test]
    fn closing_a_closed_modal_changes_nothing() {
        let state = Rc::new(ModalState::Closed);
        let same = state.clone().reduce(ModalAction::Close);
        assert!(Rc::ptr_eq(&state, &same));
    }

    #[test]
    fn opening_records_goal_once() {
        let sink = RecordingTelemetry::default();
        let telemetry = TelemetryHandle::new(sink.clone());

        let action = open_action(ModalTrigger::ExactQuote, Some(snapshot()), &telemetry);
        let state = Rc::new(ModalState::Closed).reduce(action);

        assert_eq!(state.content().unwrap().quote, Some(snapshot()));
        assert_eq!(*sink.goals.borrow(), vec![Goal::OpenModal]);

        let _ = state.reduce(ModalAction::Close);
        assert_eq!(sink.goals.borrow().len(), 1);
    }

    #[test]
    fn reopening_replaces_content() {
        let state = open(ModalTrigger::ExactQuote, Some(snapshot()));
        let state = state.reduce(ModalAction::Open {
            trigger: ModalTrigger::Callback,
            last_quote: Some(snapshot()),
        });
        assert_eq!(state.content().unwrap().quote, None);
    }
}
