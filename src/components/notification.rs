use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

pub const HIDE_AFTER_MS: u32 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notification--success",
            NoticeKind::Error => "notification--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationState {
    pub notice: Option<Notice>,
    pub visible: bool,
}

pub enum NotificationAction {
    Show(Notice),
    Hide,
}

impl Reducible for NotificationState {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            NotificationAction::Show(notice) => Rc::new(Self {
                notice: Some(notice),
                visible: true,
            }),
            // text is kept, only visibility changes
            NotificationAction::Hide if self.visible => Rc::new(Self {
                notice: self.notice.clone(),
                visible: false,
            }),
            NotificationAction::Hide => self,
        }
    }
}

// earlier hide timers keep running
#[derive(Clone, PartialEq)]
pub struct Notifier {
    show: Callback<Notice>,
}

impl Notifier {
    pub fn show(&self, notice: Notice) {
        self.show.emit(notice);
    }
}

#[derive(Properties, PartialEq)]
pub struct NotificationProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(NotificationProvider)]
pub fn notification_provider(props: &NotificationProviderProps) -> Html {
    let state = use_reducer(NotificationState::default);

    let notifier = {
        let dispatcher = state.dispatcher();
        use_memo(
            move |_| Notifier {
                show: Callback::from(move |notice: Notice| {
                    dispatcher.dispatch(NotificationAction::Show(notice));
                    let dispatcher = dispatcher.clone();
                    Timeout::new(HIDE_AFTER_MS, move || {
                        dispatcher.dispatch(NotificationAction::Hide);
                    })
                    .forget();
                }),
            },
            (),
        )
    };

    html! {
        <ContextProvider<Notifier> context={(*notifier).clone()}>
            { for props.children.iter() }
            <NotificationBanner state={(*state).clone()} />
        </ContextProvider<Notifier>>
    }
}

#[derive(Properties, PartialEq)]
struct NotificationBannerProps {
    state: NotificationState,
}

#[function_component(NotificationBanner)]
fn notification_banner(props: &NotificationBannerProps) -> Html {
    let (kind_class, title, message) = match &props.state.notice {
        Some(notice) => (
            Some(notice.kind.class()),
            notice.title.clone(),
            notice.message.clone(),
        ),
        None => (None, String::new(), String::new()),
    };

    html! {
        <div
            id="notification"
            class={classes!("notification", kind_class, props.state.visible.then(|| "show"))}
            role="status"
            aria-live="polite"
        >
            <div class="notification__content">
                <div class="notification__title">{title}</div>
                <div class="notification__message">{message}</div>
            </div>
        </div>
    }
}
