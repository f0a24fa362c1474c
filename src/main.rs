use log::{info, Level};
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod lead;
mod phone;
mod pricing;
mod reveal;
mod telemetry;
mod webhook;
mod components {
    pub mod calculator;
    pub mod forms;
    pub mod modal;
    pub mod notification;
    pub mod phone_input;
}
mod pages {
    pub mod landing;
    pub mod privacy;
}

use components::notification::NotificationProvider;
use config::SiteConfig;
use pages::{landing::Landing, privacy::PrivacyPolicy};
use telemetry::TelemetryHandle;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/privacy")]
    Privacy,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route, config: &SiteConfig, telemetry: &TelemetryHandle) -> Html {
    match route {
        Route::Home => {
            info!("Rendering landing page");
            html! { <Landing config={config.clone()} telemetry={telemetry.clone()} /> }
        }
        Route::Privacy => {
            info!("Rendering privacy page");
            html! { <PrivacyPolicy config={config.clone()} /> }
        }
        Route::NotFound => html! { <Redirect<Route> to={Route::Home} /> },
    }
}

#[function_component]
fn App() -> Html {
    let config = use_memo(|_| SiteConfig::from_build(), ());
    let telemetry = {
        let counter_id = config.metrika_counter_id;
        use_memo(move |_| TelemetryHandle::for_counter(counter_id), ())
    };

    let render = {
        let config = (*config).clone();
        let telemetry = (*telemetry).clone();
        Callback::from(move |route: Route| switch(route, &config, &telemetry))
    };

    html! {
        <BrowserRouter>
            <NotificationProvider>
                <Switch<Route> {render} />
            </NotificationProvider>
        </BrowserRouter>
    }
}

fn main() {
    console_error_panic_hook::set_once();

    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting landing page");
    yew::Renderer::<App>::new().render();
}
