use web_sys::MouseEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::calculator::Calculator;
use crate::components::forms::{ContactForm, LeadContext};
use crate::components::modal::{open_action, Modal, ModalAction, ModalState, ModalTrigger};
use crate::config::SiteConfig;
use crate::pricing::QuoteSnapshot;
use crate::reveal::{self, use_reveal_on_scroll, use_smooth_anchor_scroll};
use crate::telemetry::TelemetryHandle;
use crate::Route;

const PRODUCTS: [(&str, &str, &str); 4] = [
    ("Матовые", "Классика, которая не бликует и выглядит как идеально ровная штукатурка.", "от 450 ₽/м²"),
    ("Глянцевые", "Зеркальный эффект визуально поднимает потолок и расширяет комнату.", "от 500 ₽/м²"),
    ("Сатиновые", "Мягкий перламутровый отлив, хорошо рассеивает свет.", "от 550 ₽/м²"),
    ("С фотопечатью", "Любое изображение в высоком разрешении: небо, узоры, фото.", "от 1 200 ₽/м²"),
];

const GALLERY: [(&str, &str); 6] = [
    ("/assets/gallery/kitchen.webp", "Глянцевый потолок на кухне"),
    ("/assets/gallery/living.webp", "Двухуровневый потолок в гостиной"),
    ("/assets/gallery/bedroom.webp", "Сатиновый потолок в спальне"),
    ("/assets/gallery/kids.webp", "Потолок с фотопечатью в детской"),
    ("/assets/gallery/bath.webp", "Матовый потолок в ванной"),
    ("/assets/gallery/hall.webp", "Точечные светильники в прихожей"),
];

const STATS: [(&str, &str); 4] = [
    ("12 лет", "на рынке"),
    ("3 500+", "объектов"),
    ("1 день", "монтаж"),
    ("15 лет", "гарантия"),
];

#[derive(Properties, PartialEq)]
pub struct LandingProps {
    pub config: SiteConfig,
    pub telemetry: TelemetryHandle,
}

#[function_component(Landing)]
pub fn landing(props: &LandingProps) -> Html {
    let modal = use_reducer(ModalState::default);
    let last_quote = use_state(|| None::<QuoteSnapshot>);
    let menu_open = use_state(|| false);
    let lead_ctx = {
        let config = props.config.clone();
        let telemetry = props.telemetry.clone();
        use_memo(move |_| LeadContext::new(config, telemetry), ())
    };

    use_reveal_on_scroll();
    use_smooth_anchor_scroll();

    let open_modal = {
        let modal = modal.clone();
        let last_quote = last_quote.clone();
        let telemetry = props.telemetry.clone();
        Callback::from(move |trigger: ModalTrigger| {
            modal.dispatch(open_action(trigger, (*last_quote).clone(), &telemetry));
        })
    };

    let close_modal = {
        let modal = modal.clone();
        Callback::from(move |_: ()| modal.dispatch(ModalAction::Close))
    };

    let on_quote = {
        let last_quote = last_quote.clone();
        Callback::from(move |quote: QuoteSnapshot| last_quote.set(Some(quote)))
    };

    let opener = |trigger: ModalTrigger| {
        let open_modal = open_modal.clone();
        Callback::from(move |_: MouseEvent| open_modal.emit(trigger.clone()))
    };

    let on_exact_quote = {
        let open_modal = open_modal.clone();
        Callback::from(move |_: ()| open_modal.emit(ModalTrigger::ExactQuote))
    };

    let to_calculator = Callback::from(|_: MouseEvent| reveal::scroll_to_id("calculator"));

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(false))
    };

    html! {
        <div class="landing-page">
            <header class="header">
                <div class="container header__inner">
                    <a href="#hero" class="header__logo">{"Потолки"}<span>{"Про"}</span></a>
                    <button class="burger-menu" aria-label="Меню" onclick={toggle_menu}>
                        <span></span>
                        <span></span>
                        <span></span>
                    </button>
                    <nav class={classes!("header__nav", (*menu_open).then(|| "mobile-menu-open"))} onclick={close_menu}>
                        <a href="#products">{"Потолки"}</a>
                        <a href="#calculator">{"Калькулятор"}</a>
                        <a href="#gallery">{"Работы"}</a>
                        <a href="#contacts">{"Контакты"}</a>
                    </nav>
                    <button class="btn btn--primary header__cta" onclick={opener(ModalTrigger::Callback)}>
                        {"Заказать звонок"}
                    </button>
                </div>
            </header>

            <section id="hero" class="hero">
                <div class="container hero__content">
                    <h1 class="hero__title">{"Натяжные потолки под ключ за 1 день"}</h1>
                    <p class="hero__subtitle">
                        {"Бесплатный замер, собственное производство полотен и гарантия 15 лет на монтаж."}
                    </p>
                    <div class="hero__actions">
                        <button class="btn btn--primary" onclick={to_calculator}>{"Рассчитать стоимость"}</button>
                        <button
                            class="btn btn--outline"
                            onclick={opener(ModalTrigger::Custom {
                                title: "Вызвать замерщика".to_string(),
                                description: "Приедем в удобное время, замер и консультация бесплатно".to_string(),
                            })}
                        >
                            {"Бесплатный замер"}
                        </button>
                    </div>
                </div>
            </section>

            <section id="products" class="section products">
                <div class="container">
                    <h2 class="section__title">{"Виды потолков"}</h2>
                    <div class="products__grid">
                        { for PRODUCTS.iter().map(|(name, text, price)| html! {
                            <article class="product-card">
                                <h3 class="product-card__title">{*name}</h3>
                                <p class="product-card__text">{*text}</p>
                                <span class="product-card__price">{*price}</span>
                            </article>
                        }) }
                    </div>
                </div>
            </section>

            <section id="calculator" class="section calculator-section">
                <div class="container">
                    <h2 class="section__title">{"Калькулятор стоимости"}</h2>
                    <Calculator telemetry={props.telemetry.clone()} {on_quote} {on_exact_quote} />
                </div>
            </section>

            <section id="gallery" class="section gallery">
                <div class="container">
                    <h2 class="section__title">{"Наши работы"}</h2>
                    <div class="gallery__grid">
                        { for GALLERY.iter().map(|(src, alt)| html! {
                            <figure class="gallery__item">
                                <img src={*src} alt={*alt} loading="lazy" />
                                <figcaption>{*alt}</figcaption>
                            </figure>
                        }) }
                    </div>
                </div>
            </section>

            <section class="section stats">
                <div class="container stats__grid">
                    { for STATS.iter().map(|(value, label)| html! {
                        <div class="stat">
                            <span class="stat__value">{*value}</span>
                            <span class="stat__label">{*label}</span>
                        </div>
                    }) }
                </div>
            </section>

            <section id="contacts" class="section contacts">
                <div class="container contacts__inner">
                    <div class="contacts__info">
                        <h2 class="section__title">{"Свяжитесь с нами"}</h2>
                        <p>{"Ответим на вопросы и подберём решение под ваш бюджет."}</p>
                        <a class="contacts__phone" href={format!("tel:{}", props.config.fallback_phone.replace(|c: char| !c.is_ascii_digit() && c != '+', ""))}>
                            {props.config.fallback_phone.clone()}
                        </a>
                    </div>
                    <ContactForm ctx={(*lead_ctx).clone()} />
                </div>
            </section>

            <footer class="footer">
                <div class="container footer__inner">
                    <span>{"© Потолки Про"}</span>
                    <Link<Route> to={Route::Privacy} classes="footer__link">
                        {"Политика конфиденциальности"}
                    </Link<Route>>
                </div>
            </footer>

            <Modal state={(*modal).clone()} ctx={(*lead_ctx).clone()} on_close={close_modal} />
        </div>
    }
}
