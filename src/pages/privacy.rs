use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::SiteConfig;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct PrivacyPolicyProps {
    pub config: SiteConfig,
}

#[function_component(PrivacyPolicy)]
pub fn privacy_policy(props: &PrivacyPolicyProps) -> Html {
    html! {
        <div class="legal-content privacy-policy">
            <h1>{"Политика конфиденциальности"}</h1>

            <section>
                <h2>{"1. Какие данные мы получаем"}</h2>
                <p>{"Оставляя заявку на сайте, вы передаёте нам:"}</p>
                <ul>
                    <li>{"имя и номер телефона — чтобы перезвонить вам"}</li>
                    <li>{"email и текст сообщения, если вы их указали"}</li>
                    <li>{"параметры расчёта из калькулятора, если заявка оформлена после расчёта"}</li>
                    <li>{"адрес страницы и время отправки заявки"}</li>
                </ul>
            </section>

            <section>
                <h2>{"2. Как мы их используем"}</h2>
                <ul>
                    <li>{"для связи по вашей заявке и согласования замера"}</li>
                    <li>{"для подготовки сметы"}</li>
                </ul>
                <p>{"Данные не передаются третьим лицам и не используются для рассылок."}</p>
            </section>

            <section>
                <h2>{"3. Веб-аналитика"}</h2>
                <p>{"Сайт использует Яндекс.Метрику, чтобы считать обезличенные события: расчёт стоимости, открытие формы и отправку заявки."}</p>
            </section>

            <section>
                <h2>{"4. Ваши права"}</h2>
                <p>{"Вы можете попросить уточнить, изменить или удалить ваши данные, позвонив нам."}</p>
                <p>{format!("Телефон: {}", props.config.fallback_phone)}</p>
            </section>

            <div class="legal-links">
                <Link<Route> to={Route::Home}>{"Вернуться на главную"}</Link<Route>>
            </div>
        </div>
    }
}
