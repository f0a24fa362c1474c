use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use crate::phone;

#[derive(Properties, PartialEq)]
pub struct PhoneInputProps {
    pub id: AttrValue,
    pub value: String,
    pub on_change: Callback<String>,
}

#[function_component(PhoneInput)]
pub fn phone_input(props: &PhoneInputProps) -> Html {
    let oninput = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let formatted = phone::format_phone(&input.value());
            input.set_value(&formatted);
            on_change.emit(formatted);
        })
    };

    let onfocus = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: FocusEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(value) = phone::on_focus(&input.value()) {
                input.set_value(&value);
                on_change.emit(value);
            }
        })
    };

    let onkeydown = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() != "Backspace" {
                return;
            }
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Some(value) = phone::on_backspace(&input.value()) {
                e.prevent_default();
                input.set_value(&value);
                on_change.emit(value);
            }
        })
    };

    html! {
        <input
            type="tel"
            id={props.id.clone()}
            name={props.id.clone()}
            class="form__input"
            placeholder="+7 (___) ___-__-__"
            autocomplete="tel"
            required=true
            value={props.value.clone()}
            {oninput}
            {onfocus}
            {onkeydown}
        />
    }
}
