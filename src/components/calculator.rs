use log::info;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::pricing::{
    self, CalculatorFields, CalculatorView, CeilingType, LightingOption, QuoteSnapshot, ResultPanel,
    COMPLEXITY_LEVELS,
};
use crate::telemetry::{Goal, TelemetryHandle};

#[derive(Properties, PartialEq)]
pub struct CalculatorProps {
    pub telemetry: TelemetryHandle,
    pub on_quote: Callback<QuoteSnapshot>,
    pub on_exact_quote: Callback<()>,
}

// Failed validation leaves the summary alone and records nothing.
pub fn run_calculation(
    fields: &CalculatorFields,
    view: &mut CalculatorView,
    telemetry: &TelemetryHandle,
) -> Option<QuoteSnapshot> {
    let outcome = pricing::quote(fields);
    let snapshot = outcome.as_ref().ok().map(|quote| {
        info!("Calculated {} for {} m²", quote.total, fields.area.trim());
        telemetry.record(Goal::CalculatePrice);
        quote.snapshot(&fields.area)
    });
    view.apply(outcome);
    snapshot
}

#[function_component(Calculator)]
pub fn calculator(props: &CalculatorProps) -> Html {
    let fields = use_state(CalculatorFields::default);
    let view = use_state(CalculatorView::default);

    let calculate = {
        let fields = fields.clone();
        let view = view.clone();
        let telemetry = props.telemetry.clone();
        let on_quote = props.on_quote.clone();
        Callback::from(move |_: ()| {
            let mut next = (*view).clone();
            if let Some(snapshot) = run_calculation(&fields, &mut next, &telemetry) {
                on_quote.emit(snapshot);
            }
            view.set(next);
        })
    };

    let on_area = {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            fields.set(CalculatorFields {
                area: input.value(),
                ..(*fields).clone()
            });
        })
    };

    let on_area_key = {
        let calculate = calculate.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                calculate.emit(());
            }
        })
    };

    let select_field = |apply: fn(&mut CalculatorFields, String)| {
        let fields = fields.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*fields).clone();
            apply(&mut next, select.value());
            fields.set(next);
        })
    };

    let on_quantity = {
        let fields = fields.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            fields.set(CalculatorFields {
                quantity: input.value(),
                ..(*fields).clone()
            });
        })
    };

    let on_calculate = {
        let calculate = calculate.clone();
        Callback::from(move |_: MouseEvent| calculate.emit(()))
    };

    let on_exact = {
        let on_exact_quote = props.on_exact_quote.clone();
        Callback::from(move |_: MouseEvent| on_exact_quote.emit(()))
    };

    let (display_type, display_total) = match &view.display {
        Some(quote) => (quote.display_type.clone(), quote.formatted_total()),
        None => ("—".to_string(), pricing::format_rubles(0)),
    };

    html! {
        <div class="calculator">
            <div class="calculator__form">
                <div class="form__group">
                    <label for="area">{"Площадь помещения, м²"}</label>
                    <input
                        type="number"
                        id="area"
                        class="form__input"
                        min="1"
                        step="0.1"
                        placeholder="Например, 18"
                        value={fields.area.clone()}
                        oninput={on_area}
                        onkeypress={on_area_key}
                    />
                </div>
                <div class="form__group">
                    <label for="type">{"Тип потолка"}</label>
                    <select id="type" class="form__input" onchange={select_field(|f, v| f.ceiling_type = v)}>
                        <option value="" selected={fields.ceiling_type.is_empty()}>{"Выберите тип"}</option>
                        { for CeilingType::ALL.iter().map(|t| html! {
                            <option value={t.value()} selected={fields.ceiling_type == t.value()}>
                                {format!("{} — {} ₽/м²", t.label(), t.rate())}
                            </option>
                        }) }
                    </select>
                </div>
                <div class="form__group">
                    <label for="complexity">{"Сложность монтажа"}</label>
                    <select id="complexity" class="form__input" onchange={select_field(|f, v| f.complexity = v)}>
                        { for COMPLEXITY_LEVELS.iter().map(|(percent, label)| {
                            let value = percent.to_string();
                            let selected = fields.complexity == value
                                || (fields.complexity.is_empty() && *percent == 0);
                            html! {
                                <option {value} {selected}>
                                    { if *percent > 0 { format!("{} (+{}%)", label, percent) } else { label.to_string() } }
                                </option>
                            }
                        }) }
                    </select>
                </div>
                <div class="form__group">
                    <label for="lighting">{"Освещение"}</label>
                    <select id="lighting" class="form__input" onchange={select_field(|f, v| f.lighting = v)}>
                        { for LightingOption::ALL.iter().map(|o| html! {
                            <option value={o.value()} selected={LightingOption::from_value(&fields.lighting) == *o}>
                                {o.label()}
                            </option>
                        }) }
                    </select>
                </div>
                <div
                    id="quantity-group"
                    class="form__group"
                    style={if fields.wants_quantity() { "display: block;" } else { "display: none;" }}
                >
                    <label for="quantity">{"Количество светильников"}</label>
                    <input
                        type="number"
                        id="quantity"
                        class="form__input"
                        min="1"
                        placeholder="1"
                        value={fields.quantity.clone()}
                        oninput={on_quantity}
                    />
                </div>
                <button type="button" class="btn btn--primary btn--full" onclick={on_calculate}>
                    {"Рассчитать"}
                </button>
            </div>
            <div class="calculator__summary">
                <div class="calculator__line">
                    <span>{"Тип:"}</span>
                    <span id="display-type">{display_type}</span>
                </div>
                <div class="calculator__line">
                    <span>{"Итого:"}</span>
                    <span id="display-total">{display_total}</span>
                </div>
                <div id="result" class="calculator__result">
                    { render_panel(&view.panel) }
                </div>
                <button type="button" class="btn btn--outline btn--full" onclick={on_exact}>
                    {"Заказать точный расчет"}
                </button>
            </div>
        </div>
    }
}

fn render_panel(panel: &ResultPanel) -> Html {
    match panel {
        ResultPanel::Empty => html! {
            <p class="calculator__hint">{"Заполните параметры и нажмите «Рассчитать»"}</p>
        },
        ResultPanel::Invalid(err) => html! {
            <p style="color: #EF4444; font-weight: 600;">{err.to_string()}</p>
        },
        ResultPanel::Priced(total) => html! {
            <div style="text-align: center;">
                <p style="color: var(--muted-foreground); margin-bottom: 8px;">{"Стоимость потолка:"}</p>
                <p style="font-size: 2rem; font-weight: 700; color: var(--primary); margin-bottom: 4px;">
                    {total.clone()}
                </p>
                <p style="font-size: 0.875rem; color: var(--muted-foreground);">
                    {"*Точная стоимость рассчитывается после замера"}
                </p>
            </div>
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::QuoteError;
    use crate::telemetry::testing::RecordingTelemetry;

    fn fields(area: &str, ceiling_type: &str) -> CalculatorFields {
        CalculatorFields {
            area: area.to_string(),
            ceiling_type: ceiling_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn success_records_goal_and_returns_snapshot() {
        let sink = RecordingTelemetry::default();
        let telemetry = TelemetryHandle::new(sink.clone());
        let mut view = CalculatorView::default();

        let snapshot = run_calculation(&fields("10", "matte"), &mut view, &telemetry);

        assert_eq!(
            snapshot,
            Some(QuoteSnapshot {
                area: "10".to_string(),
                ceiling_type: "Матовый".to_string(),
                total: "4\u{a0}500 ₽".to_string(),
            })
        );
        assert_eq!(*sink.goals.borrow(), vec![Goal::CalculatePrice]);
        assert_eq!(view.panel, ResultPanel::Priced("4\u{a0}500 ₽".to_string()));
    }

    #[test]
    fn failed_validation_records_nothing() {
        let sink = RecordingTelemetry::default();
        let telemetry = TelemetryHandle::new(sink.clone());
        let mut view = CalculatorView::default();

        assert_eq!(run_calculation(&fields("", "matte"), &mut view, &telemetry), None);
        assert_eq!(view.panel, ResultPanel::Invalid(QuoteError::MissingArea));

        assert_eq!(run_calculation(&fields("12", ""), &mut view, &telemetry), None);
        assert_eq!(view.panel, ResultPanel::Invalid(QuoteError::MissingCeilingType));

        assert!(sink.goals.borrow().is_empty());
        assert_eq!(view.display, None);
    }

    #[test]
    fn each_successful_run_records_once() {
        let sink = RecordingTelemetry::default();
        let telemetry = TelemetryHandle::new(sink.clone());
        let mut view = CalculatorView::default();

        run_calculation(&fields("10", "glossy"), &mut view, &telemetry);
        run_calculation(&fields("0", "glossy"), &mut view, &telemetry);
        run_calculation(&fields("20", "satin"), &mut view, &telemetry);

        assert_eq!(*sink.goals.borrow(), vec![Goal::CalculatePrice, Goal::CalculatePrice]);
    }
}
