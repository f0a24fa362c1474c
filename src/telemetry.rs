use std::fmt;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Function, Reflect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Goal {
    CalculatePrice,
    OpenModal,
    SubmitModalForm,
    SubmitContactForm,
}

impl Goal {
    pub fn as_str(self) -> &'static str {
        match self {
            Goal::CalculatePrice => "calculate_price",
            Goal::OpenModal => "open_modal",
            Goal::SubmitModalForm => "submit_modal_form",
            Goal::SubmitContactForm => "submit_contact_form",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fire-and-forget sink for analytics goals. Implementations must never
/// fail the caller.
pub trait Telemetry {
    fn record_event(&self, goal: Goal);
}

pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    fn record_event(&self, _goal: Goal) {}
}

// `ym` is looked up per call, the counter snippet loads async
pub struct Metrika {
    counter_id: u32,
}

impl Metrika {
    pub fn new(counter_id: u32) -> Self {
        Self { counter_id }
    }

    fn reach_goal(&self, goal: Goal) -> Option<()> {
        let window = web_sys::window()?;
        let ym = Reflect::get(&window, &JsValue::from_str("ym"))
            .ok()?
            .dyn_into::<Function>()
            .ok()?;
        let args = Array::of3(
            &JsValue::from(self.counter_id),
            &JsValue::from_str("reachGoal"),
            &JsValue::from_str(goal.as_str()),
        );
        ym.apply(&JsValue::NULL, &args).ok()?;
        Some(())
    }
}

impl Telemetry for Metrika {
    fn record_event(&self, goal: Goal) {
        if self.reach_goal(goal).is_none() {
            debug!("Metrika unavailable, goal {} dropped", goal);
        }
    }
}

#[derive(Clone)]
pub struct TelemetryHandle(Rc<dyn Telemetry>);

impl TelemetryHandle {
    pub fn new(sink: impl Telemetry + 'static) -> Self {
        Self(Rc::new(sink))
    }

    pub fn for_counter(counter_id: Option<u32>) -> Self {
        match counter_id {
            Some(id) => Self::new(Metrika::new(id)),
            None => Self::new(NoopTelemetry),
        }
    }

    pub fn record(&self, goal: Goal) {
        self.0.record_event(goal);
    }
}

impl PartialEq for TelemetryHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::as_ptr(&self.0) as *const () == Rc::as_ptr(&other.0) as *const ()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{Goal, Telemetry};

    #[derive(Clone, Default)]
    pub struct RecordingTelemetry {
        pub goals: Rc<RefCell<Vec<Goal>>>,
    }

    impl Telemetry for RecordingTelemetry {
        fn record_event(&self, goal: Goal) {
            self.goals.borrow_mut().push(goal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingTelemetry;
    use super::*;

    #[test]
    fn goal_names_match_counter_setup() {
        let names: Vec<_> = [
            Goal::CalculatePrice,
            Goal::OpenModal,
            Goal::SubmitModalForm,
            Goal::SubmitContactForm,
        ]
        .iter()
        .map(|g| g.to_string())
        .collect();
        assert_eq!(
            names,
            ["calculate_price", "open_modal", "submit_modal_form", "submit_contact_form"]
        );
    }

    #[test]
    fn handle_forwards_to_sink() {
        let sink = RecordingTelemetry::default();
        let handle = TelemetryHandle::new(sink.clone());
        handle.record(Goal::OpenModal);
        handle.record(Goal::CalculatePrice);
        assert_eq!(*sink.goals.borrow(), vec![Goal::OpenModal, Goal::CalculatePrice]);
    }

    #[test]
    fn handles_compare_by_sink_identity() {
        let a = TelemetryHandle::new(NoopTelemetry);
        let b = TelemetryHandle::new(NoopTelemetry);
        assert!(a == a.clone());
        assert!(a != b);
    }

    #[test]
    fn noop_sink_swallows_goals() {
        TelemetryHandle::for_counter(None).record(Goal::SubmitContactForm);
    }
}
