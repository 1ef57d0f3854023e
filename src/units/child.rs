//! Child unit - local input state plus a derived read-only value.
//!
//! Receives a numeric value (the parent's counter doubled) and a reset
//! callback as props. Never writes parent state directly; intent travels
//! only through the supplied callback.

use crate::journal::EventKind;
use crate::render::frame;
use crate::runtime::{Callback, Context, Unit};

/// Read-only inputs from the parent. Recomputed each parent render, never
/// cached. Equality on the callback is identity, so a stable callback does
/// not count as a prop change.
#[derive(Clone, Debug, PartialEq)]
pub struct ChildProps {
    pub value: i64,
    pub on_reset: Callback,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChildState {
    pub input_text: String,
    pub active: bool,
}

#[derive(Default)]
pub struct ChildUnit;

impl ChildUnit {
    /// Set the input text verbatim; no validation.
    pub fn input_change(&mut self, text: String, cx: &mut Context<'_, Self>) {
        cx.update(move |s| ChildState { input_text: text, active: s.active });
    }

    pub fn push_char(&mut self, c: char, cx: &mut Context<'_, Self>) {
        cx.update(move |s| ChildState {
            input_text: format!("{}{}", s.input_text, c),
            active: s.active,
        });
    }

    pub fn backspace(&mut self, cx: &mut Context<'_, Self>) {
        cx.update(|s| {
            let mut input_text = s.input_text;
            input_text.pop();
            ChildState { input_text, active: s.active }
        });
    }

    pub fn toggle(&mut self, cx: &mut Context<'_, Self>) {
        cx.update(|s| ChildState { input_text: s.input_text, active: !s.active });
    }

    /// Ask the parent to reset its counter. Child state is untouched.
    pub fn reset_click(&mut self, props: &ChildProps) {
        props.on_reset.call();
    }
}

impl Unit for ChildUnit {
    type Props = ChildProps;
    type State = ChildState;
    /// The derived value of the previous render.
    type Snapshot = i64;

    fn name() -> &'static str {
        "child"
    }

    fn init(&mut self, _props: &ChildProps, _cx: &mut Context<'_, Self>) -> ChildState {
        ChildState::default()
    }

    fn before_apply(&mut self, prev_props: &ChildProps, _prev_state: &ChildState) -> i64 {
        prev_props.value
    }

    fn applied(
        &mut self,
        snapshot: i64,
        props: &ChildProps,
        _state: &ChildState,
        cx: &mut Context<'_, Self>,
    ) {
        // Informational only: the derived input moved across renders.
        if snapshot != props.value {
            cx.record(EventKind::ValueChanged {
                prev: snapshot.to_string(),
                next: props.value.to_string(),
            });
        }
    }

    fn view(&self, props: &ChildProps, state: &ChildState) -> Vec<String> {
        frame(
            "child",
            &[
                format!("value from parent: {}", props.value),
                format!("active: {}", if state.active { "yes" } else { "no" }),
                format!("input: {}", state.input_text),
                "[s] toggle active  [z] reset parent  [Tab] edit input".to_string(),
            ],
        )
    }
}
