//! Parent unit - counter and message, child synchronization.
//!
//! The counter is seeded from the root-supplied init value and re-derived
//! from it on every external update where the two diverge (one-way sync,
//! root to parent, with local overrides surviving until the next divergent
//! prop). The message is overwritten once, one tick after mount, by a
//! cancellable scheduled task.

use crate::journal::EventKind;
use crate::render::frame;
use crate::runtime::{Callback, Context, Mounted, Scheduler, TaskHandle, Unit};

use super::child::{ChildProps, ChildUnit};

/// Message the parent starts with.
pub const INITIAL_MESSAGE: &str = "initial message";
/// Message applied by the one-shot post-mount task.
pub const MOUNTED_MESSAGE: &str = "updated after mount";
/// Delay of the post-mount message task, in scheduler ticks.
pub const MESSAGE_DELAY: u64 = 1;

#[derive(Clone, Debug, PartialEq)]
pub struct ParentProps {
    pub init_value: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParentState {
    pub counter: i64,
    pub message: String,
}

#[derive(Default)]
pub struct ParentUnit {
    pub child: Option<Mounted<ChildUnit>>,
    on_reset: Option<Callback>,
    pending_message: Option<TaskHandle>,
}

impl ParentUnit {
    /// Two sequential increments, each a function of the prior state, so the
    /// coalesced update always lands on +2.
    pub fn increment(&mut self, cx: &mut Context<'_, Self>) {
        cx.update(|s| ParentState { counter: s.counter + 1, message: s.message });
        cx.update(|s| ParentState { counter: s.counter + 1, message: s.message });
    }

    /// The pending post-mount message task, if any (test hook).
    pub fn pending_message(&self) -> Option<&TaskHandle> {
        self.pending_message.as_ref()
    }

    fn child_props(&self, counter: i64) -> Option<ChildProps> {
        // Derived input: always exactly twice the counter, recomputed per render.
        self.on_reset
            .clone()
            .map(|on_reset| ChildProps { value: counter * 2, on_reset })
    }
}

impl Unit for ParentUnit {
    type Props = ParentProps;
    type State = ParentState;
    /// Display-only summary of the counter before an update was applied.
    type Snapshot = String;

    fn name() -> &'static str {
        "parent"
    }

    fn init(&mut self, props: &ParentProps, cx: &mut Context<'_, Self>) -> ParentState {
        // The reset callback is created once so its identity stays stable
        // across renders.
        let updater = cx.updater();
        self.on_reset = Some(Callback::new(move || {
            updater.push(|s| ParentState { counter: 0, message: s.message });
        }));
        ParentState { counter: props.init_value, message: INITIAL_MESSAGE.to_string() }
    }

    fn derive(&mut self, next_props: &ParentProps, state: &ParentState) -> Option<ParentState> {
        (next_props.init_value != state.counter).then(|| ParentState {
            counter: next_props.init_value,
            message: state.message.clone(),
        })
    }

    fn mounted(&mut self, state: &ParentState, cx: &mut Context<'_, Self>) {
        let updater = cx.updater();
        let handle = cx.schedule(MESSAGE_DELAY, move || {
            updater.push(|s| ParentState {
                counter: s.counter,
                message: MOUNTED_MESSAGE.to_string(),
            });
        });
        self.pending_message = Some(handle);

        if let Some(props) = self.child_props(state.counter) {
            self.child = Some(Mounted::mount(ChildUnit::default(), props, cx.scheduler()));
        }
    }

    fn should_apply(
        &self,
        _next_props: &ParentProps,
        next_state: &ParentState,
        _applied_props: &ParentProps,
        applied_state: &ParentState,
    ) -> bool {
        next_state.counter != applied_state.counter || next_state.message != applied_state.message
    }

    fn before_apply(&mut self, _prev_props: &ParentProps, prev_state: &ParentState) -> String {
        format!("old counter={}", prev_state.counter)
    }

    fn applied(
        &mut self,
        snapshot: String,
        _props: &ParentProps,
        state: &ParentState,
        cx: &mut Context<'_, Self>,
    ) {
        cx.record(EventKind::Snapshot { detail: snapshot });
        if let Some(props) = self.child_props(state.counter)
            && let Some(child) = self.child.as_mut()
        {
            child.update_props(props, cx.scheduler());
        }
    }

    fn unmounting(&mut self, cx: &mut Context<'_, Self>) {
        if let Some(handle) = self.pending_message.take()
            && !handle.is_complete()
        {
            handle.cancel();
            cx.record(EventKind::Cancelled);
        }
        if let Some(child) = self.child.take() {
            child.unmount(cx.scheduler());
        }
    }

    fn flush_children(&mut self, sched: &mut Scheduler) {
        if let Some(child) = self.child.as_mut() {
            child.flush_pending(sched);
        }
    }

    fn view(&self, _props: &ParentProps, state: &ParentState) -> Vec<String> {
        let mut lines = frame(
            "parent",
            &[
                format!("counter: {}", state.counter),
                format!("message: {}", state.message),
                "[i] increment counter by 2".to_string(),
            ],
        );
        if let Some(child) = &self.child {
            lines.extend(child.lines().into_iter().map(|l| format!("  {l}")));
        }
        lines
    }
}
