//! Root unit - visibility toggle and init value.
//!
//! Owns the parent subtree. Toggling visibility off is a full teardown (the
//! parent and child state is discarded, not hidden); toggling back on mounts
//! a fresh parent seeded from the current init value.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::render::frame;
use crate::runtime::{Context, Mounted, Scheduler, Unit};

use super::parent::{ParentProps, ParentUnit};

#[derive(Clone, Debug, PartialEq)]
pub struct RootState {
    pub visible: bool,
    pub init_value: i64,
}

pub struct RootUnit {
    pub parent: Option<Mounted<ParentUnit>>,
    rng: StdRng,
}

impl RootUnit {
    pub fn new(rng: StdRng) -> Self {
        Self { parent: None, rng }
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn toggle_visible(&mut self, cx: &mut Context<'_, Self>) {
        cx.update(|s| RootState { visible: !s.visible, init_value: s.init_value });
    }

    /// Set the init value to a uniform random integer in [0, 10).
    pub fn randomize(&mut self, cx: &mut Context<'_, Self>) {
        let value = self.rng.gen_range(0..10i64);
        cx.update(move |s| RootState { visible: s.visible, init_value: value });
    }

    /// Bring the parent subtree in line with the applied root state:
    /// mount fresh, feed new props, or tear down.
    fn reconcile(&mut self, state: &RootState, sched: &mut Scheduler) {
        match (state.visible, self.parent.take()) {
            (true, None) => {
                self.parent = Some(Mounted::mount(
                    ParentUnit::default(),
                    ParentProps { init_value: state.init_value },
                    sched,
                ));
            }
            (true, Some(mut parent)) => {
                parent.update_props(ParentProps { init_value: state.init_value }, sched);
                self.parent = Some(parent);
            }
            (false, Some(parent)) => parent.unmount(sched),
            (false, None) => {}
        }
    }
}

impl Unit for RootUnit {
    type Props = ();
    type State = RootState;
    type Snapshot = ();

    fn name() -> &'static str {
        "root"
    }

    fn init(&mut self, _props: &(), _cx: &mut Context<'_, Self>) -> RootState {
        RootState { visible: true, init_value: 0 }
    }

    fn mounted(&mut self, state: &RootState, cx: &mut Context<'_, Self>) {
        self.reconcile(state, cx.scheduler());
    }

    fn applied(
        &mut self,
        _snapshot: (),
        _props: &(),
        state: &RootState,
        cx: &mut Context<'_, Self>,
    ) {
        self.reconcile(state, cx.scheduler());
    }

    fn unmounting(&mut self, cx: &mut Context<'_, Self>) {
        if let Some(parent) = self.parent.take() {
            parent.unmount(cx.scheduler());
        }
    }

    fn flush_children(&mut self, sched: &mut Scheduler) {
        if let Some(parent) = self.parent.as_mut() {
            parent.flush_pending(sched);
        }
    }

    fn view(&self, _props: &(), state: &RootState) -> Vec<String> {
        let mut lines = frame(
            "root",
            &[
                format!("tree visible: {}", if state.visible { "yes" } else { "no" }),
                format!("init value: {}", state.init_value),
                "[t] toggle tree  [r] randomize init  [q] quit".to_string(),
            ],
        );
        match &self.parent {
            Some(parent) => lines.extend(parent.lines().into_iter().map(|l| format!("  {l}"))),
            None => lines.push("  (tree unmounted)".to_string()),
        }
        lines
    }
}
