//! Unit - Explicit lifecycle contract for a piece of UI.
//!
//! A unit owns its state and maps props + state to lines of output. The
//! lifecycle hooks are plain trait methods invoked by [`Mounted`] under the
//! caller-owned [`Scheduler`] - there is no reflection and no hidden runtime.
//!
//! Hook order over a unit's life:
//!
//! ```text
//! init -> (first render) -> mounted
//!   then per external update:   derive -> gate -> before_apply -> apply -> applied
//!   then per handler dispatch:  fold mutations -> gate -> before_apply -> apply -> applied
//! unmounting -> (state discarded)
//! ```
//!
//! Data flows strictly top-down as props; intent flows bottom-up through
//! [`Callback`] values handed down as props.
//!
//! [`Mounted`]: super::mounted::Mounted
//! [`Scheduler`]: super::scheduler::Scheduler

use std::fmt;
use std::rc::Rc;

use crate::journal::EventKind;

use super::mounted::Updater;
use super::scheduler::{Scheduler, TaskHandle};

// =============================================================================
// UNIT TRAIT
// =============================================================================

/// The lifecycle contract.
///
/// `Props` are read-only values supplied by the owning unit; `State` is owned
/// by the unit and mutated only through queued transactions; `Snapshot` is a
/// display-only value captured just before an update is applied and handed to
/// [`Unit::applied`].
pub trait Unit: Sized {
    type Props: Clone + PartialEq + fmt::Debug;
    type State: Clone + PartialEq + fmt::Debug;
    type Snapshot: fmt::Debug + Default;

    /// Name used for journal entries.
    fn name() -> &'static str;

    /// Construct the initial state from the first props.
    fn init(&mut self, props: &Self::Props, cx: &mut Context<'_, Self>) -> Self::State;

    /// One-way prop -> state derivation, run before each render decision
    /// triggered by new props. Return `None` to leave state untouched.
    fn derive(&mut self, next_props: &Self::Props, state: &Self::State) -> Option<Self::State> {
        let _ = (next_props, state);
        None
    }

    /// Called once, after the first render has been applied.
    fn mounted(&mut self, state: &Self::State, cx: &mut Context<'_, Self>) {
        let _ = (state, cx);
    }

    /// Render gate. `next_*` is the candidate after all same-turn mutations
    /// have been folded; `applied_*` is what is currently on screen. Return
    /// `false` to skip the visible update (state still advances).
    fn should_apply(
        &self,
        next_props: &Self::Props,
        next_state: &Self::State,
        applied_props: &Self::Props,
        applied_state: &Self::State,
    ) -> bool {
        let _ = (next_props, next_state, applied_props, applied_state);
        true
    }

    /// Capture a snapshot of the outgoing values, immediately before the
    /// update is applied. Update-only; never called for the first render.
    fn before_apply(
        &mut self,
        prev_props: &Self::Props,
        prev_state: &Self::State,
    ) -> Self::Snapshot {
        let _ = (prev_props, prev_state);
        Self::Snapshot::default()
    }

    /// Called after an update was applied, with the snapshot from
    /// [`Unit::before_apply`]. The place for informational side effects and
    /// for synchronizing contained units.
    fn applied(
        &mut self,
        snapshot: Self::Snapshot,
        props: &Self::Props,
        state: &Self::State,
        cx: &mut Context<'_, Self>,
    ) {
        let _ = (snapshot, props, state, cx);
    }

    /// Teardown. Cancel pending scheduled tasks and unmount contained units
    /// here; the unit's state is discarded afterwards.
    fn unmounting(&mut self, cx: &mut Context<'_, Self>) {
        let _ = cx;
    }

    /// Containment traversal: flush deferred work in contained units.
    fn flush_children(&mut self, sched: &mut Scheduler) {
        let _ = sched;
    }

    /// Visual output. Only ever called with the *applied* props and state.
    fn view(&self, props: &Self::Props, state: &Self::State) -> Vec<String>;
}

// =============================================================================
// HANDLER CONTEXT
// =============================================================================

/// Handed to every hook and handler; the only way a unit touches the world.
pub struct Context<'a, U: Unit> {
    sched: &'a mut Scheduler,
    updater: Updater<U::State>,
}

impl<'a, U: Unit> Context<'a, U> {
    pub(crate) fn new(sched: &'a mut Scheduler, updater: Updater<U::State>) -> Self {
        Self { sched, updater }
    }

    /// Queue a state mutation. Mutations from the same synchronous turn are
    /// folded in invocation order and applied as one visible update, each
    /// computed from the state produced by the previous one.
    pub fn update(&mut self, f: impl FnOnce(U::State) -> U::State + 'static) {
        self.updater.push(f);
    }

    /// A cloneable handle to this unit's mutation queue, for callbacks and
    /// scheduled tasks that outlive the current borrow. Pushes after the unit
    /// unmounted are silent no-ops.
    pub fn updater(&self) -> Updater<U::State> {
        self.updater.clone()
    }

    /// Schedule a one-shot task `delay` ticks from now. The owning unit must
    /// keep the handle and cancel it in its teardown path.
    pub fn schedule(&mut self, delay: u64, run: impl FnOnce() + 'static) -> TaskHandle {
        let handle = self.sched.schedule(delay, run);
        self.sched.record(U::name(), EventKind::Scheduled { due: handle.due() });
        handle
    }

    /// Record a journal entry under this unit's name.
    pub fn record(&mut self, kind: EventKind) {
        self.sched.record(U::name(), kind);
    }

    /// The scheduler itself, for mounting and driving contained units.
    pub fn scheduler(&mut self) -> &mut Scheduler {
        self.sched
    }
}

// =============================================================================
// CALLBACK
// =============================================================================

/// Bottom-up intent channel: a cloneable closure handed down as a prop.
///
/// Equality is identity, so a stable callback does not make props look
/// changed on every render.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback")
    }
}

// =============================================================================
// TESTS
// =============================================================================
