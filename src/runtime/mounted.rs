//! Mounted - A live unit instance and its update transaction queue.
//!
//! `Mounted<U>` owns everything a running unit needs: the unit value itself,
//! its current props and state, and the *applied* props and state (what is
//! currently on screen). All mutation goes through the [`Updater`] queue and
//! is applied by `flush` as a single coalesced update.
//!
//! Update pipeline per external props change:
//!
//! ```text
//! derive -> gate (should_apply) -> before_apply -> apply -> applied
//! ```
//!
//! and per handler dispatch:
//!
//! ```text
//! fold queued mutations in order -> gate -> before_apply -> apply -> applied
//! ```
//!
//! The gate is display-only: when it rejects, state still advances and only
//! the applied values (and therefore the view) stay put.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::journal::EventKind;

use super::scheduler::Scheduler;
use super::unit::{Context, Unit};

// =============================================================================
// UPDATER
// =============================================================================

type Mutation<S> = Box<dyn FnOnce(S) -> S>;

/// Handle to a unit's mutation queue.
///
/// Mutations are collected in invocation order and folded over the current
/// state at flush time, so two same-turn increments always count twice.
/// Clones share the queue; once the unit unmounts, pushes become silent
/// no-ops (a scheduled task firing after teardown must not mutate anything).
pub struct Updater<S> {
    queue: Rc<RefCell<Vec<Mutation<S>>>>,
    alive: Rc<Cell<bool>>,
}

impl<S> Clone for Updater<S> {
    fn clone(&self) -> Self {
        Self { queue: self.queue.clone(), alive: self.alive.clone() }
    }
}

impl<S> Updater<S> {
    fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(Vec::new())),
            alive: Rc::new(Cell::new(true)),
        }
    }

    /// Queue a mutation. No-op after the unit unmounted.
    pub fn push(&self, f: impl FnOnce(S) -> S + 'static) {
        if !self.alive.get() {
            return;
        }
        self.queue.borrow_mut().push(Box::new(f));
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    fn take(&self) -> Vec<Mutation<S>> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }

    fn kill(&self) {
        self.alive.set(false);
        self.queue.borrow_mut().clear();
    }
}

// =============================================================================
// MOUNTED INSTANCE
// =============================================================================

/// A mounted unit: the unit value, its props/state, and the applied values.
pub struct Mounted<U: Unit> {
    unit: U,
    props: U::Props,
    state: U::State,
    applied_props: U::Props,
    applied_state: U::State,
    updater: Updater<U::State>,
}

impl<U: Unit> Mounted<U> {
    /// Construct and mount a unit: init from props, apply the first render,
    /// then run the `mounted` hook (which may queue updates, schedule tasks,
    /// and mount contained units).
    pub fn mount(mut unit: U, props: U::Props, sched: &mut Scheduler) -> Self {
        sched.record(U::name(), EventKind::Created);

        let updater = Updater::new();
        let state = {
            let mut cx = Context::new(sched, updater.clone());
            unit.init(&props, &mut cx)
        };

        let mut mounted = Self {
            unit,
            applied_props: props.clone(),
            applied_state: state.clone(),
            props,
            state,
            updater,
        };
        sched.record(U::name(), EventKind::Mounted);

        {
            let updater = mounted.updater.clone();
            let mut cx = Context::new(sched, updater);
            let Self { unit, state, .. } = &mut mounted;
            unit.mounted(state, &mut cx);
        }
        if mounted.updater.has_pending() {
            mounted.flush(sched);
        }
        mounted
    }

    /// Run an event handler against the unit, then flush whatever it queued.
    /// Props are read-only inside handlers.
    pub fn dispatch(
        &mut self,
        sched: &mut Scheduler,
        f: impl FnOnce(&mut U, &U::Props, &mut Context<'_, U>),
    ) {
        {
            let updater = self.updater.clone();
            let mut cx = Context::new(sched, updater);
            f(&mut self.unit, &self.props, &mut cx);
        }
        self.flush(sched);
    }

    /// Fold all queued mutations, in order, over the current state and run
    /// the render decision once on the result.
    pub fn flush(&mut self, sched: &mut Scheduler) {
        let mutations = self.updater.take();
        if mutations.is_empty() {
            return;
        }
        let mut next = self.state.clone();
        for mutation in mutations {
            next = mutation(next);
        }
        self.state = next;
        self.commit(sched);
    }

    /// Supply new props from the owning unit. Runs `derive` first (even when
    /// the props value is unchanged, since local state may have drifted from
    /// it), then the render decision when anything actually moved.
    pub fn update_props(&mut self, next: U::Props, sched: &mut Scheduler) {
        let props_changed = next != self.props;
        if let Some(derived) = self.unit.derive(&next, &self.state) {
            sched.record(
                U::name(),
                EventKind::Derived {
                    prev: format!("{:?}", self.state),
                    next: format!("{derived:?}"),
                },
            );
            self.state = derived;
            self.props = next;
            self.commit(sched);
        } else if props_changed {
            self.props = next;
            self.commit(sched);
        }
    }

    /// Flush deferred mutations (pushed by callbacks or scheduled tasks
    /// outside a dispatch), then recurse into contained units.
    pub fn flush_pending(&mut self, sched: &mut Scheduler) {
        if self.updater.has_pending() {
            self.flush(sched);
        }
        self.unit.flush_children(sched);
    }

    fn commit(&mut self, sched: &mut Scheduler) {
        if !self
            .unit
            .should_apply(&self.props, &self.state, &self.applied_props, &self.applied_state)
        {
            sched.record(
                U::name(),
                EventKind::Skipped { pending: format!("{:?}", self.state) },
            );
            return;
        }

        let snapshot = self.unit.before_apply(&self.applied_props, &self.applied_state);
        sched.record(
            U::name(),
            EventKind::Applied {
                prev: format!("{:?}", self.applied_state),
                next: format!("{:?}", self.state),
            },
        );
        self.applied_props = self.props.clone();
        self.applied_state = self.state.clone();

        {
            let updater = self.updater.clone();
            let mut cx = Context::new(sched, updater);
            let Self { unit, props, state, .. } = &mut *self;
            unit.applied(snapshot, props, state, &mut cx);
        }
        // The applied hook may have queued follow-up mutations.
        if self.updater.has_pending() {
            self.flush(sched);
        }
    }

    /// Tear the unit down. State is discarded and late mutation pushes from
    /// surviving callbacks or tasks become silent no-ops.
    pub fn unmount(mut self, sched: &mut Scheduler) {
        {
            let updater = self.updater.clone();
            let mut cx = Context::new(sched, updater);
            self.unit.unmounting(&mut cx);
        }
        self.updater.kill();
        sched.record(U::name(), EventKind::Unmounted);
    }

    /// Visual output, always from the applied values.
    pub fn lines(&self) -> Vec<String> {
        self.unit.view(&self.applied_props, &self.applied_state)
    }

    pub fn state(&self) -> &U::State {
        &self.state
    }

    pub fn applied_state(&self) -> &U::State {
        &self.applied_state
    }

    pub fn props(&self) -> &U::Props {
        &self.props
    }

    pub fn applied_props(&self) -> &U::Props {
        &self.applied_props
    }

    pub fn unit(&self) -> &U {
        &self.unit
    }

    pub fn unit_mut(&mut self) -> &mut U {
        &mut self.unit
    }

    /// A cloneable handle to this unit's mutation queue.
    pub fn updater(&self) -> Updater<U::State> {
        self.updater.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
