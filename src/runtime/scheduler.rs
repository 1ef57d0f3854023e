//! Scheduler - Caller-owned logical clock and task queue.
//!
//! Unlike a framework runtime, the scheduler here is an ordinary value owned
//! by the application. Time is a logical tick counter advanced explicitly by
//! the caller; delayed work is a queue of cancellable one-shot tasks fired by
//! `advance`. The scheduler also carries the journal handle so every unit
//! records through a single ordered stream.
//!
//! # Example
//!
//! ```ignore
//! let mut sched = Scheduler::new();
//! let handle = sched.schedule(1, || println!("fired"));
//! sched.advance(1); // fires, unless handle.cancel() ran first
//! ```

use std::cell::Cell;
use std::rc::Rc;

use crate::journal::{EventKind, Journal};

// =============================================================================
// TASK HANDLE
// =============================================================================

/// Cancellation handle for a scheduled task.
///
/// Clones share the same flags. A cancelled task is dropped unrun when its
/// tick comes due; cancelling after the task fired is a no-op.
#[derive(Clone, Debug)]
pub struct TaskHandle {
    due: u64,
    cancelled: Rc<Cell<bool>>,
    fired: Rc<Cell<bool>>,
}

impl TaskHandle {
    fn new(due: u64) -> Self {
        Self { due, cancelled: Rc::default(), fired: Rc::default() }
    }

    /// The tick the task is set to fire at.
    pub fn due(&self) -> u64 {
        self.due
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Whether the task already ran.
    pub fn is_complete(&self) -> bool {
        self.fired.get()
    }

    fn mark_fired(&self) {
        self.fired.set(true);
    }
}

struct ScheduledTask {
    due: u64,
    handle: TaskHandle,
    run: Box<dyn FnOnce()>,
}

// =============================================================================
// SCHEDULER
// =============================================================================

/// Logical clock plus pending task queue plus journal.
pub struct Scheduler {
    now: u64,
    tasks: Vec<ScheduledTask>,
    journal: Journal,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self::with_journal(Journal::new())
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self { now: 0, tasks: Vec::new(), journal }
    }

    /// Current logical tick.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Journal handle (cheap clone, shared stream).
    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// Record a journal entry at the current tick.
    pub fn record(&self, unit: &'static str, kind: EventKind) {
        self.journal.record(self.now, unit, kind);
    }

    /// Schedule a one-shot task to run `delay` ticks from now.
    ///
    /// Returns a handle the owning unit must keep if it may tear down before
    /// the task fires.
    pub fn schedule(&mut self, delay: u64, run: impl FnOnce() + 'static) -> TaskHandle {
        let handle = TaskHandle::new(self.now + delay);
        self.tasks.push(ScheduledTask {
            due: handle.due(),
            handle: handle.clone(),
            run: Box::new(run),
        });
        handle
    }

    /// Number of live (not yet fired, not cancelled) tasks.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.iter().filter(|t| !t.handle.is_cancelled()).count()
    }

    /// Advance the clock by `ticks`, firing due tasks.
    ///
    /// Tasks fire in due order, then insertion order within a tick.
    /// Cancelled tasks are dropped silently.
    pub fn advance(&mut self, ticks: u64) {
        self.now += ticks;
        let now = self.now;

        let mut due: Vec<ScheduledTask> = Vec::new();
        let mut remaining: Vec<ScheduledTask> = Vec::new();
        for task in self.tasks.drain(..) {
            if task.handle.is_cancelled() {
                continue;
            }
            if task.due <= now {
                due.push(task);
            } else {
                remaining.push(task);
            }
        }
        self.tasks = remaining;

        // Stable sort keeps insertion order for equal due ticks.
        due.sort_by_key(|t| t.due);
        for task in due {
            // Re-check: an earlier task in this batch may have cancelled it.
            if !task.handle.is_cancelled() {
                (task.run)();
                task.handle.mark_fired();
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_fires_at_due_tick() {
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();

        let mut sched = Scheduler::new();
        sched.schedule(2, move || fired_clone.set(true));

        sched.advance(1);
        assert!(!fired.get());
        sched.advance(1);
        assert!(fired.get());
        assert_eq!(sched.pending_tasks(), 0);
    }

    #[test]
    fn test_cancel_before_due() {
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();

        let mut sched = Scheduler::new();
        let handle = sched.schedule(1, move || fired_clone.set(true));
        handle.cancel();

        sched.advance(5);
        assert!(!fired.get());
        assert_eq!(sched.pending_tasks(), 0);
    }

    #[test]
    fn test_fire_order() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut sched = Scheduler::new();
        for (delay, label) in [(2u64, "late"), (1, "first"), (1, "second")] {
            let order = order.clone();
            sched.schedule(delay, move || order.borrow_mut().push(label));
        }

        sched.advance(2);
        assert_eq!(*order.borrow(), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_task_can_cancel_sibling_in_same_batch() {
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();

        let mut sched = Scheduler::new();
        let victim = sched.schedule(2, move || fired_clone.set(true));
        sched.schedule(1, move || victim.cancel());

        sched.advance(2);
        assert!(!fired.get());
    }

    #[test]
    fn test_handle_reports_completion() {
        let mut sched = Scheduler::new();
        let handle = sched.schedule(1, || {});

        assert!(!handle.is_complete());
        sched.advance(1);
        assert!(handle.is_complete());

        // Cancelling a completed task changes nothing.
        handle.cancel();
        assert!(handle.is_complete());
    }

    #[test]
    fn test_handle_carries_due_tick() {
        let mut sched = Scheduler::new();
        sched.advance(3);
        let handle = sched.schedule(2, || {});
        assert_eq!(handle.due(), 5);
    }

    #[test]
    fn test_journal_records_at_current_tick() {
        let mut sched = Scheduler::new();
        sched.advance(3);
        sched.record("root", EventKind::Mounted);
        let entries = sched.journal().entries();
        assert_eq!(entries[0].tick, 3);
    }
}
