//! Journal - Ordered lifecycle event stream.
//!
//! Every lifecycle and state-transition event in the tree is recorded here,
//! in invocation order, with enough context (previous/next values) to
//! reconstruct the update sequence. The journal is the demo's observable
//! side channel: the TUI shows its tail in a pane and the binary dumps the
//! whole stream on exit.
//!
//! The journal handle is cheaply cloneable; the scheduler carries one and
//! every unit context records through it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

// =============================================================================
// EVENT KINDS
// =============================================================================

/// One lifecycle or state-transition event.
///
/// State values are carried as pre-formatted strings so the journal stays
/// free of unit type parameters.
#[derive(Clone, Debug, PartialEq)]
pub enum EventKind {
    /// Unit constructed (state seeded from props).
    Created,
    /// First render applied, unit is now live.
    Mounted,
    /// Prop-derived state overwrote local state before a render decision.
    Derived { prev: String, next: String },
    /// A state change passed the render gate and hit the screen.
    Applied { prev: String, next: String },
    /// The render gate rejected a pending change (display-only skip).
    Skipped { pending: String },
    /// Snapshot captured just before an update was applied.
    Snapshot { detail: String },
    /// A unit observed its derived input change across renders.
    ValueChanged { prev: String, next: String },
    /// A delayed task was scheduled for the given tick.
    Scheduled { due: u64 },
    /// A pending task was cancelled before firing.
    Cancelled,
    /// Unit torn down, state discarded.
    Unmounted,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Created => write!(f, "created"),
            EventKind::Mounted => write!(f, "mounted"),
            EventKind::Derived { prev, next } => write!(f, "derived {prev} -> {next}"),
            EventKind::Applied { prev, next } => write!(f, "applied {prev} -> {next}"),
            EventKind::Skipped { pending } => write!(f, "skipped render of {pending}"),
            EventKind::Snapshot { detail } => write!(f, "snapshot {detail}"),
            EventKind::ValueChanged { prev, next } => {
                write!(f, "value changed {prev} -> {next}")
            }
            EventKind::Scheduled { due } => write!(f, "task scheduled for tick {due}"),
            EventKind::Cancelled => write!(f, "task cancelled"),
            EventKind::Unmounted => write!(f, "unmounted"),
        }
    }
}

// =============================================================================
// ENTRIES
// =============================================================================

/// A single journal entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
    /// Position in the stream, starting at 0. Matches invocation order.
    pub seq: u64,
    /// Scheduler tick at which the event was recorded.
    pub tick: u64,
    /// Name of the unit the event belongs to.
    pub unit: &'static str,
    pub kind: EventKind,
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>4} t{} {:<6} {}", self.seq, self.tick, self.unit, self.kind)
    }
}

// =============================================================================
// JOURNAL HANDLE
// =============================================================================

/// Append-only event stream. Clones share the same underlying stream.
#[derive(Clone, Default)]
pub struct Journal {
    entries: Rc<RefCell<Vec<Entry>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. `seq` is assigned from the current length.
    pub fn record(&self, tick: u64, unit: &'static str, kind: EventKind) {
        let mut entries = self.entries.borrow_mut();
        let seq = entries.len() as u64;
        entries.push(Entry { seq, tick, unit, kind });
    }

    /// Snapshot of all entries, in order.
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// The last `n` entries formatted for display (journal pane).
    pub fn tail(&self, n: usize) -> Vec<String> {
        let entries = self.entries.borrow();
        let start = entries.len().saturating_sub(n);
        entries[start..].iter().map(|e| e.to_string()).collect()
    }

    /// All entries formatted, one per line (exit dump).
    pub fn dump(&self) -> String {
        let entries = self.entries.borrow();
        let mut out = String::new();
        for entry in entries.iter() {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================
