//! Runtime - Explicit unit lifecycle machinery.
//!
//! The pieces the demo tree is built on:
//!
//! - [`unit::Unit`] - the lifecycle contract (init, derive, gate, snapshot,
//!   applied, teardown)
//! - [`mounted::Mounted`] - a live unit instance and its coalescing
//!   transaction queue
//! - [`scheduler::Scheduler`] - caller-owned logical clock with cancellable
//!   one-shot tasks

pub mod mounted;
pub mod scheduler;
pub mod unit;

pub use mounted::{Mounted, Updater};
pub use scheduler::{Scheduler, TaskHandle};
pub use unit::{Callback, Context, Unit};
