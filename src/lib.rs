//! # lifecycle-tui
//!
//! A pedagogical terminal demo of explicit UI unit lifecycles: construction,
//! prop-derived state, mount, update gating, snapshot capture, and unmount,
//! over a nested root → parent → child tree.
//!
//! Instead of a framework runtime with reflection-driven lifecycle dispatch,
//! everything here is explicit and caller-owned:
//!
//! ```text
//! key press -> dispatch -> fold queued mutations -> gate -> apply -> hooks
//! tick      -> scheduler -> due tasks -> deferred flush
//! ```
//!
//! Data flows strictly top-down as props; intent flows bottom-up through
//! callbacks. Every lifecycle transition lands in an ordered journal that the
//! TUI shows live and the binary dumps on exit.
//!
//! ## Modules
//!
//! - [`runtime`] - Unit trait, mounted instances, transaction queue, scheduler
//! - [`units`] - the demo tree (root / parent / child)
//! - [`journal`] - ordered lifecycle event stream
//! - [`input`] - crossterm keyboard plumbing
//! - [`render`] - terminal screen and panel framing
//! - [`app`] - mounts the tree and routes events

pub mod app;
pub mod input;
pub mod journal;
pub mod render;
pub mod runtime;
pub mod units;

pub use app::App;

pub use runtime::{Callback, Context, Mounted, Scheduler, TaskHandle, Unit, Updater};

pub use journal::{Entry, EventKind, Journal};

pub use input::{Key, KeyboardEvent, Modifiers, poll_event};

pub use render::{Screen, frame};

pub use units::{
    ChildProps, ChildState, ChildUnit, INITIAL_MESSAGE, MESSAGE_DELAY, MOUNTED_MESSAGE,
    ParentProps, ParentState, ParentUnit, RootState, RootUnit,
};
