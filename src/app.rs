//! App - Mounts the tree once and routes events into it.
//!
//! Owns the scheduler and the root mount; every key press becomes a unit
//! dispatch, every elapsed time unit becomes a scheduler tick. After each
//! event the tree is settled: deferred mutations pushed by callbacks or
//! fired tasks are flushed top-down.
//!
//! Key map (tree visible): `t` toggle, `r` randomize, `i` increment,
//! `s` child toggle, `z` child reset, `Tab` edit the child input,
//! `q` / Ctrl+C quit.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::input::{Key, KeyboardEvent, Modifiers};
use crate::journal::Journal;
use crate::render::frame;
use crate::runtime::{Context, Mounted, Scheduler};
use crate::units::{ChildProps, ChildUnit, ParentProps, ParentUnit, RootUnit};

/// Journal pane depth.
const JOURNAL_TAIL: usize = 10;

pub struct App {
    sched: Scheduler,
    root: Mounted<RootUnit>,
    input_focus: bool,
    quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut sched = Scheduler::new();
        let root = Mounted::mount(RootUnit::new(rng), (), &mut sched);
        Self { sched, root, input_focus: false, quit: false }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn journal(&self) -> Journal {
        self.sched.journal()
    }

    pub fn root(&self) -> &Mounted<RootUnit> {
        &self.root
    }

    /// Advance the logical clock, firing due tasks, then settle the tree.
    pub fn advance(&mut self, ticks: u64) {
        self.sched.advance(ticks);
        self.settle();
    }

    pub fn handle_key(&mut self, event: &KeyboardEvent) {
        if event.modifiers.contains(Modifiers::CTRL) && event.key == Key::Char('c') {
            self.quit = true;
            return;
        }

        if self.input_focus {
            match event.key {
                Key::Escape | Key::Tab | Key::Enter => self.input_focus = false,
                Key::Backspace => self.dispatch_child(|child, _, cx| child.backspace(cx)),
                Key::Char(c) => self.dispatch_child(move |child, _, cx| child.push_char(c, cx)),
            }
        } else {
            match event.key {
                Key::Char('q') => self.quit = true,
                Key::Char('t') => self.dispatch_root(|root, _, cx| root.toggle_visible(cx)),
                Key::Char('r') => self.dispatch_root(|root, _, cx| root.randomize(cx)),
                Key::Char('i') => self.dispatch_parent(|parent, _, cx| parent.increment(cx)),
                Key::Char('s') => self.dispatch_child(|child, _, cx| child.toggle(cx)),
                Key::Char('z') => self.dispatch_child(|child, props, _| child.reset_click(props)),
                Key::Tab => {
                    if self.root.state().visible {
                        self.input_focus = true;
                    }
                }
                _ => {}
            }
        }
        self.settle();
    }

    /// Full display frame: tree plus journal tail.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.root.lines();
        lines.push(String::new());
        if self.input_focus {
            lines.push("editing child input (Esc or Tab to stop)".to_string());
            lines.push(String::new());
        }
        lines.extend(frame("journal", &self.sched.journal().tail(JOURNAL_TAIL)));
        lines
    }

    /// Tear the whole tree down (process exit) and hand back the journal.
    pub fn teardown(self) -> Journal {
        let Self { mut sched, root, .. } = self;
        let journal = sched.journal();
        root.unmount(&mut sched);
        journal
    }

    fn settle(&mut self) {
        self.root.flush_pending(&mut self.sched);
    }

    fn dispatch_root(
        &mut self,
        f: impl FnOnce(&mut RootUnit, &(), &mut Context<'_, RootUnit>),
    ) {
        self.root.dispatch(&mut self.sched, f);
    }

    fn dispatch_parent(
        &mut self,
        f: impl FnOnce(&mut ParentUnit, &ParentProps, &mut Context<'_, ParentUnit>),
    ) {
        self.root.dispatch(&mut self.sched, move |root, _, cx| {
            if let Some(parent) = root.parent.as_mut() {
                parent.dispatch(cx.scheduler(), f);
            }
        });
    }

    fn dispatch_child(
        &mut self,
        f: impl FnOnce(&mut ChildUnit, &ChildProps, &mut Context<'_, ChildUnit>),
    ) {
        self.dispatch_parent(move |parent, _, cx| {
            if let Some(child) = parent.child.as_mut() {
                child.dispatch(cx.scheduler(), f);
            }
        });
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyboardEvent {
        KeyboardEvent::char(c)
    }

    #[test]
    fn test_increment_key_adds_two() {
        let mut app = App::with_seed(1);
        app.handle_key(&key('i'));

        let root = app.root().unit();
        let parent = root.parent.as_ref().unwrap();
        assert_eq!(parent.applied_state().counter, 2);
    }

    #[test]
    fn test_keys_ignored_while_tree_hidden() {
        let mut app = App::with_seed(1);
        app.handle_key(&key('t'));
        assert!(app.root().unit().parent.is_none());

        // No parent to receive these; must not panic.
        app.handle_key(&key('i'));
        app.handle_key(&key('s'));
        app.handle_key(&KeyboardEvent::new(Key::Tab));
        assert!(!app.should_quit());
    }

    #[test]
    fn test_input_focus_routes_text() {
        let mut app = App::with_seed(1);
        app.handle_key(&KeyboardEvent::new(Key::Tab));
        app.handle_key(&key('h'));
        app.handle_key(&key('i'));
        app.handle_key(&KeyboardEvent::new(Key::Escape));
        // 'i' after leaving focus increments instead of typing.
        app.handle_key(&key('i'));

        let root = app.root().unit();
        let parent = root.parent.as_ref().unwrap();
        let child = parent.unit().child.as_ref().unwrap();
        assert_eq!(child.applied_state().input_text, "hi");
        assert_eq!(parent.applied_state().counter, 2);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::with_seed(1);
        app.handle_key(&KeyboardEvent::with_modifiers(Key::Char('c'), Modifiers::CTRL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_frame_contains_journal_pane() {
        let app = App::with_seed(1);
        let lines = app.lines();
        assert!(lines.iter().any(|l| l.contains("journal")));
    }

    #[test]
    fn test_teardown_unmounts_everything() {
        let app = App::with_seed(1);
        let journal = app.teardown();
        let unmounted: Vec<_> = journal
            .entries()
            .into_iter()
            .filter(|e| matches!(e.kind, crate::journal::EventKind::Unmounted))
            .map(|e| e.unit)
            .collect();
        assert_eq!(unmounted, vec!["child", "parent", "root"]);
    }
}
