//! End-to-end lifecycle behavior over the full root -> parent -> child tree.

use lifecycle_tui::journal::EventKind;
use lifecycle_tui::runtime::{Mounted, Scheduler};
use lifecycle_tui::units::{
    ChildUnit, INITIAL_MESSAGE, MESSAGE_DELAY, MOUNTED_MESSAGE, ParentUnit, RootState, RootUnit,
};

fn mount_tree() -> (Scheduler, Mounted<RootUnit>) {
    let mut sched = Scheduler::new();
    let root = Mounted::mount(RootUnit::seeded(7), (), &mut sched);
    (sched, root)
}

fn parent(root: &Mounted<RootUnit>) -> &Mounted<ParentUnit> {
    root.unit().parent.as_ref().expect("parent should be mounted")
}

fn child(root: &Mounted<RootUnit>) -> &Mounted<ChildUnit> {
    parent(root).unit().child.as_ref().expect("child should be mounted")
}

fn set_init(root: &mut Mounted<RootUnit>, sched: &mut Scheduler, value: i64) {
    root.dispatch(sched, move |_, _, cx| {
        cx.update(move |s| RootState { init_value: value, ..s })
    });
}

fn toggle(root: &mut Mounted<RootUnit>, sched: &mut Scheduler) {
    root.dispatch(sched, |r, _, cx| r.toggle_visible(cx));
}

fn increment(root: &mut Mounted<RootUnit>, sched: &mut Scheduler) {
    root.dispatch(sched, |r, _, cx| {
        if let Some(p) = r.parent.as_mut() {
            p.dispatch(cx.scheduler(), |pu, _, pcx| pu.increment(pcx));
        }
    });
}

fn click_reset(root: &mut Mounted<RootUnit>, sched: &mut Scheduler) {
    root.dispatch(sched, |r, _, cx| {
        if let Some(p) = r.parent.as_mut() {
            p.dispatch(cx.scheduler(), |pu, _, pcx| {
                if let Some(c) = pu.child.as_mut() {
                    c.dispatch(pcx.scheduler(), |cu, props, _| cu.reset_click(props));
                }
            });
        }
    });
}

#[test]
fn test_double_increment_displays_plus_two() {
    let (mut sched, mut root) = mount_tree();

    increment(&mut root, &mut sched);
    assert_eq!(parent(&root).applied_state().counter, 2);

    increment(&mut root, &mut sched);
    assert_eq!(parent(&root).applied_state().counter, 4);
}

#[test]
fn test_divergent_init_value_overrides_counter() {
    let (mut sched, mut root) = mount_tree();

    increment(&mut root, &mut sched);
    set_init(&mut root, &mut sched, 7);

    assert_eq!(parent(&root).applied_state().counter, 7);
}

#[test]
fn test_child_value_is_always_double_the_counter() {
    let (mut sched, mut root) = mount_tree();

    let check = |root: &Mounted<RootUnit>| {
        assert_eq!(
            child(root).applied_props().value,
            2 * parent(root).applied_state().counter
        );
    };

    check(&root);
    increment(&mut root, &mut sched);
    check(&root);
    set_init(&mut root, &mut sched, 9);
    check(&root);
    click_reset(&mut root, &mut sched);
    check(&root);
    sched.advance(MESSAGE_DELAY);
    root.flush_pending(&mut sched);
    check(&root);
}

#[test]
fn test_remount_gives_fresh_state() {
    let (mut sched, mut root) = mount_tree();

    set_init(&mut root, &mut sched, 3);
    increment(&mut root, &mut sched);
    root.dispatch(&mut sched, |r, _, cx| {
        if let Some(p) = r.parent.as_mut() {
            p.dispatch(cx.scheduler(), |pu, _, pcx| {
                if let Some(c) = pu.child.as_mut() {
                    c.dispatch(pcx.scheduler(), |cu, _, ccx| {
                        cu.input_change("scratch".into(), ccx);
                        cu.toggle(ccx);
                    });
                }
            });
        }
    });
    assert_eq!(child(&root).applied_state().input_text, "scratch");

    toggle(&mut root, &mut sched);
    assert!(root.unit().parent.is_none());
    toggle(&mut root, &mut sched);

    // Fresh construction: counter re-seeded from init value, child defaults.
    assert_eq!(parent(&root).applied_state().counter, 3);
    assert_eq!(parent(&root).applied_state().message, INITIAL_MESSAGE);
    assert_eq!(child(&root).applied_state().input_text, "");
    assert!(!child(&root).applied_state().active);
}

#[test]
fn test_click_scenario() {
    let (mut sched, mut root) = mount_tree();
    assert_eq!(parent(&root).applied_state().counter, 0);

    increment(&mut root, &mut sched);
    assert_eq!(parent(&root).applied_state().counter, 2);

    set_init(&mut root, &mut sched, 7);
    assert_eq!(parent(&root).applied_state().counter, 7);
    assert_eq!(child(&root).applied_props().value, 14);

    // Mark some child-local state, then reset through the callback.
    root.dispatch(&mut sched, |r, _, cx| {
        if let Some(p) = r.parent.as_mut() {
            p.dispatch(cx.scheduler(), |pu, _, pcx| {
                if let Some(c) = pu.child.as_mut() {
                    c.dispatch(pcx.scheduler(), |cu, _, ccx| {
                        cu.input_change("kept".into(), ccx);
                        cu.toggle(ccx);
                    });
                }
            });
        }
    });
    click_reset(&mut root, &mut sched);

    assert_eq!(parent(&root).applied_state().counter, 0);
    assert_eq!(child(&root).applied_props().value, 0);
    // Child-local state is unaffected by the reset.
    assert_eq!(child(&root).applied_state().input_text, "kept");
    assert!(child(&root).applied_state().active);
}

#[test]
fn test_delayed_message_applies_through_the_tree() {
    let (mut sched, mut root) = mount_tree();
    assert_eq!(parent(&root).applied_state().message, INITIAL_MESSAGE);

    sched.advance(MESSAGE_DELAY);
    root.flush_pending(&mut sched);

    assert_eq!(parent(&root).applied_state().message, MOUNTED_MESSAGE);
}

#[test]
fn test_unmount_cancels_delayed_message() {
    let (mut sched, mut root) = mount_tree();

    // Tear down while the one-shot message task is still pending.
    toggle(&mut root, &mut sched);
    sched.advance(MESSAGE_DELAY);
    root.flush_pending(&mut sched);
    toggle(&mut root, &mut sched);

    // The old task never applied; the fresh parent starts over.
    assert_eq!(parent(&root).applied_state().message, INITIAL_MESSAGE);

    let entries = sched.journal().entries();
    assert!(
        !entries.iter().any(|e| match &e.kind {
            EventKind::Applied { next, .. } => next.contains(MOUNTED_MESSAGE),
            _ => false,
        }),
        "cancelled message task must never apply"
    );
    assert!(entries.iter().any(|e| e.kind == EventKind::Cancelled));
}

#[test]
fn test_no_mutation_after_teardown() {
    let (mut sched, mut root) = mount_tree();

    toggle(&mut root, &mut sched);
    let unmount_seq = sched
        .journal()
        .entries()
        .iter()
        .rfind(|e| e.unit == "parent" && e.kind == EventKind::Unmounted)
        .expect("parent unmounted")
        .seq;

    sched.advance(MESSAGE_DELAY);
    root.flush_pending(&mut sched);

    // Nothing of the dead parent appears after its unmount entry.
    let late: Vec<_> = sched
        .journal()
        .entries()
        .into_iter()
        .filter(|e| e.seq > unmount_seq && e.unit == "parent")
        .collect();
    assert!(late.is_empty(), "post-teardown parent entries: {late:?}");
}

#[test]
fn test_mount_order_in_journal() {
    let (sched, _root) = mount_tree();

    let head: Vec<_> = sched
        .journal()
        .entries()
        .into_iter()
        .map(|e| (e.unit, e.kind))
        .collect();
    assert_eq!(
        head,
        vec![
            ("root", EventKind::Created),
            ("root", EventKind::Mounted),
            ("parent", EventKind::Created),
            ("parent", EventKind::Mounted),
            ("parent", EventKind::Scheduled { due: MESSAGE_DELAY }),
            ("child", EventKind::Created),
            ("child", EventKind::Mounted),
        ]
    );
}

#[test]
fn test_journal_sequence_matches_invocation_order() {
    let (mut sched, mut root) = mount_tree();

    increment(&mut root, &mut sched);
    set_init(&mut root, &mut sched, 5);
    click_reset(&mut root, &mut sched);
    toggle(&mut root, &mut sched);

    let entries = sched.journal().entries();
    for (i, entry) in entries.iter().enumerate() {
        assert_eq!(entry.seq, i as u64);
    }
}

#[test]
fn test_parent_snapshot_reports_previous_counter() {
    let (mut sched, mut root) = mount_tree();

    increment(&mut root, &mut sched);
    set_init(&mut root, &mut sched, 4);

    let snapshots: Vec<_> = sched
        .journal()
        .entries()
        .into_iter()
        .filter_map(|e| match e.kind {
            EventKind::Snapshot { detail } if e.unit == "parent" => Some(detail),
            _ => None,
        })
        .collect();
    assert_eq!(snapshots, vec!["old counter=0".to_string(), "old counter=2".to_string()]);
}
