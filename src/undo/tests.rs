use super::*;

fn step(start: usize, old: &str, new: &str) -> EditStep {
    EditStep {
        start: LinePosition::new(0, start),
        old_units: old.encode_utf16().collect(),
        new_units: new.encode_utf16().collect(),
    }
}

#[test]
fn record_pushes_one_unit_per_edit_outside_compound() {
    let mut m = UndoManager::new();
    m.record(step(0, "", "a"));
    m.record(step(1, "", "b"));
    assert_eq!(m.number_of_undoable_changes(), 2);
}

#[test]
fn new_edit_clears_redo_stack() {
    let mut m = UndoManager::new();
    m.record(step(0, "", "a"));
    m.confirm_undo();
    assert_eq!(m.number_of_redoable_changes(), 1);
    m.record(step(0, "", "b"));
    assert_eq!(m.number_of_redoable_changes(), 0);
}

#[test]
fn compound_change_groups_steps_into_one_unit() {
    let mut m = UndoManager::new();
    m.begin_compound_change();
    m.record(step(0, "", "a"));
    m.record(step(1, "", "b"));
    m.end_compound_change();
    assert_eq!(m.number_of_undoable_changes(), 1);
    assert_eq!(m.peek_undo().unwrap().steps.len(), 2);
}

#[test]
fn nested_compound_changes_only_close_at_outermost_end() {
    let mut m = UndoManager::new();
    m.begin_compound_change();
    m.begin_compound_change();
    m.record(step(0, "", "a"));
    m.end_compound_change();
    assert_eq!(m.number_of_undoable_changes(), 0);
    m.end_compound_change();
    assert_eq!(m.number_of_undoable_changes(), 1);
}

#[test]
fn undo_boundary_splits_compound_into_multiple_units() {
    let mut m = UndoManager::new();
    m.begin_compound_change();
    m.record(step(0, "", "a"));
    m.insert_undo_boundary();
    m.record(step(1, "", "b"));
    m.end_compound_change();
    assert_eq!(m.number_of_undoable_changes(), 2);
}

#[test]
fn inverse_reverses_order_and_swaps_old_new() {
    let unit = UndoUnit {
        steps: vec![step(0, "", "a"), step(1, "", "b")],
    };
    let inv = unit.inverse();
    assert_eq!(inv.steps[0].new_units, step(1, "", "b").old_units);
    assert_eq!(inv.steps[0].old_units, step(1, "", "b").new_units);
    assert_eq!(inv.steps[1].start, step(0, "", "a").start);
}

#[test]
fn disabling_recording_clears_both_stacks_and_ignores_new_edits() {
    let mut m = UndoManager::new();
    m.record(step(0, "", "a"));
    m.confirm_undo();
    assert_eq!(m.number_of_redoable_changes(), 1);

    m.set_records_changes(false);
    assert_eq!(m.number_of_undoable_changes(), 0);
    assert_eq!(m.number_of_redoable_changes(), 0);

    m.record(step(0, "", "b"));
    assert_eq!(m.number_of_undoable_changes(), 0);

    m.set_records_changes(true);
    m.record(step(0, "", "c"));
    assert_eq!(m.number_of_undoable_changes(), 1);
}

#[test]
fn failed_undo_leaves_stacks_untouched() {
    let mut m = UndoManager::new();
    m.record(step(0, "", "a"));
    // Simulate a caller peeking, failing to apply, and never confirming.
    let _ = m.peek_undo().unwrap();
    assert_eq!(m.number_of_undoable_changes(), 1);
    assert_eq!(m.number_of_redoable_changes(), 0);
}
