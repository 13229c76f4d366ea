//! Two-stack linear undo/redo manager with compound-change grouping.
//!
//! The teacher crate's own undo facility (`monster-rift::history::UndoTree`,
//! `src/history/mod.rs`) is a branching history with checkpoints and a navigable tree of edit
//! nodes; this component instead needs the plain linear undo/redo stacks the specification
//! calls for, so the tree/checkpoint machinery is not carried over. What *is* carried over in
//! the teacher's manner is `EditOperation`/`EditOperation::inverse()` and `EditTransaction`
//! (`src/history/mod.rs`), renamed here [`EditStep`] and [`UndoUnit`] — they already express
//! exactly the "ordered list of atomic inverse operations, recorded and reversible as a group"
//! idea this component needs, just without the tree wrapped around them.

use crate::line_store::LinePosition;

/// One atomic text replacement, recorded so it can be replayed forward or in reverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditStep {
    pub start: LinePosition,
    pub old_units: Vec<u16>,
    pub new_units: Vec<u16>,
}

impl EditStep {
    pub fn inverse(&self) -> EditStep {
        EditStep {
            start: self.start,
            old_units: self.new_units.clone(),
            new_units: self.old_units.clone(),
        }
    }
}

/// A group of [`EditStep`]s undone or redone as a single user-visible operation.
#[derive(Debug, Clone, Default)]
pub struct UndoUnit {
    pub steps: Vec<EditStep>,
}

impl UndoUnit {
    /// The steps that, applied in order, undo this unit: each step inverted, in reverse
    /// application order (later edits must be undone before earlier ones, since a later edit
    /// may have been made relative to text the earlier edit introduced).
    pub fn inverse(&self) -> UndoUnit {
        UndoUnit {
            steps: self.steps.iter().rev().map(EditStep::inverse).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Two linear undo/redo stacks with nestable compound-change grouping.
pub struct UndoManager {
    undo_stack: Vec<UndoUnit>,
    redo_stack: Vec<UndoUnit>,
    compound_depth: usize,
    pending: Option<UndoUnit>,
    recording: bool,
}

impl UndoManager {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            compound_depth: 0,
            pending: None,
            recording: true,
        }
    }

    /// Record one more edit. While a compound change is open the step accumulates into the
    /// pending unit instead of becoming its own undo entry; a fresh edit always invalidates the
    /// redo stack. A no-op while recording is disabled (see [`Self::set_records_changes`]).
    pub fn record(&mut self, step: EditStep) {
        if !self.recording {
            return;
        }
        self.redo_stack.clear();
        if self.compound_depth > 0 {
            self.pending.get_or_insert_with(UndoUnit::default).steps.push(step);
        } else {
            self.undo_stack.push(UndoUnit { steps: vec![step] });
        }
    }

    /// Enable or disable undo recording. Disabling drops both stacks and any pending compound
    /// unit outright, since resuming recording later with stale history would let an `undo()`
    /// reach back past the gap to edits the caller deliberately chose not to track.
    pub fn set_records_changes(&mut self, record: bool) {
        self.recording = record;
        if !record {
            self.undo_stack.clear();
            self.redo_stack.clear();
            self.pending = None;
            self.compound_depth = 0;
        }
    }

    pub fn records_changes(&self) -> bool {
        self.recording
    }

    pub fn begin_compound_change(&mut self) {
        if self.compound_depth == 0 {
            self.pending = Some(UndoUnit::default());
        }
        self.compound_depth += 1;
    }

    pub fn end_compound_change(&mut self) {
        if self.compound_depth == 0 {
            return;
        }
        self.compound_depth -= 1;
        if self.compound_depth == 0 {
            if let Some(unit) = self.pending.take() {
                if !unit.is_empty() {
                    self.undo_stack.push(unit);
                }
            }
        }
    }

    /// Close off the steps accumulated so far as one undo unit without leaving compound mode,
    /// so a subsequent `undo()` stops here rather than at the start of the whole grouping.
    pub fn insert_undo_boundary(&mut self) {
        if self.compound_depth == 0 {
            return;
        }
        if let Some(unit) = self.pending.take() {
            if !unit.is_empty() {
                self.undo_stack.push(unit);
            }
        }
        self.pending = Some(UndoUnit::default());
    }

    pub fn is_compound_changing(&self) -> bool {
        self.compound_depth > 0
    }

    pub fn number_of_undoable_changes(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn number_of_redoable_changes(&self) -> usize {
        self.redo_stack.len()
    }

    /// The unit a caller should apply (inverted) to perform an undo, without mutating either
    /// stack — callers must call [`Self::confirm_undo`] only after successfully applying it, so
    /// a failed undo leaves both stacks untouched.
    pub fn peek_undo(&self) -> Option<&UndoUnit> {
        self.undo_stack.last()
    }

    pub fn confirm_undo(&mut self) {
        if let Some(unit) = self.undo_stack.pop() {
            self.redo_stack.push(unit);
        }
    }

    pub fn peek_redo(&self) -> Option<&UndoUnit> {
        self.redo_stack.last()
    }

    pub fn confirm_redo(&mut self) {
        if let Some(unit) = self.redo_stack.pop() {
            self.undo_stack.push(unit);
        }
    }

    /// Drop the most recently recorded unit without undoing it. Used when a change is rolled
    /// back after having already been recorded, so the undo history does not describe an edit
    /// that no longer happened.
    pub fn discard_last_recorded(&mut self) -> Option<UndoUnit> {
        self.undo_stack.pop()
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
