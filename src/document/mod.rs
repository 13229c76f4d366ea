//! Document core: the mutable Unicode text document itself, its change pipeline, narrowing,
//! properties, and the partitioner/input/listener sockets around it.
//!
//! Grounded on `ascension::kernel::Document`
//! (`original_source/ascension/ascension/kernel/document.hpp`), reworked per the redesign notes
//! for this component: the original's `Document` holds a raw `UndoManager*` and a
//! `std::set<Point*>` of back-pointers from anchors; here the document owns an
//! [`crate::anchor::AnchorRegistry`] (anchors are handles, see `crate::anchor`) and an
//! [`crate::undo::UndoManager`] by value, and the "one change in flight, reentrant replace()
//! rejected" rule that the original enforces with an explicit `changing_` flag and exceptions is
//! instead enforced by `RefCell::try_borrow_mut`: a listener that calls back into `replace()`
//! while still inside the notification it is reacting to finds the same `RefCell` already
//! mutably borrowed and gets `ChangeRejected` for free, without a second flag to keep in sync.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::anchor::{AnchorHandle, AnchorRegistry, Gravity};
use crate::bookmark::Bookmarker;
use crate::error::{ErrorKind, TextError};
use crate::line_store::{self, LinePosition, LineStore};
use crate::partition::{DocumentPartitioner, NullPartitioner};
use crate::undo::{EditStep, UndoManager};

pub type Position = LinePosition;

/// A normalized `[first, second]` span of positions, `first <= second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub first: Position,
    pub second: Position,
}

impl Region {
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Region { first: a, second: b }
        } else {
            Region { first: b, second: a }
        }
    }

    pub fn at(pos: Position) -> Self {
        Region { first: pos, second: pos }
    }

    pub fn is_empty(&self) -> bool {
        self.first == self.second
    }
}

/// Describes one committed change: the region that was erased (in positions valid just before
/// the edit) and the region its replacement text now occupies (in positions valid just after).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRecord {
    pub erased: Region,
    pub inserted: Region,
}

/// Observer notified around every successful edit. Receives only the change record, not the
/// document itself — see the module doc comment for why reading document state from inside a
/// callback is unsupported (it would deadlock/panic against the in-flight mutable borrow).
pub trait DocumentListener {
    fn document_about_to_be_changed(&self, _change: &ChangeRecord) -> Result<(), TextError> {
        Ok(())
    }
    fn document_changed(&self, _change: &ChangeRecord) -> Result<(), TextError> {
        Ok(())
    }

    /// Called after an edit when the installed [`DocumentPartitioner`] reports that the
    /// classification of `changed` may have been invalidated (e.g. a syntax highlighter
    /// recomputing a multi-line comment span). Purely informational: unlike
    /// `document_changed`, there is nothing left to reject at this point, so this has no
    /// `Result` return.
    fn document_partitioning_changed(&self, _changed: &Region) {}
}

/// Fires exactly once, the first time a freshly created or freshly reset document is changed.
/// Separate from [`DocumentListener::document_changed`] because a caller (e.g. a view wiring up
/// its initial state) often needs a one-shot "content finally exists" signal rather than the
/// steady stream of per-edit notifications.
pub trait FirstChangeListener {
    fn document_first_changed(&self);
}

/// External collaborator (e.g. a file-backed buffer one layer up, out of this kernel's scope)
/// that can veto edits before they happen.
pub trait DocumentInput {
    fn is_changeable(&self) -> bool {
        true
    }
    fn document_about_to_be_changed(&self) -> Result<(), TextError> {
        Ok(())
    }
}

/// Per-content-type identifier syntax lookup (e.g. "which characters start an identifier in
/// this language region"), consulted by word-boundary logic that needs to know more than the
/// UAX #29 default rules. Optional: a document with no provider installed falls back to the
/// default rules in `text_break::word`.
pub trait ContentTypeInformationProvider {
    fn identifier_syntax(&self, content_type: crate::partition::ContentType) -> IdentifierSyntax;
}

/// Which code points may start, or continue, an identifier for a given content type.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierSyntax {
    pub start: fn(char) -> bool,
    pub continue_: fn(char) -> bool,
}

/// Locale-aware comparison weights, for collation-sensitive search/sort. Optional; absent a
/// collator, comparisons fall back to code point order.
pub trait Collator {
    fn weight(&self, cp: char) -> i32;
    fn has_variable(&self, cp: char) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangingState {
    Idle,
    Changing,
    Notifying,
}

struct DocumentCore {
    lines: LineStore,
    anchors: AnchorRegistry,
    bookmarker: Bookmarker,
    partitioner: Box<dyn DocumentPartitioner>,
    undo: UndoManager,
    revision: u64,
    last_unmodified_revision: u64,
    read_only: bool,
    narrowing: Option<Region>,
    properties: HashMap<String, String>,
    prenotified_listeners: Vec<Rc<dyn DocumentListener>>,
    listeners: Vec<Rc<dyn DocumentListener>>,
    first_change_listeners: Vec<Rc<dyn FirstChangeListener>>,
    had_first_change: bool,
    input: Option<Rc<dyn DocumentInput>>,
    state: ChangingState,
    replaying_undo: bool,
}

impl DocumentCore {
    fn document_end(&self) -> Position {
        let last = self.lines.line_count() - 1;
        Position::new(last, self.lines.line(last).unwrap().units.len())
    }

    fn raw_region(&self) -> Region {
        Region::new(Position::new(0, 0), self.document_end())
    }

    fn accessible_region(&self) -> Region {
        self.narrowing.unwrap_or_else(|| self.raw_region())
    }

    fn validate_region(&self, region: Region) -> Result<(), TextError> {
        let raw = self.raw_region();
        if region.first < raw.first || region.second > raw.second {
            return Err(TextError::bad_position(format!(
                "region {:?} lies outside the document [0,0)..{:?}",
                region, raw.second
            )));
        }
        let accessible = self.accessible_region();
        if region.first < accessible.first || region.second > accessible.second {
            return Err(TextError::access_violation());
        }
        Ok(())
    }

    /// Perform one `replace`. `record_undo` is false while replaying an undo/redo step, so the
    /// replay itself does not generate a new undo entry.
    fn replace_impl(&mut self, region: Region, new_text: &str, record_undo: bool) -> Result<(), TextError> {
        if self.read_only {
            return Err(TextError::read_only());
        }
        self.validate_region(region)?;
        if let Some(input) = &self.input {
            if !input.is_changeable() {
                return Err(TextError::change_rejected("input collaborator marked the document unchangeable"));
            }
        }

        let new_units: Vec<u16> = new_text.encode_utf16().collect();
        let inserted_end = line_store::advance_position(region.first, &new_units);
        let change = ChangeRecord {
            erased: region,
            inserted: Region::new(region.first, inserted_end),
        };

        self.state = ChangingState::Changing;
        for l in &self.prenotified_listeners {
            if let Err(e) = l.document_about_to_be_changed(&change) {
                self.state = ChangingState::Idle;
                return Err(e);
            }
        }
        for l in &self.listeners {
            if let Err(e) = l.document_about_to_be_changed(&change) {
                self.state = ChangingState::Idle;
                return Err(e);
            }
        }
        if let Some(input) = &self.input {
            if let Err(e) = input.document_about_to_be_changed() {
                self.state = ChangingState::Idle;
                return Err(e);
            }
        }

        let old_units = self.lines.units_in_range(region.first, region.second)?;
        let new_revision = self.revision + 1;
        if let Err(e) = self.lines.splice(region.first, region.second, &new_units, new_revision) {
            self.state = ChangingState::Idle;
            return Err(e);
        }

        self.anchors.apply_change(region.first, region.second, inserted_end);
        let old_line_count = region.second.line - region.first.line + 1;
        let new_line_count = inserted_end.line - region.first.line + 1;
        self.bookmarker
            .apply_line_change(region.first.line, region.second.line, new_line_count);
        let partitioning_changed = self.partitioner.notify_change(region.first..inserted_end);
        if record_undo && !self.replaying_undo {
            self.undo.record(EditStep {
                start: region.first,
                old_units: old_units.clone(),
                new_units: new_units.clone(),
            });
        }
        self.revision = new_revision;

        self.state = ChangingState::Notifying;
        for l in self.prenotified_listeners.clone().iter() {
            if let Err(e) = l.document_changed(&change) {
                // Rollback: restore the erased text exactly as it was.
                let _ = self.lines.splice(region.first, inserted_end, &old_units, new_revision + 1);
                self.anchors.apply_change(region.first, inserted_end, region.second);
                self.bookmarker
                    .apply_line_change(region.first.line, inserted_end.line, old_line_count);
                let _ = self.partitioner.notify_change(region.first..region.second);
                if record_undo && !self.replaying_undo {
                    // The step we just recorded described a change that no longer happened.
                    self.undo.discard_last_recorded();
                }
                self.state = ChangingState::Idle;
                return Err(e);
            }
        }
        for l in self.listeners.clone().iter() {
            if let Err(e) = l.document_changed(&change) {
                eprintln!("document listener returned an error (ignored): {e}");
            }
        }
        if let Some(range) = partitioning_changed {
            let changed_region = Region::new(range.start, range.end);
            for l in self.prenotified_listeners.clone().iter() {
                l.document_partitioning_changed(&changed_region);
            }
            for l in self.listeners.clone().iter() {
                l.document_partitioning_changed(&changed_region);
            }
        }
        self.state = ChangingState::Idle;
        self.post_first_document_change();
        Ok(())
    }

    /// Fire [`FirstChangeListener::document_first_changed`] on every registered listener, but
    /// only the first time this is called since construction or the last [`Self::reset_content`].
    fn post_first_document_change(&mut self) {
        if self.had_first_change {
            return;
        }
        self.had_first_change = true;
        for l in self.first_change_listeners.clone() {
            l.document_first_changed();
        }
    }

    /// Discard all content, narrowing, anchors, bookmarks, and undo history, replacing it with a
    /// single empty line, and rearm the first-change signal. The revision counter keeps
    /// advancing rather than resetting to 0, since a reset is itself a change a listener
    /// comparing revisions needs to be able to observe.
    fn reset_content(&mut self) {
        self.lines = LineStore::new();
        self.anchors = AnchorRegistry::new();
        self.bookmarker = Bookmarker::new();
        self.narrowing = None;
        self.undo = UndoManager::new();
        self.revision += 1;
        self.last_unmodified_revision = self.revision;
        self.had_first_change = false;
    }

    fn apply_step(&mut self, step: &EditStep, record_undo: bool) -> Result<(), TextError> {
        let end = line_store::advance_position(step.start, &step.old_units);
        let region = Region::new(step.start, end);
        let text = String::from_utf16(&step.new_units)
            .map_err(|_| TextError::new(ErrorKind::MalformedInput, "UNDO_BAD_UTF16", "recorded undo text is not valid UTF-16"))?;
        self.replace_impl(region, &text, record_undo)
    }
}

/// Shared handle to a document. Cheap to clone (an `Rc`); every clone refers to the same
/// underlying content, listeners, and undo history.
#[derive(Clone)]
pub struct Document(Rc<RefCell<DocumentCore>>);

impl Document {
    pub fn new() -> Self {
        let core = DocumentCore {
            lines: LineStore::new(),
            anchors: AnchorRegistry::new(),
            bookmarker: Bookmarker::new(),
            partitioner: Box::new(NullPartitioner::new(Position::new(0, 0))),
            undo: UndoManager::new(),
            revision: 0,
            last_unmodified_revision: 0,
            read_only: false,
            narrowing: None,
            properties: HashMap::new(),
            prenotified_listeners: Vec::new(),
            listeners: Vec::new(),
            first_change_listeners: Vec::new(),
            had_first_change: false,
            input: None,
            state: ChangingState::Idle,
            replaying_undo: false,
        };
        Document(Rc::new(RefCell::new(core)))
    }

    fn borrow_mut_or_reject(&self) -> Result<std::cell::RefMut<'_, DocumentCore>, TextError> {
        self.0
            .try_borrow_mut()
            .map_err(|_| TextError::change_rejected("replace() called reentrantly from within a listener or input callback"))
    }

    pub fn revision(&self) -> u64 {
        self.0.borrow().revision
    }

    pub fn is_modified(&self) -> bool {
        let core = self.0.borrow();
        core.revision != core.last_unmodified_revision
    }

    pub fn mark_unmodified(&self) {
        let mut core = self.0.borrow_mut();
        core.last_unmodified_revision = core.revision;
    }

    pub fn is_read_only(&self) -> bool {
        self.0.borrow().read_only
    }

    pub fn set_read_only(&self, value: bool) {
        self.0.borrow_mut().read_only = value;
    }

    pub fn line_count(&self) -> usize {
        self.0.borrow().lines.line_count()
    }

    pub fn line_length(&self, line: usize) -> Option<usize> {
        self.0.borrow().lines.line(line).map(|l| l.units.len())
    }

    pub fn line_text(&self, line: usize) -> Option<String> {
        self.0
            .borrow()
            .lines
            .line(line)
            .map(|l| String::from_utf16_lossy(&l.units))
    }

    pub fn length(&self) -> usize {
        self.0.borrow().lines.total_units()
    }

    /// Raw UTF-16 code units spanning `region`, including any embedded line-terminator units.
    pub fn text_units_in_region(&self, region: Region) -> Result<Vec<u16>, TextError> {
        self.0.borrow().lines.units_in_range(region.first, region.second)
    }

    pub fn region(&self) -> Region {
        self.0.borrow().raw_region()
    }

    pub fn is_narrowed(&self) -> bool {
        self.0.borrow().narrowing.is_some()
    }

    pub fn accessible_region(&self) -> Region {
        self.0.borrow().accessible_region()
    }

    pub fn narrow_to_region(&self, region: Region) -> Result<(), TextError> {
        let mut core = self.0.borrow_mut();
        core.validate_region(region)?;
        core.narrowing = Some(region);
        Ok(())
    }

    pub fn widen(&self) {
        self.0.borrow_mut().narrowing = None;
    }

    pub fn property(&self, key: &str) -> Option<String> {
        self.0.borrow().properties.get(key).cloned()
    }

    pub fn set_property(&self, key: impl Into<String>, value: impl Into<String>) {
        self.0.borrow_mut().properties.insert(key.into(), value.into());
    }

    pub fn add_listener(&self, listener: Rc<dyn DocumentListener>) {
        self.0.borrow_mut().listeners.push(listener);
    }

    pub fn add_prenotified_listener(&self, listener: Rc<dyn DocumentListener>) {
        self.0.borrow_mut().prenotified_listeners.push(listener);
    }

    pub fn add_first_change_listener(&self, listener: Rc<dyn FirstChangeListener>) {
        self.0.borrow_mut().first_change_listeners.push(listener);
    }

    /// Discard all content and history, leaving a single empty line, as if the document had
    /// just been constructed. See [`DocumentCore::reset_content`] for exactly what is cleared.
    pub fn reset_content(&self) -> Result<(), TextError> {
        let mut core = self.borrow_mut_or_reject()?;
        core.reset_content();
        Ok(())
    }

    /// Enable or disable undo recording; disabling clears the undo/redo stacks outright (see
    /// [`UndoManager::set_records_changes`]).
    pub fn record_changes(&self, record: bool) {
        self.0.borrow_mut().undo.set_records_changes(record);
    }

    pub fn records_changes(&self) -> bool {
        self.0.borrow().undo.records_changes()
    }

    pub fn set_input(&self, input: Option<Rc<dyn DocumentInput>>) {
        self.0.borrow_mut().input = input;
    }

    pub fn set_partitioner(&self, partitioner: Box<dyn DocumentPartitioner>) {
        self.0.borrow_mut().partitioner = partitioner;
    }

    pub fn bookmarker(&self) -> Ref<'_, Bookmarker> {
        Ref::map(self.0.borrow(), |c| &c.bookmarker)
    }

    pub fn mark_bookmark(&self, line: usize) {
        self.0.borrow_mut().bookmarker.mark(line);
    }

    pub fn unmark_bookmark(&self, line: usize) {
        self.0.borrow_mut().bookmarker.unmark(line);
    }

    pub fn toggle_bookmark(&self, line: usize) -> bool {
        self.0.borrow_mut().bookmarker.toggle(line)
    }

    pub fn register_anchor(&self, position: Position, gravity: Gravity) -> AnchorHandle {
        self.0.borrow_mut().anchors.register(position, gravity)
    }

    pub fn unregister_anchor(&self, handle: AnchorHandle) {
        self.0.borrow_mut().anchors.unregister(handle);
    }

    pub fn anchor_position(&self, handle: AnchorHandle) -> Result<Position, TextError> {
        self.0.borrow().anchors.position(handle)
    }

    pub fn replace(&self, region: Region, text: &str) -> Result<(), TextError> {
        let mut core = self.borrow_mut_or_reject()?;
        core.replace_impl(region, text, true)
    }

    pub fn is_changing(&self) -> bool {
        !matches!(self.0.borrow().state, ChangingState::Idle)
    }

    pub fn begin_compound_change(&self) -> Result<(), TextError> {
        let mut core = self.borrow_mut_or_reject()?;
        core.undo.begin_compound_change();
        Ok(())
    }

    pub fn end_compound_change(&self) -> Result<(), TextError> {
        let mut core = self.borrow_mut_or_reject()?;
        core.undo.end_compound_change();
        Ok(())
    }

    pub fn insert_undo_boundary(&self) -> Result<(), TextError> {
        let mut core = self.borrow_mut_or_reject()?;
        core.undo.insert_undo_boundary();
        Ok(())
    }

    pub fn is_compound_changing(&self) -> bool {
        self.0.borrow().undo.is_compound_changing()
    }

    pub fn number_of_undoable_changes(&self) -> usize {
        self.0.borrow().undo.number_of_undoable_changes()
    }

    pub fn number_of_redoable_changes(&self) -> usize {
        self.0.borrow().undo.number_of_redoable_changes()
    }

    /// Undo the last `n` undoable units (fewer if the undo stack runs out first). Returns
    /// `Ok(())` as long as at least one unit was undone; with an empty stack and `n == 0` this
    /// is a no-op `Ok(())`, matching the original's `undo(0)` returning trivially.
    pub fn undo(&self, n: usize) -> Result<(), TextError> {
        let mut core = self.borrow_mut_or_reject()?;
        let mut undone_any = false;
        for _ in 0..n {
            let Some(unit) = core.undo.peek_undo().cloned() else {
                break;
            };
            let inverse = unit.inverse();
            core.replaying_undo = true;
            let result = (|| {
                for step in &inverse.steps {
                    core.apply_step(step, false)?;
                }
                Ok(())
            })();
            core.replaying_undo = false;
            result?;
            core.undo.confirm_undo();
            undone_any = true;
        }
        if n > 0 && !undone_any {
            return Err(TextError::no_such_element("no changes to undo"));
        }
        Ok(())
    }

    /// Redo the next `n` redoable units (fewer if the redo stack runs out first).
    pub fn redo(&self, n: usize) -> Result<(), TextError> {
        let mut core = self.borrow_mut_or_reject()?;
        let mut redone_any = false;
        for _ in 0..n {
            let Some(unit) = core.undo.peek_redo().cloned() else {
                break;
            };
            core.replaying_undo = true;
            let result = (|| {
                for step in &unit.steps {
                    core.apply_step(step, false)?;
                }
                Ok(())
            })();
            core.replaying_undo = false;
            result?;
            core.undo.confirm_redo();
            redone_any = true;
        }
        if n > 0 && !redone_any {
            return Err(TextError::no_such_element("no changes to redo"));
        }
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
