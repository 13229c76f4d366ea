//! Anchors: document positions that move themselves in response to edits.
//!
//! Grounded on `ascension::kernel::Point` (`original_source/ascension/src/kernel/point.cpp`).
//! The original models an anchor as an object that holds a raw back-pointer to its owning
//! `Document` and registers/unregisters itself in the document's `std::set<Point*>` on
//! construction/destruction — a reference cycle that has no direct Rust translation. Per the
//! redesign note for this component, the registry is inverted: the [`Document`] (see
//! `crate::document`) owns an [`AnchorRegistry`] and hands out [`AnchorHandle`]s (small,
//! `Copy`, generation-checked indices) instead of letting anchors point back at their document.

use crate::error::TextError;
use crate::line_store::LinePosition;

/// Which side of an edit boundary an anchor prefers to stay on.
///
/// When text is inserted exactly at an anchor's position: a `Forward`-gravity anchor is pushed
/// to the far side of the inserted text (its position advances by the inserted length);
/// a `Backward`-gravity anchor stays before the inserted text (its position is unchanged). This
/// mirrors `ascension::kernel::Direction`-keyed gravity used by `Point::setGravity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gravity {
    Forward,
    Backward,
}

impl Default for Gravity {
    fn default() -> Self {
        Gravity::Forward
    }
}

/// A lightweight, `Copy` reference to a registered anchor. Stale after the anchor is
/// unregistered; using a stale handle returns [`crate::error::ErrorKind::NoSuchElement`] rather
/// than panicking, since a dangling raw pointer is exactly what this design is meant to avoid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorHandle {
    index: usize,
    generation: u64,
}

struct Slot {
    generation: u64,
    occupied: bool,
    position: LinePosition,
    gravity: Gravity,
}

/// Hook a client can implement to observe (and veto) an anchor's own movements. Replaces the
/// original's virtual `aboutToMove`/`moved` methods on `Point` subclasses (`VisualPoint`,
/// `Caret`, ...) with a capability trait, per the "deep inheritance -> capability trait"
/// redesign note.
pub trait AnchorObserver {
    /// Called before the anchor moves to `to`. Returning `Err` vetoes the move; the anchor
    /// stays at its current position. Must not fail for reasons other than rejecting the move.
    fn about_to_move(&self, _handle: AnchorHandle, _to: LinePosition) -> Result<(), TextError> {
        Ok(())
    }

    /// Called after the anchor has moved away from `from`.
    fn moved(&self, _handle: AnchorHandle, _from: LinePosition) {}
}

/// Registry of every anchor currently alive for one document. Owned by
/// [`crate::document::Document`]; never shared between documents.
#[derive(Default)]
pub struct AnchorRegistry {
    slots: Vec<Slot>,
    free: Vec<usize>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, position: LinePosition, gravity: Gravity) -> AnchorHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.occupied = true;
            slot.position = position;
            slot.gravity = gravity;
            AnchorHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                occupied: true,
                position,
                gravity,
            });
            AnchorHandle {
                index,
                generation: 0,
            }
        }
    }

    pub fn unregister(&mut self, handle: AnchorHandle) {
        if let Some(slot) = self.slots.get_mut(handle.index) {
            if slot.occupied && slot.generation == handle.generation {
                slot.occupied = false;
                slot.generation += 1;
            }
        }
    }

    fn slot(&self, handle: AnchorHandle) -> Result<&Slot, TextError> {
        self.slots
            .get(handle.index)
            .filter(|s| s.occupied && s.generation == handle.generation)
            .ok_or_else(|| TextError::no_such_element("anchor handle is stale or unregistered"))
    }

    pub fn position(&self, handle: AnchorHandle) -> Result<LinePosition, TextError> {
        self.slot(handle).map(|s| s.position)
    }

    pub fn gravity(&self, handle: AnchorHandle) -> Result<Gravity, TextError> {
        self.slot(handle).map(|s| s.gravity)
    }

    pub fn set_gravity(&mut self, handle: AnchorHandle, gravity: Gravity) -> Result<(), TextError> {
        let index = handle.index;
        let generation = handle.generation;
        match self.slots.get_mut(index) {
            Some(s) if s.occupied && s.generation == generation => {
                s.gravity = gravity;
                Ok(())
            }
            _ => Err(TextError::no_such_element("anchor handle is stale or unregistered")),
        }
    }

    /// Apply the effect of a change (a region `[change_start, change_end)` replaced by text of
    /// new length spanning to `change_new_end`) to every live anchor, honoring gravity. This is
    /// the direct analogue of `positions::updatePosition` referenced from
    /// `ascension::kernel::Point::update`, whose body was not present in the retrieved source,
    /// so the five-way rule is taken from the textual specification of this component instead
    /// of transcribed code:
    ///
    /// * Anchor strictly before `change_start`: unaffected.
    /// * Anchor strictly after `change_end`: shifted by the same delta the edit applied.
    /// * Anchor exactly at `change_start` with `Backward` gravity: unaffected (stays before the
    ///   insertion/replacement).
    /// * Anchor exactly at `change_end` with `Forward` gravity: shifted to `change_new_end`
    ///   (stays after the insertion/replacement).
    /// * Anchor strictly inside `(change_start, change_end)`, or at a boundary with the gravity
    ///   that pulls it along: clamped to `change_new_end` (the position it occupied has been
    ///   overwritten).
    pub fn apply_change(
        &mut self,
        change_start: LinePosition,
        change_end: LinePosition,
        change_new_end: LinePosition,
    ) {
        for slot in self.slots.iter_mut().filter(|s| s.occupied) {
            slot.position = updated_position(
                slot.position,
                slot.gravity,
                change_start,
                change_end,
                change_new_end,
            );
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnchorHandle, LinePosition)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.occupied.then(|| {
                (
                    AnchorHandle {
                        index: i,
                        generation: s.generation,
                    },
                    s.position,
                )
            })
        })
    }
}

fn updated_position(
    position: LinePosition,
    gravity: Gravity,
    change_start: LinePosition,
    change_end: LinePosition,
    change_new_end: LinePosition,
) -> LinePosition {
    if position < change_start {
        return position;
    }
    if position == change_start {
        return match gravity {
            Gravity::Backward => position,
            Gravity::Forward => change_new_end,
        };
    }
    if position > change_end {
        return shift_after(position, change_end, change_new_end);
    }
    if position == change_end {
        // Either gravity lands here: Forward because it was pulled along by deletion of
        // everything up to this point, Backward because it prefers the far side of the edit.
        return change_new_end;
    }
    // Strictly inside the replaced region: the text it pointed into no longer exists.
    change_new_end
}

/// Re-express a position known to be after `old_end` in terms of `new_end`, preserving its
/// offset from the tail of the change when it is on the same line, or its line delta otherwise.
fn shift_after(position: LinePosition, old_end: LinePosition, new_end: LinePosition) -> LinePosition {
    if position.line == old_end.line {
        let delta = position.offset - old_end.offset;
        LinePosition::new(new_end.line, new_end.offset + delta)
    } else {
        let line_delta = position.line as isize - old_end.line as isize;
        let new_line = (new_end.line as isize + line_delta) as usize;
        LinePosition::new(new_line, position.offset)
    }
}
