//! Grapheme cluster boundaries (UAX #29 rules GB1-GB999), ported from
//! `GraphemeBreakIteratorBase::next`/`previous`/`isBoundary` in
//! `original_source/ascension/src/corelib/text/break-iterator.cpp`.

use super::tables::{grapheme_class, GraphemeClass as GC};
use super::{BreakIterator, Direction};
use crate::char_iter::CharacterCursor;

/// True if a grapheme cluster boundary may sit between a character classified `before` and one
/// classified `after`. `None` on either side means "start or end of text", which is always a
/// boundary (GB1, GB2).
///
/// Regional indicator pairing (GB12/GB13, which alternates whether a boundary falls between an
/// even or odd run of flag characters) and emoji modifier sequences (GB11) are approximated:
/// this crate treats any `RegionalIndicator x RegionalIndicator` pair as non-breaking, which
/// keeps two-codepoint flag sequences intact but merges longer runs of regional indicators into
/// a single cluster instead of pairing them off. Recorded as a scope decision in DESIGN.md.
pub fn is_boundary(before: Option<GC>, after: Option<GC>) -> bool {
    let (before, after) = match (before, after) {
        (Some(b), Some(a)) => (b, a),
        _ => return true,
    };
    match (before, after) {
        // GB3: CR x LF
        (GC::Cr, GC::Lf) => false,
        // GB4: (Control|CR|LF) -:- any (break after)
        (GC::Control | GC::Cr | GC::Lf, _) => true,
        // GB5: any -:- (Control|CR|LF) (break before)
        (_, GC::Control | GC::Cr | GC::Lf) => true,
        // GB6: L x (L|V|LV|LVT)
        (GC::L, GC::L | GC::V | GC::Lv | GC::Lvt) => false,
        // GB7: (LV|V) x (V|T)
        (GC::Lv | GC::V, GC::V | GC::T) => false,
        // GB8: (LVT|T) x T
        (GC::Lvt | GC::T, GC::T) => false,
        // GB9: any x (Extend|ZWJ)
        (_, GC::Extend | GC::ZeroWidthJoiner) => false,
        // GB9a: any x SpacingMark
        (_, GC::SpacingMark) => false,
        // GB12/GB13 (approximated, see doc comment above)
        (GC::RegionalIndicator, GC::RegionalIndicator) => false,
        // GB999: otherwise break
        _ => true,
    }
}

/// Walks a [`CharacterCursor`] to the next/previous grapheme cluster boundary.
pub struct GraphemeBreakIterator<'c, C: CharacterCursor> {
    cursor: &'c mut C,
}

impl<'c, C: CharacterCursor> GraphemeBreakIterator<'c, C> {
    pub fn new(cursor: &'c mut C) -> Self {
        Self { cursor }
    }

    /// Classify the characters immediately behind and ahead of the cursor, restoring the
    /// cursor's position before returning.
    fn classes_around(&mut self) -> (Option<GC>, Option<GC>) {
        let after = self.cursor.current().map(grapheme_class);
        let before = self.cursor.previous().map(grapheme_class);
        if before.is_some() {
            self.cursor.next();
        }
        (before, after)
    }
}

impl<'c, C: CharacterCursor> BreakIterator for GraphemeBreakIterator<'c, C> {
    fn advance(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => {
                if self.cursor.is_last() {
                    return false;
                }
                let mut before = self.cursor.current().map(grapheme_class);
                loop {
                    let after = self.cursor.next().map(grapheme_class);
                    if is_boundary(before, after) || after.is_none() {
                        return true;
                    }
                    before = after;
                }
            }
            Direction::Backward => {
                if self.cursor.is_first() {
                    return false;
                }
                let mut after = self.cursor.current().map(grapheme_class);
                loop {
                    let before = self.cursor.previous().map(grapheme_class);
                    if is_boundary(before, after) || before.is_none() {
                        return true;
                    }
                    after = before;
                }
            }
        }
    }

    fn is_boundary(&mut self) -> bool {
        let (before, after) = self.classes_around();
        is_boundary(before, after)
    }
}

#[cfg(test)]
#[path = "grapheme_tests.rs"]
mod tests;
