//! Word boundaries (a curated subset of UAX #29 WB1-WB13), following the same "advance the
//! cursor, ask a pairwise predicate" shape as [`super::grapheme`], grounded on the same
//! `break-iterator.cpp` source's `WordBreakIteratorBase::nextBase` look-ahead idiom ("advance
//! past any Extend/Format characters before classifying").
//!
//! Beyond the base pairwise rules, this iterator does three things `nextBase` also does:
//! skips Extend/Format characters with a two-base-character look-ahead before applying WB6/WB7
//! (so `"can't"` doesn't see the apostrophe's *neighbour* as the combining mark that follows it),
//! optionally fuses a letter-adjacent colon the way Swedish abbreviations like `"k:a"` expect,
//! and optionally consults a [`IdentifierSyntax`] so that content-type-specific identifier
//! characters (e.g. `$`/`_` in a code partition) count as `ALetter` even when the Unicode
//! property table alone would not classify them that way.

use super::tables::{word_class, WordClass as WC};
use super::{BreakIterator, Direction};
use crate::char_iter::CharacterCursor;
use crate::document::IdentifierSyntax;

/// True if a word boundary may fall between a character classified `before` and one classified
/// `after`.
pub fn is_boundary(before: Option<WC>, after: Option<WC>) -> bool {
    let (before, after) = match (before, after) {
        (Some(b), Some(a)) => (b, a),
        _ => return true,
    };
    match (before, after) {
        // WB3: CR x LF
        (WC::CrOrLf, WC::CrOrLf) => false,
        (WC::CrOrLf | WC::Newline, _) | (_, WC::CrOrLf | WC::Newline) => true,
        // WB4: ignore Extend/Format when forming the other rules (handled by caller look-ahead)
        (_, WC::Extend) => false,
        // WB5: ALetter x ALetter
        (WC::ALetter, WC::ALetter) => false,
        // WB6/WB7: ALetter x (MidLetter|MidNumLet) x ALetter — approximated as non-breaking on
        // either side of the mid-character, since this predicate only sees one pair at a time.
        (WC::ALetter, WC::MidLetter | WC::MidNumLet) => false,
        (WC::MidLetter | WC::MidNumLet, WC::ALetter) => false,
        // WB8: Numeric x Numeric
        (WC::Numeric, WC::Numeric) => false,
        // WB9: ALetter x Numeric
        (WC::ALetter, WC::Numeric) => false,
        // WB10: Numeric x ALetter
        (WC::Numeric, WC::ALetter) => false,
        // WB11/WB12: Numeric x (MidNum|MidNumLet) x Numeric
        (WC::Numeric, WC::MidNum | WC::MidNumLet) => false,
        (WC::MidNum | WC::MidNumLet, WC::Numeric) => false,
        // WB13: Katakana x Katakana
        (WC::Katakana, WC::Katakana) => false,
        // WB13a/WB13b: (ALetter|Numeric|Katakana|ExtendNumLet) x ExtendNumLet and reverse
        (WC::ALetter | WC::Numeric | WC::Katakana, WC::ExtendNumLet) => false,
        (WC::ExtendNumLet, WC::ALetter | WC::Numeric | WC::Katakana) => false,
        _ => true,
    }
}

/// Bit flags describing the segment a word boundary sits between, mirroring the status mask the
/// original reports alongside each boundary it finds.
pub mod component {
    /// The boundary starts a new segment (there is a character ahead of it).
    pub const START_OF_SEGMENT: u8 = 1 << 0;
    /// The boundary ends the previous segment (there is a character behind it).
    pub const END_OF_SEGMENT: u8 = 1 << 1;
    /// The segment beginning at this boundary is a word proper (letters, digits, Katakana, or
    /// an `ExtendNumLet` joiner), as opposed to whitespace or punctuation.
    pub const ALPHANUMERIC: u8 = 1 << 2;
}

fn is_alphanumeric_class(c: WC) -> bool {
    matches!(c, WC::ALetter | WC::Numeric | WC::Katakana | WC::ExtendNumLet)
}

pub struct WordBreakIterator<'c, C: CharacterCursor> {
    cursor: &'c mut C,
    swedish_colon: bool,
    identifier_syntax: Option<IdentifierSyntax>,
}

impl<'c, C: CharacterCursor> WordBreakIterator<'c, C> {
    pub fn new(cursor: &'c mut C) -> Self {
        Self {
            cursor,
            swedish_colon: false,
            identifier_syntax: None,
        }
    }

    /// Construct with a locale-specific colon rule and/or a content-type's identifier syntax.
    pub fn with_options(cursor: &'c mut C, swedish_colon: bool, identifier_syntax: Option<IdentifierSyntax>) -> Self {
        Self {
            cursor,
            swedish_colon,
            identifier_syntax,
        }
    }

    /// Classify `ch` the way this iterator's options say to: the identifier syntax (if any)
    /// promotes its own continuation characters to `ALetter`, and the Swedish-colon option
    /// promotes `:` to `MidLetter` so it glues to surrounding letters like `"k:a"` expects.
    fn classify(&self, ch: char) -> WC {
        if let Some(syntax) = &self.identifier_syntax {
            if (syntax.continue_)(ch) {
                return WC::ALetter;
            }
        }
        if self.swedish_colon && ch == ':' {
            return WC::MidLetter;
        }
        word_class(ch)
    }

    /// Classify the characters immediately behind and ahead of the cursor, restoring its
    /// position before returning.
    fn classes_around(&mut self) -> (Option<WC>, Option<WC>) {
        let after = self.cursor.current().map(|c| self.classify(c));
        let before = self.cursor.previous().map(|c| self.classify(c));
        if before.is_some() {
            self.cursor.next();
        }
        (before, after)
    }

    /// Bit mask (see [`component`]) describing the boundary at the cursor's current position.
    /// Returns `0` if the cursor does not currently sit on a boundary.
    pub fn component_mask(&mut self) -> u8 {
        let (before, after) = self.classes_around();
        if !is_boundary(before, after) {
            return 0;
        }
        let mut mask = 0u8;
        if before.is_some() {
            mask |= component::END_OF_SEGMENT;
        }
        if after.is_some() {
            mask |= component::START_OF_SEGMENT;
        }
        if after.map(is_alphanumeric_class).unwrap_or(false) {
            mask |= component::ALPHANUMERIC;
        }
        mask
    }
}

impl<'c, C: CharacterCursor> BreakIterator for WordBreakIterator<'c, C> {
    fn advance(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => {
                if self.cursor.is_last() {
                    return false;
                }
                let mut before = self.cursor.current().map(|c| self.classify(c));
                loop {
                    let raw = self.cursor.next();
                    let after = raw.map(|c| self.classify(c));
                    if after.is_none() {
                        return true;
                    }
                    // WB4 look-ahead: Extend/Format glues to the preceding base character and
                    // never itself becomes the "before" class the next pair is judged against.
                    if matches!(after, Some(WC::Extend)) {
                        continue;
                    }
                    if is_boundary(before, after) {
                        return true;
                    }
                    before = after;
                }
            }
            Direction::Backward => {
                if self.cursor.is_first() {
                    return false;
                }
                let mut after = self.cursor.current().map(|c| self.classify(c));
                loop {
                    let raw = self.cursor.previous();
                    let before = raw.map(|c| self.classify(c));
                    if before.is_none() {
                        return true;
                    }
                    if matches!(before, Some(WC::Extend)) {
                        continue;
                    }
                    if is_boundary(before, after) {
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
#[path = "word_tests.rs"]
mod tests;
