//! Bidirectional character iterator.
//!
//! Grounded on the document-walking shape of `monster-rift::buffer::api::BufferView::iter_at`
//! (code-point indexed, chunk-aware) but reworked into a true bidirectional cursor: break
//! iterators (`crate::text_break`) need to step backward as readily as forward, which the
//! teacher's forward-only `CharIter` does not support.
//!
//! Two implementors are provided: [`StringCharacterIterator`] over a bare `&[u16]` slice (handy
//! for tests and for searching inside a single replacement string), and
//! [`DocumentCharacterIterator`] over a [`crate::line_store::LineStore`], which walks across
//! line boundaries by synthesizing the terminator's code units on the fly.

use crate::line_store::{LinePosition, LineStore};

/// A cursor over a sequence of Unicode scalar values that can move in either direction.
/// `current()` returns the character the cursor is positioned *on*; `next()`/`previous()` move
/// the cursor and return the character it lands on, or `None` at either end.
pub trait CharacterCursor {
    fn current(&self) -> Option<char>;
    fn next(&mut self) -> Option<char>;
    fn previous(&mut self) -> Option<char>;
    fn is_first(&self) -> bool;
    fn is_last(&self) -> bool;

    /// Rewind to the start of the underlying sequence and return the first character, if any.
    fn first(&mut self) -> Option<char>;

    /// Jump to the last character of the underlying sequence and return it. Leaves the cursor
    /// positioned *on* that character, not past it.
    fn last(&mut self) -> Option<char>;

    /// Absolute code-unit offset of the cursor from the start of its underlying sequence. For
    /// [`DocumentCharacterIterator`] this flattens the line+offset position into one document-
    /// wide code-unit count, so cursors over different lines remain comparable.
    fn tell(&self) -> usize;

    /// True if both cursors sit at the same absolute position.
    fn equal(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.tell() == other.tell()
    }

    /// True if this cursor sits strictly before `other`.
    fn less(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.tell() < other.tell()
    }
}

/// Iterate the scalar values of a borrowed UTF-16 slice.
#[derive(Clone)]
pub struct StringCharacterIterator<'a> {
    units: &'a [u16],
    offset: usize,
}

impl<'a> StringCharacterIterator<'a> {
    pub fn new(units: &'a [u16]) -> Self {
        Self { units, offset: 0 }
    }

    pub fn at(units: &'a [u16], offset: usize) -> Self {
        Self { units, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl<'a> CharacterCursor for StringCharacterIterator<'a> {
    fn current(&self) -> Option<char> {
        crate::codec::utf16::decode(&self.units[self.offset..])
            .ok()
            .map(|(c, _)| c)
    }

    fn next(&mut self) -> Option<char> {
        let (_, len) = crate::codec::utf16::decode(&self.units[self.offset..]).ok()?;
        self.offset += len;
        self.current()
    }

    fn previous(&mut self) -> Option<char> {
        let (c, len) = crate::codec::utf16::decode_back(self.units, self.offset).ok()?;
        self.offset -= len;
        Some(c)
    }

    fn is_first(&self) -> bool {
        self.offset == 0
    }

    fn is_last(&self) -> bool {
        self.offset >= self.units.len()
    }

    fn first(&mut self) -> Option<char> {
        self.offset = 0;
        self.current()
    }

    fn last(&mut self) -> Option<char> {
        self.offset = self.units.len();
        self.previous()
    }

    fn tell(&self) -> usize {
        self.offset
    }
}

/// Iterate the scalar values of a whole document, line terminators included, by line+offset
/// position. Supplementary-plane characters and CRLF are each stepped over atomically.
#[derive(Clone)]
pub struct DocumentCharacterIterator<'a> {
    store: &'a LineStore,
    line: usize,
    offset: usize,
    line_units: Vec<u16>,
}

impl<'a> DocumentCharacterIterator<'a> {
    pub fn new(store: &'a LineStore) -> Self {
        Self::at(store, LinePosition::new(0, 0))
    }

    pub fn at(store: &'a LineStore, pos: LinePosition) -> Self {
        let line_units = Self::raw_units(store, pos.line);
        Self {
            store,
            line: pos.line,
            offset: pos.offset,
            line_units,
        }
    }

    pub fn position(&self) -> LinePosition {
        LinePosition::new(self.line, self.offset)
    }

    fn raw_units(store: &LineStore, line: usize) -> Vec<u16> {
        let Some(record) = store.line(line) else {
            return Vec::new();
        };
        let mut units = record.units.clone();
        units.extend_from_slice(record.terminator.units());
        units
    }

    fn reload(&mut self) {
        self.line_units = Self::raw_units(self.store, self.line);
    }
}

impl<'a> CharacterCursor for DocumentCharacterIterator<'a> {
    fn current(&self) -> Option<char> {
        if self.offset >= self.line_units.len() {
            return None;
        }
        crate::codec::utf16::decode(&self.line_units[self.offset..])
            .ok()
            .map(|(c, _)| c)
    }

    fn next(&mut self) -> Option<char> {
        if self.offset < self.line_units.len() {
            if let Ok((_, len)) = crate::codec::utf16::decode(&self.line_units[self.offset..]) {
                self.offset += len;
            }
        }
        if self.offset >= self.line_units.len() {
            if self.line + 1 < self.store.line_count() {
                self.line += 1;
                self.offset = 0;
                self.reload();
            } else {
                return None;
            }
        }
        self.current()
    }

    fn previous(&mut self) -> Option<char> {
        if self.offset == 0 {
            if self.line == 0 {
                return None;
            }
            self.line -= 1;
            self.reload();
            self.offset = self.line_units.len();
        }
        let (c, len) = crate::codec::utf16::decode_back(&self.line_units, self.offset).ok()?;
        self.offset -= len;
        Some(c)
    }

    fn is_first(&self) -> bool {
        self.line == 0 && self.offset == 0
    }

    fn is_last(&self) -> bool {
        self.line + 1 >= self.store.line_count() && self.offset >= self.line_units.len()
    }

    fn first(&mut self) -> Option<char> {
        self.line = 0;
        self.offset = 0;
        self.reload();
        self.current()
    }

    fn last(&mut self) -> Option<char> {
        self.line = self.store.line_count().saturating_sub(1);
        self.reload();
        self.offset = self.line_units.len();
        self.previous()
    }

    fn tell(&self) -> usize {
        self.store.position_to_offset(self.position()).unwrap_or(0)
    }
}
