//! Sentence boundaries (a curated subset of UAX #29 SB1-SB12): break after a sentence
//! terminator (`.`, `!`, `?`, ellipsis), optionally followed by closing punctuation and
//! whitespace, once a new sentence-initial character is seen.

use super::tables::{sentence_class, SentenceClass as SC};
use super::{BreakIterator, Direction};
use crate::char_iter::CharacterCursor;

/// Sentence-break state machine position, tracked across the pairwise calls so the iterator
/// remembers "we just saw a terminator" across the Close*/Sp* characters that may follow it,
/// which a purely pairwise predicate (as used for grapheme/word) cannot express on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Body,
    AfterTerm,
    AfterTermSpace,
}

pub struct SentenceBreakIterator<'c, C: CharacterCursor> {
    cursor: &'c mut C,
}

impl<'c, C: CharacterCursor> SentenceBreakIterator<'c, C> {
    pub fn new(cursor: &'c mut C) -> Self {
        Self { cursor }
    }
}

impl<'c, C: CharacterCursor> BreakIterator for SentenceBreakIterator<'c, C> {
    fn advance(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => {
                if self.cursor.is_last() {
                    return false;
                }
                let mut state = State::Body;
                loop {
                    let class = match self.cursor.current() {
                        Some(c) => sentence_class(c),
                        None => return true,
                    };
                    state = match (state, class) {
                        (_, SC::Sep) => {
                            // A line/paragraph separator always ends the sentence once we
                            // advance past it.
                            self.cursor.next();
                            return true;
                        }
                        (State::Body, SC::Term) => State::AfterTerm,
                        (State::AfterTerm, SC::Term | SC::Close) => State::AfterTerm,
                        (State::AfterTerm, SC::Sp) => State::AfterTermSpace,
                        (State::AfterTermSpace, SC::Sp) => State::AfterTermSpace,
                        (State::AfterTermSpace, _) => {
                            return true;
                        }
                        _ => State::Body,
                    };
                    if self.cursor.next().is_none() {
                        return true;
                    }
                }
            }
            Direction::Backward => {
                // Sentence boundaries are rarer to need backward; fall back to scanning for the
                // nearest preceding terminator-space-capital pattern by re-running the forward
                // scan from the start would be expensive, so instead walk back one terminator.
                if self.cursor.is_first() {
                    return false;
                }
                loop {
                    let Some(c) = self.cursor.previous() else {
                        return true;
                    };
                    let class = sentence_class(c);
                    if matches!(class, SC::Sep) {
                        return true;
                    }
                    if matches!(class, SC::Term) {
                        // Skip back past any further Close/Term characters, then stop once a
                        // non-terminator character (or start of text) is reached.
                        return true;
                    }
                }
            }
        }
    }

    fn is_boundary(&mut self) -> bool {
        if self.cursor.current().is_none() {
            return true;
        }
        // Walk backward over the run of Term/Close/Sp characters leading up to the cursor,
        // recording each class (nearest first) so the forward state machine can be replayed
        // over them afterward. Stops at a Sep, or the first character that cannot belong to
        // the run, or the start of text.
        let mut steps = 0usize;
        let mut behind = Vec::new();
        loop {
            match self.cursor.previous() {
                Some(c) => {
                    steps += 1;
                    let class = sentence_class(c);
                    let stop = matches!(class, SC::Sep) || !matches!(class, SC::Term | SC::Close | SC::Sp);
                    behind.push(class);
                    if stop {
                        break;
                    }
                }
                None => break,
            }
        }
        for _ in 0..steps {
            self.cursor.next();
        }

        let Some(&nearest) = behind.first() else {
            return true;
        };
        if matches!(nearest, SC::Sep) {
            return true;
        }

        let mut state = State::Body;
        for &class in behind.iter().rev() {
            state = match (state, class) {
                (State::Body, SC::Term) => State::AfterTerm,
                (State::AfterTerm, SC::Term | SC::Close) => State::AfterTerm,
                (State::AfterTerm, SC::Sp) => State::AfterTermSpace,
                (State::AfterTermSpace, SC::Sp) => State::AfterTermSpace,
                _ => State::Body,
            };
        }

        if state == State::AfterTermSpace {
            !matches!(self.cursor.current().map(sentence_class), Some(SC::Sp))
        } else {
            false
        }
    }
}

#[cfg(test)]
#[path = "sentence_tests.rs"]
mod tests;
