//! Text search: literal (Boyer-Moore-Horspool) and regular-expression matching over a document,
//! plus a stateful incremental-search session.
//!
//! Grounded on `ascension::searcher::TextSearcher`/`IncrementalSearcher`
//! (`original_source/ascension/ascension/kernel/searcher.hpp`). The regex backend is the
//! teacher crate's own dependency, `monster-regex` (`Monster0506-rift/src/search/mod.rs` already
//! wraps it as `RiftRegex`/`compile_regex`); this module keeps using the backtracking engine the
//! teacher falls back to for anything with anchors or lookaround, and does not carry over the
//! teacher's linear-engine fast path or its `BufferView`-streaming `Haystack` — this kernel
//! searches a materialized `Vec<u16>` snapshot of the scope instead, which is simpler and
//! sufficient at kernel scale (no on-screen buffer to stream from). Case-insensitive matching is
//! ASCII-only for the same reason the teacher's own Tier 1 literal search is (see its
//! `find_literal_ignore_case` comments): full Unicode case folding can change a match's length,
//! which a fixed-width skip table cannot account for.

pub mod incremental;
pub mod literal;

use std::collections::VecDeque;

use crate::anchor::Gravity;
use crate::document::{Document, Region};
use crate::error::{ErrorKind, TextError};
use crate::line_store::{self, LinePosition};
use literal::LiteralPattern;

pub use incremental::{IncrementalSearcher, SearchResult, WrapStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub start: LinePosition,
    pub end: LinePosition,
}

type Engine = monster_regex::engine::backtracking::BacktrackingRegexEngine;

struct RegexPattern {
    source: String,
    case_sensitive: bool,
    regex: monster_regex::Regex<Engine>,
}

/// A compiled search pattern: either a literal string matched with Boyer-Moore-Horspool, or a
/// regular expression compiled by `monster-regex`.
pub enum Pattern {
    Literal(LiteralPattern),
    Regex(RegexPattern),
}

impl Pattern {
    pub fn literal(text: &str, case_sensitive: bool) -> Self {
        Pattern::Literal(LiteralPattern::new(text, case_sensitive))
    }

    pub fn regex(source: &str, case_sensitive: bool) -> Result<Self, TextError> {
        let flags = monster_regex::Flags {
            multiline: true,
            ..Default::default()
        };
        let regex = monster_regex::Regex::<Engine>::new(source, flags)
            .map_err(|e| TextError::new(ErrorKind::PatternSyntax, "REGEX_COMPILE_ERROR", format!("{e:?}")))?;
        Ok(Pattern::Regex(RegexPattern {
            source: source.to_string(),
            case_sensitive,
            regex,
        }))
    }

    pub fn is_case_sensitive(&self) -> bool {
        match self {
            Pattern::Literal(p) => p.is_case_sensitive(),
            Pattern::Regex(p) => p.case_sensitive,
        }
    }

    fn source_text(&self) -> String {
        match self {
            Pattern::Literal(_) => String::new(),
            Pattern::Regex(p) => p.source.clone(),
        }
    }
}

/// Default and minimum sizes of the stored-pattern/stored-replacement history, mirroring
/// `TextSearcher::DEFAULT_NUMBER_OF_STORED_STRINGS`/`MINIMUM_NUMBER_OF_STORED_STRINGS`.
pub const DEFAULT_MAX_STORED_STRINGS: usize = 16;
pub const MINIMUM_MAX_STORED_STRINGS: usize = 4;

struct LastResult {
    revision: u64,
    matched: Option<SearchMatch>,
}

/// What to do with one candidate match during an interactive [`TextSearcher::replace_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceAction {
    /// Replace this match, then keep asking about the next one.
    Replace,
    /// Leave this match alone, then keep asking about the next one.
    Skip,
    /// Replace this match and every remaining match, without asking again.
    ReplaceAll,
    /// Replace this match, then stop.
    ReplaceAndExit,
    /// Undo the previous replacement and re-offer the match it covered.
    Undo,
    /// Stop without touching this match.
    Exit,
}

/// Callback driving an interactive replace-all: asked once per candidate match, in document
/// order, for what to do with it.
pub trait ReplaceAllCallback {
    fn on_match(&mut self, document: &Document, matched: SearchMatch) -> ReplaceAction;
}

/// Owns the current search pattern, condition, and a bounded history of previously used
/// patterns/replacements. One instance is typically shared across repeated "find next" actions.
pub struct TextSearcher {
    pattern: Option<Pattern>,
    stored_patterns: VecDeque<String>,
    stored_replacements: VecDeque<String>,
    max_stored: usize,
    last_result: Option<LastResult>,
    replacement_aborted: bool,
}

impl TextSearcher {
    pub fn new() -> Self {
        Self {
            pattern: None,
            stored_patterns: VecDeque::new(),
            stored_replacements: VecDeque::new(),
            max_stored: DEFAULT_MAX_STORED_STRINGS,
            last_result: None,
            replacement_aborted: false,
        }
    }

    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn number_of_stored_patterns(&self) -> usize {
        self.stored_patterns.len()
    }

    pub fn number_of_stored_replacements(&self) -> usize {
        self.stored_replacements.len()
    }

    pub fn stored_pattern(&self, index: usize) -> Option<&str> {
        self.stored_patterns.get(index).map(String::as_str)
    }

    pub fn stored_replacement(&self, index: usize) -> Option<&str> {
        self.stored_replacements.get(index).map(String::as_str)
    }

    pub fn set_maximum_number_of_stored_strings(&mut self, n: usize) {
        self.max_stored = n.max(MINIMUM_MAX_STORED_STRINGS);
        while self.stored_patterns.len() > self.max_stored {
            self.stored_patterns.pop_back();
        }
        while self.stored_replacements.len() > self.max_stored {
            self.stored_replacements.pop_back();
        }
    }

    /// Install a new active pattern. Unless `dont_remember`, pushes its source text to the
    /// front of the pattern history (regex patterns only; literal one-off searches are not
    /// remembered since they rarely repeat verbatim).
    pub fn set_pattern(&mut self, pattern: Pattern, dont_remember: bool) {
        if !dont_remember {
            let text = pattern.source_text();
            if !text.is_empty() {
                self.push_history(text, false);
            }
        }
        self.pattern = Some(pattern);
        self.last_result = None;
    }

    pub fn push_replacement(&mut self, text: impl Into<String>) {
        self.push_history(text.into(), true);
    }

    fn push_history(&mut self, text: String, for_replacements: bool) {
        let list = if for_replacements {
            &mut self.stored_replacements
        } else {
            &mut self.stored_patterns
        };
        list.retain(|s| s != &text);
        list.push_front(text);
        while list.len() > self.max_stored {
            list.pop_back();
        }
    }

    pub fn is_last_pattern_matched(&self) -> bool {
        self.last_result.as_ref().is_some_and(|r| r.matched.is_some())
    }

    /// Search `document` within `scope` for the active pattern, starting at `from`. Returns
    /// `Ok(None)` if nothing matched; never wraps around `scope` itself (callers implement
    /// wraparound by re-invoking with `scope.first`/`scope.second` as `from`).
    pub fn search(
        &mut self,
        document: &Document,
        from: LinePosition,
        scope: Region,
        direction: SearchDirection,
    ) -> Result<Option<SearchMatch>, TextError> {
        let pattern = self
            .pattern
            .as_ref()
            .ok_or_else(|| TextError::no_such_element("no search pattern is set"))?;

        let haystack = document.text_units_in_region(scope)?;
        let from_offset = offset_within(&haystack, scope.first, from);

        let found = match (pattern, direction) {
            (Pattern::Literal(p), SearchDirection::Forward) => p.search_forward(&haystack, from_offset),
            (Pattern::Literal(p), SearchDirection::Backward) => p.search_backward(&haystack, from_offset),
            (Pattern::Regex(p), SearchDirection::Forward) => regex_search_forward(p, &haystack, from_offset),
            (Pattern::Regex(p), SearchDirection::Backward) => regex_search_backward(p, &haystack, from_offset),
        };

        let result = found.map(|range| SearchMatch {
            start: line_store::advance_position(scope.first, &haystack[..range.start]),
            end: line_store::advance_position(scope.first, &haystack[..range.end]),
        });

        self.last_result = Some(LastResult {
            revision: document.revision(),
            matched: result,
        });
        Ok(result)
    }

    /// The match found by the most recent `search` call, or `None` if the document has changed
    /// since (the cache is invalidated by revision, mirroring `TextSearcher::LastResult`).
    pub fn last_matched_region(&self, document: &Document) -> Option<SearchMatch> {
        let r = self.last_result.as_ref()?;
        if r.revision != document.revision() {
            return None;
        }
        r.matched
    }

    /// Signal an in-progress [`Self::replace_all`] to stop at its next opportunity. Distinct
    /// from returning [`ReplaceAction::Exit`] from the callback itself: this exists for callers
    /// that hold a reference to the searcher from outside the callback's call stack (e.g. a
    /// "stop" button wired to a different event than the one driving the replace loop).
    pub fn abort_interactive_replacement(&mut self) {
        self.replacement_aborted = true;
    }

    /// Walk every match of the active pattern in `scope`, asking `callback` what to do with
    /// each one, and apply its decision. Each replacement is its own atomic [`Document::replace`]
    /// call (and its own undo unit), so [`ReplaceAction::Undo`] can cleanly pop just the last one.
    ///
    /// `scope`'s bounds are tracked through edits with a pair of anchors (start pinned
    /// `Backward`, end pinned `Forward`) so that earlier replacements changing the text's length
    /// don't desync the search from where later matches actually are.
    ///
    /// Returns the number of matches actually replaced. Returns `Err` with
    /// [`ErrorKind::ReplacementInterrupted`] if the callback returned [`ReplaceAction::Exit`] or
    /// [`Self::abort_interactive_replacement`] was called mid-loop; replacements already applied
    /// before that point are not rolled back.
    pub fn replace_all(
        &mut self,
        document: &Document,
        scope: Region,
        replacement: &str,
        callback: &mut dyn ReplaceAllCallback,
    ) -> Result<usize, TextError> {
        self.replacement_aborted = false;
        let start_anchor = document.register_anchor(scope.first, Gravity::Backward);
        let end_anchor = document.register_anchor(scope.second, Gravity::Forward);

        let mut count = 0usize;
        let mut replace_rest = false;
        let mut from = scope.first;
        let mut error: Option<TextError> = None;

        loop {
            if self.replacement_aborted {
                error = Some(TextError::replacement_interrupted(
                    "interactive replace-all was aborted",
                ));
                break;
            }

            let current_scope = Region::new(
                document.anchor_position(start_anchor).unwrap_or(scope.first),
                document.anchor_position(end_anchor).unwrap_or(scope.second),
            );
            let found = match self.search(document, from, current_scope, SearchDirection::Forward) {
                Ok(found) => found,
                Err(e) => {
                    error = Some(e);
                    break;
                }
            };
            let Some(m) = found else { break };

            let action = if replace_rest {
                ReplaceAction::Replace
            } else {
                callback.on_match(document, m)
            };

            match action {
                ReplaceAction::Exit => {
                    error = Some(TextError::replacement_interrupted(
                        "interactive replace-all was stopped by the callback",
                    ));
                    break;
                }
                ReplaceAction::Skip => {
                    from = m.end;
                }
                ReplaceAction::Undo => {
                    if let Err(e) = document.undo(1) {
                        error = Some(e);
                        break;
                    }
                    count = count.saturating_sub(1);
                    from = m.start;
                }
                ReplaceAction::Replace | ReplaceAction::ReplaceAll | ReplaceAction::ReplaceAndExit => {
                    if action == ReplaceAction::ReplaceAll {
                        replace_rest = true;
                    }
                    if let Err(e) = document.replace(Region::new(m.start, m.end), replacement) {
                        error = Some(e);
                        break;
                    }
                    count += 1;
                    let new_units: Vec<u16> = replacement.encode_utf16().collect();
                    from = line_store::advance_position(m.start, &new_units);
                    if action == ReplaceAction::ReplaceAndExit {
                        break;
                    }
                }
            }
        }

        document.unregister_anchor(start_anchor);
        document.unregister_anchor(end_anchor);

        match error {
            Some(e) => Err(e),
            None => Ok(count),
        }
    }
}

impl Default for TextSearcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Code-unit offset of `at` within `haystack`, counted from `scope_start`. `at` is assumed to
/// lie within the scope; positions before it clamp to zero.
fn offset_within(haystack: &[u16], scope_start: LinePosition, at: LinePosition) -> usize {
    if at <= scope_start {
        return 0;
    }
    let mut offset = 0;
    let mut pos = scope_start;
    while pos < at && offset < haystack.len() {
        pos = line_store::advance_position(pos, &haystack[offset..offset + 1]);
        offset += 1;
    }
    offset
}

fn regex_search_forward(pattern: &RegexPattern, haystack: &[u16], from: usize) -> Option<std::ops::Range<usize>> {
    let text = String::from_utf16_lossy(haystack);
    let from_byte = char_offset_to_byte(&text, from);
    let hay = &text[from_byte..];
    let m = pattern.regex.find_all(hay).next()?;
    let start = byte_offset_to_char(&text, from_byte + m.start);
    let end = byte_offset_to_char(&text, from_byte + m.end);
    Some(start..end)
}

fn regex_search_backward(pattern: &RegexPattern, haystack: &[u16], before: usize) -> Option<std::ops::Range<usize>> {
    let text = String::from_utf16_lossy(haystack);
    let before_byte = char_offset_to_byte(&text, before);
    let hay = &text[..before_byte];
    let m = pattern.regex.find_all(hay).last()?;
    let start = byte_offset_to_char(&text, m.start);
    let end = byte_offset_to_char(&text, m.end);
    Some(start..end)
}

fn char_offset_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices().nth(char_offset).map(|(b, _)| b).unwrap_or(text.len())
}

fn byte_offset_to_char(text: &str, byte_offset: usize) -> usize {
    text[..byte_offset].chars().count()
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
