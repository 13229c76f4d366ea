//! Incremental ("isearch") search session: the query grows or shrinks one character at a time
//! and the match is recomputed after every edit.
//!
//! Grounded on `ascension::searcher::IncrementalSearcher`
//! (`original_source/ascension/ascension/kernel/searcher.hpp`), which keeps a stack of `Status`
//! entries (matched region + direction) so that `undo()` can pop back to the match that existed
//! before the last character was typed, and aborts the whole session if the watched document
//! changes out from under it. This port folds `Status` down to just the matched region (the
//! direction is fixed for the lifetime of a session here, where the original allowed flipping
//! direction mid-search) and detects "the document changed" via revision comparison, consistent
//! with how [`super::TextSearcher::last_matched_region`] already invalidates itself, plus a
//! bookmark-set comparison since the original also aborts when a bookmark the search might be
//! relying on (e.g. a scope boundary) moves out from under it.

use crate::document::Document;
use crate::error::{ErrorKind, TextError};
use crate::line_store::LinePosition;

use super::{Pattern, SearchDirection, SearchMatch, TextSearcher};

/// How the most recent query change resolved, mirroring
/// `IncrementalSearcher::Status`'s match outcome without the C++ type's regex-engine-specific
/// detail folded into one opaque "matched or not" bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchResult {
    /// The query is empty; there is nothing to search for yet.
    EmptyPattern,
    /// A match was found.
    Found,
    /// The pattern is well-formed but matched nothing in scope.
    NotFound,
    /// Regex mode is active and the pattern does not parse.
    BadRegex,
    /// Regex mode is active, the pattern parses, but it uses a construct (an anchor) that
    /// cannot be evaluated meaningfully against a match window that moves one character at a
    /// time.
    ComplexRegex,
}

/// Whether satisfying the current query required searching past the end (or start) of the
/// scope and restarting from the other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapStatus {
    /// The match was found without wrapping.
    NoWrap,
    /// The match was found only after wrapping around the scope once.
    Wrapped,
    /// The search has now wrapped around the scope more than once without making progress past
    /// where it already searched, meaning the whole scope has been covered since the last
    /// non-`next` query change.
    Overwrapped,
}

struct Status {
    query_len: usize,
    matched: Option<SearchMatch>,
}

/// A running incremental search over a document. Construct with [`IncrementalSearcher::start`],
/// feed it characters, and read back the current match after each step.
pub struct IncrementalSearcher {
    document: Document,
    direction: SearchDirection,
    case_sensitive: bool,
    regex_mode: bool,
    scope: crate::document::Region,
    anchor: LinePosition,
    start_revision: u64,
    bookmark_snapshot: Vec<usize>,
    query: String,
    history: Vec<Status>,
    aborted: bool,
    last_result: SearchResult,
    wrap_status: WrapStatus,
}

impl IncrementalSearcher {
    /// Begin a session anchored at `from`, searching the document's whole accessible region
    /// with a literal query.
    pub fn start(document: &Document, from: LinePosition, direction: SearchDirection, case_sensitive: bool) -> Self {
        Self::start_impl(document, from, direction, case_sensitive, false)
    }

    /// Like [`Self::start`], but the query is interpreted as a regular expression.
    pub fn start_regex(document: &Document, from: LinePosition, direction: SearchDirection, case_sensitive: bool) -> Self {
        Self::start_impl(document, from, direction, case_sensitive, true)
    }

    fn start_impl(
        document: &Document,
        from: LinePosition,
        direction: SearchDirection,
        case_sensitive: bool,
        regex_mode: bool,
    ) -> Self {
        Self {
            document: document.clone(),
            direction,
            case_sensitive,
            regex_mode,
            scope: document.accessible_region(),
            anchor: from,
            start_revision: document.revision(),
            bookmark_snapshot: document.bookmarker().iter().collect(),
            query: String::new(),
            history: vec![Status {
                query_len: 0,
                matched: None,
            }],
            aborted: false,
            last_result: SearchResult::EmptyPattern,
            wrap_status: WrapStatus::NoWrap,
        }
    }

    pub fn is_running(&self) -> bool {
        !self.aborted
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    pub fn current_match(&self) -> Option<SearchMatch> {
        self.history.last().and_then(|s| s.matched)
    }

    /// How the most recent query change or `next()` call resolved.
    pub fn result(&self) -> SearchResult {
        self.last_result
    }

    /// Whether satisfying the most recent query or `next()` call required wrapping the scope.
    pub fn wrap_status(&self) -> WrapStatus {
        self.wrap_status
    }

    fn check_not_stale(&mut self) -> Result<(), TextError> {
        if self.aborted {
            return Err(TextError::change_rejected("incremental search session has ended"));
        }
        if self.document.revision() != self.start_revision {
            self.aborted = true;
            return Err(TextError::change_rejected(
                "document changed while an incremental search was running",
            ));
        }
        let marks: Vec<usize> = self.document.bookmarker().iter().collect();
        if marks != self.bookmark_snapshot {
            self.aborted = true;
            return Err(TextError::change_rejected(
                "bookmarks changed while an incremental search was running",
            ));
        }
        Ok(())
    }

    /// Build the active pattern, classifying the query along the way. Returns `None` if the
    /// query can't be searched as-is (empty, unparsable regex, or a regex anchor that can't be
    /// evaluated against a window that moves one character at a time).
    fn build_pattern(&mut self) -> Option<Pattern> {
        if self.query.is_empty() {
            self.last_result = SearchResult::EmptyPattern;
            return None;
        }
        if self.regex_mode {
            if self.query.contains('^') || self.query.contains('$') {
                self.last_result = SearchResult::ComplexRegex;
                return None;
            }
            match Pattern::regex(&self.query, self.case_sensitive) {
                Ok(p) => Some(p),
                Err(_) => {
                    self.last_result = SearchResult::BadRegex;
                    None
                }
            }
        } else {
            Some(Pattern::literal(&self.query, self.case_sensitive))
        }
    }

    /// Search `from` onward to the end of the scope (in `self.direction`); if nothing is found,
    /// wrap around to the opposite end of the scope and search the rest of it. Reports whether a
    /// wrap was needed, and escalates to `Overwrapped` if the session had already wrapped once
    /// since the last query edit.
    fn search_with_wrap(
        &mut self,
        searcher: &mut TextSearcher,
        from: LinePosition,
    ) -> Result<Option<SearchMatch>, TextError> {
        let direct = searcher.search(&self.document, from, self.scope, self.direction)?;
        if direct.is_some() {
            return Ok(direct);
        }
        let wrap_from = match self.direction {
            SearchDirection::Forward => self.scope.first,
            SearchDirection::Backward => self.scope.second,
        };
        let wrapped = searcher.search(&self.document, wrap_from, self.scope, self.direction)?;
        if wrapped.is_some() {
            self.wrap_status = if self.wrap_status == WrapStatus::NoWrap {
                WrapStatus::Wrapped
            } else {
                WrapStatus::Overwrapped
            };
        }
        Ok(wrapped)
    }

    fn rematch(&mut self) -> Result<Option<SearchMatch>, TextError> {
        self.wrap_status = WrapStatus::NoWrap;
        let Some(pattern) = self.build_pattern() else {
            return Ok(None);
        };
        let mut searcher = TextSearcher::new();
        searcher.set_pattern(pattern, true);
        let matched = self.search_with_wrap(&mut searcher, self.anchor)?;
        self.last_result = if matched.is_some() { SearchResult::Found } else { SearchResult::NotFound };
        Ok(matched)
    }

    /// Append one character to the query and re-search.
    pub fn add_character(&mut self, ch: char) -> Result<Option<SearchMatch>, TextError> {
        self.check_not_stale()?;
        self.query.push(ch);
        let matched = self.rematch()?;
        self.history.push(Status {
            query_len: self.query.len(),
            matched,
        });
        self.start_revision = self.document.revision();
        Ok(matched)
    }

    pub fn add_string(&mut self, text: &str) -> Result<Option<SearchMatch>, TextError> {
        self.check_not_stale()?;
        let mut matched = self.current_match();
        for ch in text.chars() {
            matched = self.add_character(ch)?;
        }
        Ok(matched)
    }

    /// Search again for the current query past the last match, in the same direction.
    pub fn next(&mut self) -> Result<Option<SearchMatch>, TextError> {
        self.check_not_stale()?;
        let Some(pattern) = self.build_pattern() else {
            return Ok(None);
        };
        let from = match self.current_match() {
            Some(m) => match self.direction {
                SearchDirection::Forward => m.end,
                SearchDirection::Backward => m.start,
            },
            None => self.anchor,
        };
        let mut searcher = TextSearcher::new();
        searcher.set_pattern(pattern, true);
        let matched = self.search_with_wrap(&mut searcher, from)?;
        self.last_result = if matched.is_some() { SearchResult::Found } else { SearchResult::NotFound };
        self.history.push(Status {
            query_len: self.query.len(),
            matched,
        });
        Ok(matched)
    }

    /// Remove the last character typed (or the effect of the last `next()`), restoring the
    /// previous match. Returns `Err(NoSuchElement)` if there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<SearchMatch>, TextError> {
        self.check_not_stale()?;
        if self.history.len() <= 1 {
            return Err(TextError::no_such_element("nothing to undo in this incremental search"));
        }
        self.history.pop();
        let restored = self.history.last().unwrap();
        self.query.truncate(restored.query_len);
        Ok(restored.matched)
    }

    /// End the session, returning the final match (the caret should stay there).
    pub fn end(mut self) -> Option<SearchMatch> {
        self.aborted = true;
        self.current_match()
    }

    /// Abandon the session; the caller is responsible for restoring the caret to the anchor.
    pub fn abort(mut self) -> LinePosition {
        self.aborted = true;
        self.anchor
    }
}
