use super::*;
use crate::document::Region;

fn pos(line: usize, offset: usize) -> LinePosition {
    LinePosition::new(line, offset)
}

fn doc_with(text: &str) -> Document {
    let doc = Document::new();
    doc.replace(Region::at(pos(0, 0)), text).unwrap();
    doc
}

#[test]
fn literal_forward_search_finds_match_in_scope() {
    let doc = doc_with("the quick brown fox jumps over the lazy dog");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::literal("fox", true), true);
    let scope = doc.region();
    let m = s.search(&doc, pos(0, 0), scope, SearchDirection::Forward).unwrap().unwrap();
    assert_eq!(m.start, pos(0, 16));
    assert_eq!(m.end, pos(0, 19));
}

#[test]
fn literal_backward_search_finds_match_before_from() {
    let doc = doc_with("ab cd ab cd ab");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::literal("ab", true), true);
    let scope = doc.region();
    let m = s
        .search(&doc, pos(0, 14), scope, SearchDirection::Backward)
        .unwrap()
        .unwrap();
    assert_eq!(m.start, pos(0, 12));
}

#[test]
fn search_with_no_pattern_set_is_no_such_element() {
    let doc = doc_with("abc");
    let mut s = TextSearcher::new();
    let scope = doc.region();
    let err = s.search(&doc, pos(0, 0), scope, SearchDirection::Forward).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NoSuchElement);
}

#[test]
fn no_match_returns_none_and_clears_last_matched_region() {
    let doc = doc_with("abc");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::literal("zzz", true), true);
    let scope = doc.region();
    let result = s.search(&doc, pos(0, 0), scope, SearchDirection::Forward).unwrap();
    assert!(result.is_none());
    assert!(s.last_matched_region(&doc).is_none());
}

#[test]
fn last_matched_region_is_invalidated_by_document_edit() {
    let doc = doc_with("find me here");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::literal("me", true), true);
    let scope = doc.region();
    s.search(&doc, pos(0, 0), scope, SearchDirection::Forward).unwrap();
    assert!(s.last_matched_region(&doc).is_some());

    doc.replace(Region::at(pos(0, 0)), "x").unwrap();
    assert!(s.last_matched_region(&doc).is_none());
}

#[test]
fn regex_pattern_matches_across_the_scope() {
    let doc = doc_with("foo123bar456");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::regex(r"[0-9]+", true).unwrap(), true);
    let scope = doc.region();
    let m = s.search(&doc, pos(0, 0), scope, SearchDirection::Forward).unwrap().unwrap();
    assert_eq!(m.start, pos(0, 3));
    assert_eq!(m.end, pos(0, 6));
}

#[test]
fn invalid_regex_is_pattern_syntax_error() {
    let err = Pattern::regex("(unclosed", true).unwrap_err();
    assert_eq!(err.kind, ErrorKind::PatternSyntax);
}

#[test]
fn remembered_regex_patterns_go_to_history() {
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::regex("abc", true).unwrap(), false);
    s.set_pattern(Pattern::regex("def", true).unwrap(), false);
    assert_eq!(s.number_of_stored_patterns(), 2);
    assert_eq!(s.stored_pattern(0), Some("def"));
    assert_eq!(s.stored_pattern(1), Some("abc"));
}

#[test]
fn re_storing_the_same_pattern_moves_it_to_front_without_duplicating() {
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::regex("abc", true).unwrap(), false);
    s.set_pattern(Pattern::regex("def", true).unwrap(), false);
    s.set_pattern(Pattern::regex("abc", true).unwrap(), false);
    assert_eq!(s.number_of_stored_patterns(), 2);
    assert_eq!(s.stored_pattern(0), Some("abc"));
}

#[test]
fn history_respects_maximum_stored_strings() {
    let mut s = TextSearcher::new();
    s.set_maximum_number_of_stored_strings(MINIMUM_MAX_STORED_STRINGS);
    for i in 0..10 {
        s.set_pattern(Pattern::regex(&format!("p{i}"), true).unwrap(), false);
    }
    assert_eq!(s.number_of_stored_patterns(), MINIMUM_MAX_STORED_STRINGS);
    assert_eq!(s.stored_pattern(0), Some("p9"));
}

#[test]
fn replacement_history_is_tracked_separately_from_patterns() {
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::regex("abc", true).unwrap(), false);
    s.push_replacement("xyz");
    assert_eq!(s.number_of_stored_patterns(), 1);
    assert_eq!(s.number_of_stored_replacements(), 1);
    assert_eq!(s.stored_replacement(0), Some("xyz"));
}

struct ReplaceAllOfThem;
impl ReplaceAllCallback for ReplaceAllOfThem {
    fn on_match(&mut self, _document: &Document, _matched: SearchMatch) -> ReplaceAction {
        ReplaceAction::Replace
    }
}

#[test]
fn replace_all_replaces_every_match_and_counts_them() {
    let doc = doc_with("cat sat cat mat cat");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::literal("cat", true), true);
    let scope = doc.region();
    let count = s.replace_all(&doc, scope, "dog", &mut ReplaceAllOfThem).unwrap();
    assert_eq!(count, 3);
    assert_eq!(doc.line_text(0).unwrap(), "dog sat dog mat dog");
}

struct SkipFirstThenReplace {
    seen: usize,
}
impl ReplaceAllCallback for SkipFirstThenReplace {
    fn on_match(&mut self, _document: &Document, _matched: SearchMatch) -> ReplaceAction {
        self.seen += 1;
        if self.seen == 1 {
            ReplaceAction::Skip
        } else {
            ReplaceAction::Replace
        }
    }
}

#[test]
fn replace_all_honors_skip_for_individual_matches() {
    let doc = doc_with("cat cat cat");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::literal("cat", true), true);
    let scope = doc.region();
    let mut cb = SkipFirstThenReplace { seen: 0 };
    let count = s.replace_all(&doc, scope, "dog", &mut cb).unwrap();
    assert_eq!(count, 2);
    assert_eq!(doc.line_text(0).unwrap(), "cat dog dog");
}

struct ReplaceAllFromSecondMatch {
    seen: usize,
}
impl ReplaceAllCallback for ReplaceAllFromSecondMatch {
    fn on_match(&mut self, _document: &Document, _matched: SearchMatch) -> ReplaceAction {
        self.seen += 1;
        if self.seen == 1 {
            ReplaceAction::Skip
        } else {
            ReplaceAction::ReplaceAll
        }
    }
}

#[test]
fn replace_all_action_stops_asking_after_it_fires() {
    let doc = doc_with("cat cat cat cat");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::literal("cat", true), true);
    let scope = doc.region();
    let mut cb = ReplaceAllFromSecondMatch { seen: 0 };
    let count = s.replace_all(&doc, scope, "dog", &mut cb).unwrap();
    assert_eq!(count, 3);
    assert_eq!(doc.line_text(0).unwrap(), "cat dog dog dog");
}

struct ExitImmediately;
impl ReplaceAllCallback for ExitImmediately {
    fn on_match(&mut self, _document: &Document, _matched: SearchMatch) -> ReplaceAction {
        ReplaceAction::Exit
    }
}

#[test]
fn replace_all_exit_action_reports_replacement_interrupted() {
    let doc = doc_with("cat cat");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::literal("cat", true), true);
    let scope = doc.region();
    let err = s.replace_all(&doc, scope, "dog", &mut ExitImmediately).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ReplacementInterrupted);
    assert_eq!(doc.line_text(0).unwrap(), "cat cat");
}

struct ReplaceThenUndoThenExit {
    seen: usize,
}
impl ReplaceAllCallback for ReplaceThenUndoThenExit {
    fn on_match(&mut self, _document: &Document, _matched: SearchMatch) -> ReplaceAction {
        self.seen += 1;
        match self.seen {
            1 => ReplaceAction::Replace,
            2 => ReplaceAction::Undo,
            _ => ReplaceAction::Exit,
        }
    }
}

#[test]
fn replace_all_undo_action_reverts_the_previous_replacement() {
    let doc = doc_with("cat cat");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::literal("cat", true), true);
    let scope = doc.region();
    let mut cb = ReplaceThenUndoThenExit { seen: 0 };
    let err = s.replace_all(&doc, scope, "dog", &mut cb).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ReplacementInterrupted);
    // The one replacement was undone, so the document is back to its original text.
    assert_eq!(doc.line_text(0).unwrap(), "cat cat");
}

#[test]
fn abort_interactive_replacement_stops_the_loop_before_any_match_is_asked_about() {
    let doc = doc_with("cat cat cat");
    let mut s = TextSearcher::new();
    s.set_pattern(Pattern::literal("cat", true), true);
    s.abort_interactive_replacement();
    let scope = doc.region();
    let err = s.replace_all(&doc, scope, "dog", &mut ReplaceAllOfThem).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ReplacementInterrupted);
    assert_eq!(doc.line_text(0).unwrap(), "cat cat cat");
}
