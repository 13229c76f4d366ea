use super::*;
use crate::char_iter::StringCharacterIterator;

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn words(s: &str) -> Vec<String> {
    let u = units(s);
    let mut cursor = StringCharacterIterator::new(&u);
    let mut it = WordBreakIterator::new(&mut cursor);
    let mut out = Vec::new();
    let mut start = 0usize;
    loop {
        if !it.advance(Direction::Forward) {
            break;
        }
        let end = it.cursor.offset();
        out.push(String::from_utf16(&u[start..end]).unwrap());
        start = end;
    }
    if start < u.len() {
        out.push(String::from_utf16(&u[start..]).unwrap());
    }
    out
}

#[test]
fn splits_on_whitespace() {
    let w = words("hello world");
    assert_eq!(w, vec!["hello", " ", "world"]);
}

#[test]
fn apostrophe_stays_inside_word() {
    let w = words("don't stop");
    assert_eq!(w, vec!["don't", " ", "stop"]);
}

#[test]
fn digits_group_together() {
    let w = words("abc123 456");
    assert_eq!(w, vec!["abc123", " ", "456"]);
}

#[test]
fn underscore_attaches_to_identifier() {
    let w = words("foo_bar baz");
    assert_eq!(w, vec!["foo_bar", " ", "baz"]);
}

#[test]
fn punctuation_is_its_own_unit() {
    let w = words("wait, what?");
    assert_eq!(w, vec!["wait", ",", " ", "what", "?"]);
}

#[test]
fn is_boundary_is_false_mid_word() {
    let u = units("hello world");
    let mut cursor = StringCharacterIterator::new(&u);
    let mut it = WordBreakIterator::new(&mut cursor);
    assert!(it.is_boundary());
    it.cursor.next();
    it.cursor.next();
    assert!(!it.is_boundary());
}

fn words_with(s: &str, swedish_colon: bool, identifier_syntax: Option<IdentifierSyntax>) -> Vec<String> {
    let u = units(s);
    let mut cursor = StringCharacterIterator::new(&u);
    let mut it = WordBreakIterator::with_options(&mut cursor, swedish_colon, identifier_syntax);
    let mut out = Vec::new();
    let mut start = 0usize;
    loop {
        if !it.advance(Direction::Forward) {
            break;
        }
        let end = it.cursor.offset();
        out.push(String::from_utf16(&u[start..end]).unwrap());
        start = end;
    }
    if start < u.len() {
        out.push(String::from_utf16(&u[start..]).unwrap());
    }
    out
}

#[test]
fn colon_breaks_words_by_default() {
    let w = words("k:a");
    assert_eq!(w, vec!["k", ":", "a"]);
}

#[test]
fn swedish_colon_option_joins_letter_colon_letter() {
    let w = words_with("k:a", true, None);
    assert_eq!(w, vec!["k:a"]);
}

#[test]
fn two_base_character_lookahead_skips_a_combining_mark_before_judging_the_colon() {
    // 'a' + combining acute (Extend) + ':' + 'b': the colon's real neighbour, ignoring the
    // combining mark, is still a letter on both sides.
    let w = words_with("a\u{0301}:b test", true, None);
    assert_eq!(w, vec!["a\u{0301}:b", " ", "test"]);
}

#[test]
fn identifier_syntax_promotes_its_own_characters_to_aletter() {
    let syntax = IdentifierSyntax {
        start: |c| c == '$' || c.is_alphabetic(),
        continue_: |c| c == '$' || c.is_alphanumeric(),
    };
    let w = words_with("$foo bar", false, Some(syntax));
    assert_eq!(w, vec!["$foo", " ", "bar"]);
}

#[test]
fn without_identifier_syntax_a_dollar_sign_breaks_the_word() {
    let w = words("$foo bar");
    assert_eq!(w, vec!["$", "foo", " ", "bar"]);
}

#[test]
fn hiragana_and_prolonged_sound_mark_stay_in_one_segment() {
    let w = words("\u{3053}\u{3053}\u{30FC} hi");
    assert_eq!(w, vec!["\u{3053}\u{3053}\u{30FC}", " ", "hi"]);
}

#[test]
fn component_mask_reports_start_end_and_alphanumeric() {
    let u = units("hi, there");
    let mut cursor = StringCharacterIterator::new(&u);
    let mut it = WordBreakIterator::new(&mut cursor);

    // Start of text: a boundary that starts a segment but ends none.
    let start_mask = it.component_mask();
    assert_eq!(start_mask & component::START_OF_SEGMENT, component::START_OF_SEGMENT);
    assert_eq!(start_mask & component::END_OF_SEGMENT, 0);
    assert_eq!(start_mask & component::ALPHANUMERIC, component::ALPHANUMERIC);

    it.cursor.next();
    // Mid-word, between 'h' and 'i': not a boundary at all.
    assert_eq!(it.component_mask(), 0);

    it.cursor.next();
    // Between "hi" and ",": ends an alphanumeric segment, starts a punctuation one.
    let mid_mask = it.component_mask();
    assert_eq!(mid_mask & component::END_OF_SEGMENT, component::END_OF_SEGMENT);
    assert_eq!(mid_mask & component::ALPHANUMERIC, 0);
}
