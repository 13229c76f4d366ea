use super::*;
use crate::char_iter::StringCharacterIterator;

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn sentences(s: &str) -> Vec<String> {
    let u = units(s);
    let mut cursor = StringCharacterIterator::new(&u);
    let mut it = SentenceBreakIterator::new(&mut cursor);
    let mut out = Vec::new();
    let mut start = 0usize;
    loop {
        if !it.advance(Direction::Forward) {
            break;
        }
        let end = it.cursor.offset();
        if end > start {
            out.push(String::from_utf16(&u[start..end]).unwrap());
        }
        start = end;
        if start >= u.len() {
            break;
        }
    }
    if start < u.len() {
        out.push(String::from_utf16(&u[start..]).unwrap());
    }
    out
}

#[test]
fn splits_after_period_space_capital() {
    let s = sentences("Hi. There");
    assert_eq!(s, vec!["Hi. ", "There"]);
}

#[test]
fn keeps_closing_quote_with_sentence() {
    let s = sentences("He said \"stop.\" Then left.");
    assert_eq!(s[0], "He said \"stop.\" ");
}

#[test]
fn does_not_split_mid_sentence_period_abbreviation_style() {
    // Without a following space + new sentence-initial char, no split should occur.
    let s = sentences("a.b");
    assert_eq!(s, vec!["a.b"]);
}

#[test]
fn splits_on_line_separator() {
    let s = sentences("line one\nline two");
    assert_eq!(s[0], "line one\n");
    assert_eq!(s[1], "line two");
}

#[test]
fn is_boundary_is_false_mid_sentence_true_after_terminator_space() {
    let u = units("Hi. There");
    let mut cursor = StringCharacterIterator::new(&u);
    let mut it = SentenceBreakIterator::new(&mut cursor);
    assert!(it.is_boundary()); // start of text
    it.cursor.next(); // between 'H' and 'i'
    assert!(!it.is_boundary());
    it.cursor.next(); // between 'i' and '.'
    assert!(!it.is_boundary());
    it.cursor.next(); // between '.' and ' '
    assert!(!it.is_boundary());
    it.cursor.next(); // between ' ' and 'T': a real sentence boundary
    assert!(it.is_boundary());
}
