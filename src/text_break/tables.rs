//! Character classification tables backing the break iterators.
//!
//! Unicode general-category classes needed below (`Mn`, `Mc`, `Me`) are resolved through the
//! `regex` crate's compiled Unicode tables via a one-character `\p{...}` match rather than a
//! hand-maintained range table — this crate has no other use for `regex`'s own matching engine
//! (search uses `monster-regex`, see `crate::search`), but its Unicode property tables are the
//! enrichment this component needs and the pack already uses `regex` elsewhere
//! (`freddiehaddad-oxidized`, `tabular-id-tabular`), so it is reused here rather than
//! hand-copying UCD ranges.

use regex::Regex;
use std::sync::OnceLock;

fn mark_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\p{Mn}\p{Me}]$").unwrap())
}

fn spacing_mark_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\p{Mc}$").unwrap())
}

fn is_nonspacing_or_enclosing_mark(c: char) -> bool {
    let mut buf = [0u8; 4];
    mark_regex().is_match(c.encode_utf8(&mut buf))
}

fn is_spacing_combining_mark(c: char) -> bool {
    let mut buf = [0u8; 4];
    spacing_mark_regex().is_match(c.encode_utf8(&mut buf))
}

/// Grapheme_Cluster_Break property classes (UAX #29 table 2), curated to the classes actually
/// distinguished by the pairwise rules in [`super::grapheme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphemeClass {
    Cr,
    Lf,
    Control,
    Extend,
    ZeroWidthJoiner,
    RegionalIndicator,
    SpacingMark,
    L,
    V,
    T,
    Lv,
    Lvt,
    Other,
}

/// Classify `c` for grapheme cluster boundary purposes.
pub fn grapheme_class(c: char) -> GraphemeClass {
    match c {
        '\r' => GraphemeClass::Cr,
        '\n' => GraphemeClass::Lf,
        '\u{200D}' => GraphemeClass::ZeroWidthJoiner,
        '\u{1F1E6}'..='\u{1F1FF}' => GraphemeClass::RegionalIndicator,
        _ => {
            if let Some(h) = hangul_class(c) {
                return h;
            }
            if c == '\u{0085}' || c == '\u{2028}' || c == '\u{2029}' || c.is_control() {
                return GraphemeClass::Control;
            }
            if is_nonspacing_or_enclosing_mark(c) {
                return GraphemeClass::Extend;
            }
            if is_spacing_combining_mark(c) {
                return GraphemeClass::SpacingMark;
            }
            GraphemeClass::Other
        }
    }
}

fn hangul_class(c: char) -> Option<GraphemeClass> {
    let cp = c as u32;
    match cp {
        0x1100..=0x115F | 0xA960..=0xA97C => Some(GraphemeClass::L),
        0x1160..=0x11A7 | 0xD7B0..=0xD7C6 => Some(GraphemeClass::V),
        0x11A8..=0x11FF | 0xD7CB..=0xD7FB => Some(GraphemeClass::T),
        0xAC00..=0xD7A3 => {
            let s_index = cp - 0xAC00;
            if s_index % 28 == 0 {
                Some(GraphemeClass::Lv)
            } else {
                Some(GraphemeClass::Lvt)
            }
        }
        _ => None,
    }
}

/// Word_Break property classes, curated to what [`super::word`] distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    CrOrLf,
    Newline,
    Extend,
    ALetter,
    Numeric,
    Katakana,
    MidLetter,
    MidNum,
    MidNumLet,
    ExtendNumLet,
    Whitespace,
    Other,
}

pub fn word_class(c: char) -> WordClass {
    match c {
        '\r' | '\n' => WordClass::CrOrLf,
        '\u{0085}' | '\u{2028}' | '\u{2029}' => WordClass::Newline,
        '_' => WordClass::ExtendNumLet,
        '\'' | '\u{2019}' => WordClass::MidNumLet,
        // ':' is deliberately excluded here: it only joins ALetter neighbours under the
        // Swedish-colon option (`WordBreakIterator::with_options`), everywhere else it breaks
        // like any other punctuation.
        '\u{00B7}' | '\u{2027}' => WordClass::MidLetter,
        ',' | ';' => WordClass::MidNum,
        c if c.is_whitespace() => WordClass::Whitespace,
        c if c.is_ascii_digit() || c.is_numeric() => WordClass::Numeric,
        '\u{3041}'..='\u{30FF}' => WordClass::Katakana,
        c if is_nonspacing_or_enclosing_mark(c) || is_spacing_combining_mark(c) => {
            WordClass::Extend
        }
        c if c.is_alphabetic() => WordClass::ALetter,
        _ => WordClass::Other,
    }
}

/// Sentence_Break property classes, curated to what [`super::sentence`] distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceClass {
    Sep,
    Extend,
    Sp,
    Lower,
    Upper,
    OLetter,
    Term,
    Close,
    Numeric,
    Other,
}

pub fn sentence_class(c: char) -> SentenceClass {
    match c {
        '\r' | '\n' | '\u{0085}' | '\u{2028}' | '\u{2029}' => SentenceClass::Sep,
        '.' | '!' | '?' | '\u{2026}' => SentenceClass::Term,
        ')' | ']' | '}' | '"' | '\'' | '\u{201D}' | '\u{2019}' => SentenceClass::Close,
        c if c.is_whitespace() => SentenceClass::Sp,
        c if c.is_numeric() => SentenceClass::Numeric,
        c if is_nonspacing_or_enclosing_mark(c) => SentenceClass::Extend,
        c if c.is_lowercase() => SentenceClass::Lower,
        c if c.is_uppercase() => SentenceClass::Upper,
        c if c.is_alphabetic() => SentenceClass::OLetter,
        _ => SentenceClass::Other,
    }
}
