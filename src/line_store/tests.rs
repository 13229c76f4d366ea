use super::*;

fn units(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

fn line_text(store: &LineStore, i: usize) -> String {
    String::from_utf16(&store.line(i).unwrap().units).unwrap()
}

#[test]
fn new_store_has_one_empty_line() {
    let store = LineStore::new();
    assert_eq!(store.line_count(), 1);
    assert_eq!(store.line(0).unwrap().terminator, Terminator::None);
}

#[test]
fn splice_insert_into_empty_document() {
    let mut store = LineStore::new();
    store
        .splice(
            LinePosition::new(0, 0),
            LinePosition::new(0, 0),
            &units("hello"),
            1,
        )
        .unwrap();
    assert_eq!(store.line_count(), 1);
    assert_eq!(line_text(&store, 0), "hello");
}

#[test]
fn splice_with_embedded_newline_splits_line() {
    let mut store = LineStore::new();
    store
        .splice(
            LinePosition::new(0, 0),
            LinePosition::new(0, 0),
            &units("foo\nbar"),
            1,
        )
        .unwrap();
    assert_eq!(store.line_count(), 2);
    assert_eq!(line_text(&store, 0), "foo");
    assert_eq!(store.line(0).unwrap().terminator, Terminator::Lf);
    assert_eq!(line_text(&store, 1), "bar");
    assert_eq!(store.line(1).unwrap().terminator, Terminator::None);
}

#[test]
fn crlf_counts_as_one_terminator() {
    let mut store = LineStore::new();
    store
        .splice(
            LinePosition::new(0, 0),
            LinePosition::new(0, 0),
            &units("a\r\nb"),
            1,
        )
        .unwrap();
    assert_eq!(store.line_count(), 2);
    assert_eq!(store.line(0).unwrap().terminator, Terminator::CrLf);
    assert_eq!(store.line(0).unwrap().terminator.unit_len(), 2);
}

#[test]
fn splice_spanning_lines_merges_them() {
    let mut store = LineStore::new();
    store
        .splice(
            LinePosition::new(0, 0),
            LinePosition::new(0, 0),
            &units("one\ntwo\nthree"),
            1,
        )
        .unwrap();
    assert_eq!(store.line_count(), 3);
    // Replace from middle of line 0 to middle of line 2 with nothing: merges all three.
    store
        .splice(LinePosition::new(0, 1), LinePosition::new(2, 2), &[], 2)
        .unwrap();
    assert_eq!(store.line_count(), 1);
    assert_eq!(line_text(&store, 0), "oree");
}

#[test]
fn offset_and_position_round_trip() {
    let mut store = LineStore::new();
    store
        .splice(
            LinePosition::new(0, 0),
            LinePosition::new(0, 0),
            &units("abc\ndef"),
            1,
        )
        .unwrap();
    let offset = store.position_to_offset(LinePosition::new(1, 2)).unwrap();
    assert_eq!(store.offset_to_position(offset), LinePosition::new(1, 2));
}

#[test]
fn rejects_offset_past_line_end() {
    let store = LineStore::new();
    let err = store
        .position_to_offset(LinePosition::new(0, 5))
        .unwrap_err();
    assert_eq!(err.kind, crate::error::ErrorKind::BadPosition);
}

#[test]
fn advance_position_tracks_embedded_newlines() {
    let end = advance_position(LinePosition::new(2, 1), &units("ab\ncd"));
    assert_eq!(end, LinePosition::new(3, 2));
}

#[test]
fn advance_position_no_newline_stays_on_line() {
    let end = advance_position(LinePosition::new(0, 2), &units("xyz"));
    assert_eq!(end, LinePosition::new(0, 5));
}

#[test]
fn rejects_start_after_end() {
    let mut store = LineStore::new();
    let err = store
        .splice(
            LinePosition::new(0, 0),
            LinePosition::new(0, 0),
            &units("abc"),
            1,
        )
        .unwrap();
    let _ = err;
    let err = store.splice(LinePosition::new(0, 2), LinePosition::new(0, 0), &[], 2);
    assert!(err.is_err());
}
