use super::*;

#[test]
fn display_matches_severity_kind_code_message() {
    let err = TextError::new(ErrorKind::BadPosition, "BAD_POSITION", "line 4 out of range");
    assert_eq!(
        err.to_string(),
        "[ERROR] BadPosition(BAD_POSITION): line 4 out of range"
    );
}

#[test]
fn critical_sets_severity() {
    let err = TextError::critical(ErrorKind::DocumentDisposed, "DOCUMENT_DISPOSED", "gone");
    assert_eq!(err.severity, ErrorSeverity::Critical);
}

#[test]
fn contains_msg_substring() {
    let err = TextError::bad_position("offset 12 exceeds line length 5");
    assert!(err.contains_msg("exceeds line length"));
    assert!(!err.contains_msg("nonexistent"));
}
