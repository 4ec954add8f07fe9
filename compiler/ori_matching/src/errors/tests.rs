use pretty_assertions::assert_eq;

use super::*;

#[test]
fn invalid_pattern_message() {
    let err = MatchError::invalid_pattern("or() requires at least one alternative");
    assert_eq!(
        err.to_string(),
        "invalid pattern: or() requires at least one alternative"
    );
    assert!(err.is_pattern_defect());
}

#[test]
fn capture_conflict_message() {
    let err = MatchError::capture_conflict("@source");
    assert_eq!(err.to_string(), "capture @source is already bound");
    assert!(err.is_pattern_defect());
}

#[test]
fn missing_capture_message() {
    let err = MatchError::missing_capture("@source");
    assert_eq!(
        err.to_string(),
        "capture @source was not bound by the pattern that produced this match"
    );
    assert!(!err.is_pattern_defect());
}

#[test]
fn callback_keeps_source() {
    let err = MatchError::callback("column index out of range");
    assert_eq!(
        err.to_string(),
        "predicate or accessor failed: column index out of range"
    );

    let source = err.source().map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("column index out of range"));
    assert!(!err.is_pattern_defect());
}

#[test]
fn not_matched_message() {
    assert_eq!(
        MatchError::NotMatched.to_string(),
        "no value present: the pattern did not match"
    );
}
