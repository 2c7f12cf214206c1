use super::*;
use pretty_assertions::assert_eq;

#[test]
fn phase_predicates_follow_first_digit() {
    assert!(ErrorCode::E0002.is_lexical_error());
    assert!(ErrorCode::E1006.is_syntax_error());
    assert!(ErrorCode::E2001.is_scope_error());
    assert!(ErrorCode::E3002.is_runtime_error());
    assert!(!ErrorCode::E3002.is_syntax_error());
    assert!(ErrorCode::E1010.is_syntax_error());
    assert!(ErrorCode::E3019.is_runtime_error());
}

#[test]
fn categories() {
    assert_eq!(ErrorCode::E0001.category(), "lexical error");
    assert_eq!(ErrorCode::E1007.category(), "syntax error");
    assert_eq!(ErrorCode::E2002.category(), "scope error");
    assert_eq!(ErrorCode::E3015.category(), "runtime error");
}

#[test]
fn display_matches_as_str() {
    assert_eq!(ErrorCode::E1003.to_string(), "E1003");
    assert_eq!(ErrorCode::E3018.to_string(), "E3018");
}
