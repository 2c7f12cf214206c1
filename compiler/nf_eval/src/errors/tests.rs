use super::*;
use pretty_assertions::assert_eq;

#[test]
fn arity_message_pluralizes() {
    assert_eq!(
        arity_mismatch("f", 1, 2).message,
        "`f` expects 1 argument, got 2"
    );
    assert_eq!(
        arity_mismatch("f", 3, 0).message,
        "`f` expects 3 arguments, got 0"
    );
}

#[test]
fn at_line_keeps_the_innermost_line() {
    let err = division_by_zero().at_line(7).at_line(2);
    assert_eq!(err.line, Some(7));
    assert_eq!(err.to_string(), "line 7: division by zero");
    assert_eq!(division_by_zero().to_string(), "division by zero");
}

#[test]
fn codes_follow_the_kind() {
    assert_eq!(undefined_variable("x").code(), ErrorCode::E3001);
    assert_eq!(type_mismatch("Integer", "String").code(), ErrorCode::E3003);
    assert_eq!(unknown_task("t").code(), ErrorCode::E3006);
    assert_eq!(integer_overflow("addition").code(), ErrorCode::E3010);
    assert_eq!(context_busy().code(), ErrorCode::E3016);
    assert_eq!(EvalError::from(ScopeError::Cleared).code(), ErrorCode::E2001);
}

#[test]
fn unsupported_operator_names_the_symbol() {
    let err = unsupported_operator(BinaryOp::Sub, "String", "List");
    assert_eq!(err.code(), ErrorCode::E3009);
    assert_eq!(
        err.message,
        "operator `-` cannot be applied to String and List"
    );
}

#[test]
fn diagnostic_carries_line_notes_and_suggestion() {
    let diag = unknown_task("fetch")
        .at_line(3)
        .with_note("while running `fetch`")
        .to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E3006);
    assert_eq!(diag.primary_line(), Some(3));
    assert_eq!(diag.notes, vec!["while running `fetch`".to_string()]);
    assert!(diag.suggestions[0].message.contains("as fetch"));
}

#[test]
fn cleared_scope_diagnostic_explains_itself() {
    let diag = EvalError::from(ScopeError::Cleared).to_diagnostic();
    assert_eq!(diag.primary_line(), None);
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn host_failure_message() {
    let err = host_task_failed("demo.Fetch", "timeout");
    assert_eq!(err.message, "host task `demo.Fetch` failed: timeout");
    assert!(matches!(err.kind, EvalErrorKind::HostTaskFailed { .. }));
}
