use super::*;
use pretty_assertions::assert_eq;

#[test]
fn builder_collects_labels_and_suggestions() {
    let diag = Diagnostic::error(ErrorCode::E1006)
        .with_message("variable `x` is already declared")
        .with_label(5, "declared again here")
        .with_secondary_label(2, "first declared here")
        .with_suggestion(Suggestion::text("rename it", 1))
        .with_suggestion(Suggestion::did_you_mean("y"));

    assert_eq!(diag.primary_line(), Some(5));
    assert_eq!(diag.labels.len(), 2);
    assert!(!diag.labels[1].is_primary);
    // sorted by priority
    assert_eq!(diag.suggestions[0].message, "did you mean `y`?");
    assert!(diag.is_error());
}

#[test]
fn display_includes_line_and_category() {
    let diag = Diagnostic::error(ErrorCode::E0002)
        .with_message("illegal character `#`")
        .with_label(3, "here");
    assert_eq!(
        diag.to_string(),
        "error[E0002] line 3: lexical error: illegal character `#`"
    );
}

#[test]
fn display_without_line() {
    let diag = Diagnostic::warning(ErrorCode::E3009).with_message("odd");
    assert_eq!(diag.to_string(), "warning[E3009]: runtime error: odd");
}
