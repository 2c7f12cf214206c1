#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use TokenKind::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    lex(source).unwrap().kinds()
}

fn texts(source: &str) -> Vec<String> {
    lex(source)
        .unwrap()
        .iter()
        .map(|t| t.text.to_string())
        .collect()
}

#[test]
fn range_after_integer() {
    assert_eq!(kinds("x = 1..5"), vec![Ident, Assign, Int, Range, Int]);
    assert_eq!(texts("x = 1..5"), vec!["x", "=", "1", "..", "5"]);
}

#[test]
fn float_needs_digits_after_dot() {
    assert_eq!(kinds("1.5"), vec![Float]);
    assert_eq!(kinds("a.b"), vec![Ident, Dot, Ident]);
}

#[test]
fn stray_range_is_rejected() {
    let err = lex("a..b").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::StrayRange);
    assert_eq!((err.line, err.column), (1, 2));

    let err = lex("1 ..5").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::StrayRange);
}

#[test]
fn keywords_and_identifiers() {
    assert_eq!(
        kinds("for i in 1..3 { breakall }"),
        vec![For, Ident, In, Int, Range, Int, LBrace, BreakAll, RBrace]
    );
    assert_eq!(kinds("$params _x Fun"), vec![Ident, Ident, Ident]);
}

#[test]
fn line_ends_and_line_numbers() {
    let list = lex("a = 1\nb = 2; c = 3").unwrap();
    let lines: Vec<(TokenKind, u32)> = list.iter().map(|t| (t.kind, t.line)).collect();
    assert_eq!(
        lines,
        vec![
            (Ident, 1),
            (Assign, 1),
            (Int, 1),
            (LineEnd, 1),
            (Ident, 2),
            (Assign, 2),
            (Int, 2),
            (LineEnd, 2),
            (Ident, 2),
            (Assign, 2),
            (Int, 2),
        ]
    );
}

#[test]
fn strings_are_verbatim() {
    assert_eq!(texts(r#"echo "a\tb", 'c'"#), vec!["echo", r#""a\tb""#, ",", "'c'"]);
}

#[test]
fn template_string_spans_lines() {
    let list = lex("x = ```one\ntwo {y}```\nz").unwrap();
    assert_eq!(list.kinds(), vec![Ident, Assign, Template, LineEnd, Ident]);
    assert_eq!(list.tokens()[4].line, 3);
}

#[test]
fn comments_are_set_aside() {
    let list = lex("a = 1 // one\n// two\nb").unwrap();
    assert_eq!(list.kinds(), vec![Ident, Assign, Int, LineEnd, LineEnd, Ident]);
    assert_eq!(list.comments().len(), 2);
    assert_eq!(list.comments()[1].line, 2);
}

#[test]
fn operators_with_lookahead() {
    assert_eq!(
        kinds("a -> b - c == d != e >= f <= g && h || i"),
        vec![
            Ident, Arrow, Ident, Minus, Ident, EqEq, Ident, NotEq, Ident, GtEq, Ident, LtEq,
            Ident, AndAnd, Ident, OrOr, Ident
        ]
    );
    assert_eq!(kinds(r"echo a, \t, \n"), vec![Echo, Ident, Comma, TabMarker, Comma, NewlineMarker]);
    assert_eq!(kinds("Integer... rest"), vec![Ident, Ellipsis, Ident]);
}

#[test]
fn lone_operators_fail() {
    for (source, found) in [("a ! b", '!'), ("a & b", '&'), ("a | b", '|')] {
        let err = lex(source).unwrap_err();
        assert_eq!(err.kind, LexErrorKind::LoneOperator, "{source}");
        assert_eq!(err.found, found);
        assert_eq!(err.column, 3);
    }
}

#[test]
fn illegal_character_reports_line_and_char() {
    let err = lex("a = 1\nb = #").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::IllegalCharacter);
    assert_eq!((err.line, err.column, err.found), (2, 5, '#'));
}

#[test]
fn bad_escapes_and_backticks() {
    let err = lex(r"echo \x").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidEscape { next: Some('x') });

    let err = lex("echo `a`").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::StrayBacktick);

    let err = lex("echo ```abc").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedTemplate);
}

#[test]
fn unterminated_template_reports_its_opening_line() {
    let err = lex("x = 1\nt = ```abc\ndef `x` ``").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedTemplate);
    assert_eq!(err.line, 2);

    let err = lex("```").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedTemplate);
}

#[test]
fn unterminated_string() {
    let err = lex("x = \"abc").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.column, 5);
}

proptest! {
    #[test]
    fn integer_ranges_never_lex_as_dots(a in 0u32..100_000, b in 0u32..100_000) {
        let source = format!("for i in {a}..{b} {{");
        let list = lex(&source).unwrap();
        prop_assert_eq!(list.kinds(), vec![For, Ident, In, Int, Range, Int, LBrace]);
        let (a, b) = (a.to_string(), b.to_string());
        prop_assert_eq!(&*list.tokens()[3].text, a.as_str());
        prop_assert_eq!(&*list.tokens()[5].text, b.as_str());
    }

    #[test]
    fn identifiers_round_trip(name in "[a-z_][a-z0-9_]{0,12}") {
        prop_assume!(keywords::lookup(&name).is_none());
        let list = lex(&name).unwrap();
        prop_assert_eq!(list.kinds(), vec![Ident]);
        prop_assert_eq!(&*list.tokens()[0].text, name.as_str());
    }
}
