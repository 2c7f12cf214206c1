#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use nf_diagnostic::ErrorCode;
use nf_ir::NodeKind;
use pretty_assertions::assert_eq;

fn program(source: &str) -> Result<Program, ParseError> {
    parse(&nf_lexer::lex(source).unwrap())
}

#[test]
fn registry_order() {
    let registry = Registry::default();
    assert_eq!(registry.len(), 19);
    let kinds = registry.kinds();
    assert_eq!(kinds[0], NodeKind::Import);
    let assign = kinds.iter().position(|k| *k == NodeKind::Assign).unwrap();
    let declare = kinds.iter().position(|k| *k == NodeKind::Declare).unwrap();
    let call = kinds.iter().position(|k| *k == NodeKind::Call).unwrap();
    assert!(assign < declare && assign < call);
}

#[test]
fn empty_registry_recognizes_nothing() {
    let registry = Registry::new();
    assert!(registry.is_empty());
    let tokens = nf_lexer::lex("x = 1").unwrap();
    let err = parse_with(&registry, &tokens).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1001);
}

#[test]
fn blank_lines_and_semicolons() {
    let program = program("\n\nx = 1; y = 2\n\n").unwrap();
    assert_eq!(program.nodes.len(), 2);
    assert_eq!(program.nodes[1].line_number(), 3);
}

#[test]
fn outline_shows_nesting() {
    let program = program("for i in 1..3 {\n  if i == 2 {\n    break\n  }\n}\necho i").unwrap();
    assert_eq!(
        program.outline(),
        concat!(
            "FOR @1: for i in 1 .. 3 {\n",
            "  IF @2: if i == 2 {\n",
            "    BRANCH @2: if i == 2 {\n",
            "      BREAK @3: break\n",
            "ECHO @6: echo i\n",
        )
    );
}

#[test]
fn duplicate_variable_in_same_block() {
    let err = program("x = 1\nInteger y = 2\nInteger y = 3").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::DuplicateVariable {
            name: "y".into(),
            first_line: 2
        }
    );
    assert_eq!(err.line, 3);
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1006);
    assert_eq!(
        diag.suggestions[0].message,
        "rename the variable or remove the duplicate declaration"
    );
}

#[test]
fn shadowing_in_nested_block_is_fine() {
    program("Integer y = 1\nwhile true {\n  Integer y = 2\n  break\n}\n").unwrap();
}

#[test]
fn plain_reassignment_is_not_a_duplicate() {
    program("x = 1\nx = 2\nif true {\n  x = 3\n}").unwrap();
}

#[test]
fn duplicate_function() {
    let err = program("fun f() {\n}\nfun f() {\n}").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::DuplicateFunction {
            name: "f".into(),
            first_line: 1
        }
    );
}

#[test]
fn parameters_are_declared_in_function_scope() {
    let err = program("fun f(Integer a) {\n  Integer a = 2\n}").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1006);
    program("Integer a = 1\nfun f(Integer a) {\n  return a\n}").unwrap();
}

#[test]
fn malformed_signature_text() {
    let err = program("Fun<Integer Integer> f = g").unwrap_err();
    assert_eq!(err.code(), ErrorCode::E1005);
    assert!(err.to_diagnostic().notes[0].contains("Fun<"));
}

#[test]
fn unknown_statement() {
    let err = program("x = 1\n+ 2").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::UnrecognizedStatement {
            found: "`+`".into()
        }
    );
    assert_eq!(err.to_string(), "line 2: no statement starts with `+`");
}
