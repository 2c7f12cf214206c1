#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use nf_ir::TokenList;
use pretty_assertions::assert_eq;

fn tokens(source: &str) -> TokenList {
    nf_lexer::lex(source).unwrap()
}

#[test]
fn plain_and_generic_lengths() {
    assert_eq!(type_len(tokens("Integer x").tokens(), 0), Some(1));
    assert_eq!(type_len(tokens("List<Integer> xs").tokens(), 0), Some(4));
    assert_eq!(
        type_len(tokens("Fun<Integer, Fun<Integer : Integer> : Integer> f").tokens(), 0),
        Some(13)
    );
    assert_eq!(type_len(tokens("Fun<Integer f = g").tokens(), 0), None);
    assert_eq!(type_len(tokens("123").tokens(), 0), None);
}

#[test]
fn fun_type_has_signature() {
    let list = tokens("Fun<Integer, String : Boolean>");
    let ty = type_ref(list.tokens(), 1).unwrap();
    assert_eq!(ty.name, "Fun");
    let sig = ty.signature.unwrap();
    assert_eq!(sig.parameter_types, vec!["Integer", "String"]);
    assert_eq!(sig.return_type, "Boolean");
}

#[test]
fn generic_type_keeps_text() {
    let list = tokens("Map<String, Integer>");
    let ty = type_ref(list.tokens(), 1).unwrap();
    assert_eq!(ty, TypeRef::plain("Map<String, Integer>"));
}

#[test]
fn malformed_fun_type_is_signature_error() {
    let list = tokens("Fun<Integer Integer>");
    let err = type_ref(list.tokens(), 4).unwrap_err();
    assert_eq!(err.code(), nf_diagnostic::ErrorCode::E1005);
    assert_eq!(err.line, 4);
}
