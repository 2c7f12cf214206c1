#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::rc::Rc;

use super::*;
use crate::scope::Binding;
use nf_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn context_with(vars: &[(&str, Value)]) -> (Context, ScopeId) {
    let mut context = Context::new();
    let root = context.root();
    for (name, value) in vars {
        context.define(root, name, Binding::new(value.clone())).unwrap();
    }
    (context, root)
}

fn ident(name: &str) -> Box<Expr> {
    Box::new(Expr::Ident(name.to_string()))
}

#[test]
fn interpolation_fills_identifiers_only() {
    let (context, root) = context_with(&[("name", Value::from("nf")), ("n", Value::Int(3))]);
    assert_eq!(interpolate(&context, "hi {name}!", root).unwrap(), "hi nf!");
    assert_eq!(interpolate(&context, "{n}{n}", root).unwrap(), "33");
    assert_eq!(interpolate(&context, "{ n } {1x} {", root).unwrap(), "{ n } {1x} {");
    assert_eq!(interpolate(&context, "no braces", root).unwrap(), "no braces");
}

#[test]
fn interpolating_an_unknown_name_fails() {
    let (context, root) = context_with(&[]);
    let err = interpolate(&context, "{ghost}", root).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3001);
}

#[test]
fn identifier_shapes() {
    assert!(is_identifier("_a1"));
    assert!(is_identifier("名前"));
    assert!(!is_identifier(""));
    assert!(!is_identifier("1a"));
    assert!(!is_identifier("a b"));
}

#[test]
fn logical_operators_short_circuit() {
    let (mut context, root) = context_with(&[("f", Value::Bool(false)), ("t", Value::Bool(true))]);
    let and = Expr::Binary {
        op: BinaryOp::And,
        left: ident("f"),
        right: ident("undefined"),
    };
    assert_eq!(eval_expr(&mut context, &and, root).unwrap(), Value::Bool(false));

    let or = Expr::Binary {
        op: BinaryOp::Or,
        left: ident("t"),
        right: ident("undefined"),
    };
    assert_eq!(eval_expr(&mut context, &or, root).unwrap(), Value::Bool(true));

    let strict = Expr::Binary {
        op: BinaryOp::And,
        left: ident("t"),
        right: ident("undefined"),
    };
    let err = eval_expr(&mut context, &strict, root).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3001);
}

#[test]
fn templates_and_literals() {
    let (mut context, root) = context_with(&[("x", Value::Int(7))]);
    let template = Expr::Template(Rc::from("x={x}"));
    assert_eq!(eval_expr(&mut context, &template, root).unwrap(), Value::from("x=7"));

    let literal = Expr::Str(Rc::from("x={x}"));
    assert_eq!(eval_expr(&mut context, &literal, root).unwrap(), Value::from("x={x}"));

    let negated = Expr::Unary {
        op: UnaryOp::Neg,
        operand: ident("x"),
    };
    assert_eq!(eval_expr(&mut context, &negated, root).unwrap(), Value::Int(-7));
}

#[test]
fn method_calls_and_new() {
    let (mut context, root) = context_with(&[]);
    let expr = Expr::MethodCall {
        receiver: Box::new(Expr::New {
            type_name: "String".to_string(),
            args: vec![Expr::Int(42)],
        }),
        method: "length".to_string(),
        args: Vec::new(),
    };
    assert_eq!(eval_expr(&mut context, &expr, root).unwrap(), Value::Int(2));
}

#[test]
fn calling_a_variable_that_is_not_a_function() {
    let (mut context, root) = context_with(&[("n", Value::Int(1))]);
    let call = Expr::Call {
        callee: "n".to_string(),
        args: Vec::new(),
    };
    let err = eval_expr(&mut context, &call, root).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3013);
}
