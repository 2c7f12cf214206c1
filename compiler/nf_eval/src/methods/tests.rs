#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::EvalErrorKind;
use nf_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

fn call(receiver: &Value, method: &str, args: &[Value]) -> Value {
    call_method(receiver, method, args).unwrap()
}

fn ints(values: &[i64]) -> Value {
    Value::list(values.iter().copied().map(Value::Int).collect())
}

#[test]
fn string_methods() {
    let s = Value::from("  Héllo ");
    assert_eq!(call(&s, "length", &[]), Value::Int(8));
    assert_eq!(call(&s, "trim", &[]), Value::from("Héllo"));
    assert_eq!(call(&s, "toUpperCase", &[]), Value::from("  HÉLLO "));
    assert_eq!(call(&s, "contains", &[Value::from("ll")]), Value::Bool(true));
    assert_eq!(call(&s, "startsWith", &[Value::from("  H")]), Value::Bool(true));
    assert_eq!(call(&s, "endsWith", &[Value::from("x")]), Value::Bool(false));
}

#[test]
fn substring_counts_characters() {
    let s = Value::from("héllo");
    assert_eq!(call(&s, "substring", &[Value::Int(1)]), Value::from("éllo"));
    assert_eq!(call(&s, "substring", &[Value::Int(1), Value::Int(3)]), Value::from("él"));
    assert_eq!(call(&s, "substring", &[Value::Int(5)]), Value::from(""));

    let err = call_method(&s, "substring", &[Value::Int(3), Value::Int(2)]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3014);
    let err = call_method(&s, "substring", &[Value::Int(-1)]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3014);
}

#[test]
fn list_methods_mutate_the_shared_list() {
    let list = ints(&[1, 2]);
    assert_eq!(call(&list, "add", &[Value::Int(3)]), Value::Bool(true));
    assert_eq!(call(&list, "set", &[Value::Int(0), Value::Int(9)]), Value::Int(1));
    assert_eq!(call(&list, "remove", &[Value::Int(1)]), Value::Int(2));
    assert_eq!(list.to_string(), "[9, 3]");
    assert_eq!(call(&list, "size", &[]), Value::Int(2));
    assert_eq!(call(&list, "contains", &[Value::Float(3.0)]), Value::Bool(true));
    assert_eq!(call(&list, "get", &[Value::Int(0)]), Value::Int(9));

    let err = call_method(&list, "get", &[Value::Int(2)]).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::IndexOutOfBounds { index: 2, len: 2 });
}

#[test]
fn min_and_max_return_the_element() {
    let list = ints(&[4, -2, 7]);
    assert_eq!(call(&list, "min", &[]), Value::Int(-2));
    assert_eq!(call(&list, "max", &[]), Value::Int(7));

    let words = Value::list(vec![Value::from("pear"), Value::from("apple")]);
    assert_eq!(call(&words, "min", &[]), Value::from("apple"));

    let empty = ints(&[]);
    assert_eq!(call(&empty, "min", &[]), Value::Null);
    assert_eq!(call(&empty, "max", &[]), Value::Null);

    let mixed = Value::list(vec![Value::Int(1), Value::from("a")]);
    assert_eq!(call_method(&mixed, "max", &[]).unwrap_err().code(), ErrorCode::E3003);
}

#[test]
fn map_methods() {
    let map = Value::map(Default::default());
    assert_eq!(call(&map, "put", &[Value::from("k"), Value::Int(1)]), Value::Null);
    assert_eq!(call(&map, "put", &[Value::from("k"), Value::Int(2)]), Value::Int(1));
    assert_eq!(call(&map, "put", &[Value::Int(5), Value::Bool(true)]), Value::Null);
    assert_eq!(call(&map, "get", &[Value::from("5")]), Value::Bool(true));
    assert_eq!(call(&map, "containsKey", &[Value::from("k")]), Value::Bool(true));
    assert_eq!(call(&map, "remove", &[Value::from("k")]), Value::Int(2));
    assert_eq!(call(&map, "get", &[Value::from("k")]), Value::Null);
    assert_eq!(call(&map, "size", &[]), Value::Int(1));
}

#[test]
fn universal_methods() {
    assert_eq!(call(&Value::Int(1), "equals", &[Value::Float(1.0)]), Value::Bool(true));
    assert_eq!(call(&ints(&[1]), "toString", &[]), Value::from("[1]"));
}

#[test]
fn unknown_methods_and_bad_arguments() {
    let err = call_method(&Value::Int(1), "size", &[]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3012);
    assert_eq!(err.message, "no method `size` on Integer");

    let err = call_method(&Value::from("s"), "contains", &[]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3002);

    let err = call_method(&Value::from("s"), "contains", &[Value::Int(1)]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3003);
}
