#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use std::rc::Rc;

use super::*;
use crate::function::FunctionReference;
use nf_diagnostic::ErrorCode;
use nf_ir::{FunctionDefinition, Parameter};
use pretty_assertions::assert_eq;

fn definition(params: &[&str], returns: &[&str]) -> Rc<FunctionDefinition> {
    Rc::new(FunctionDefinition {
        name: Some("f".to_string()),
        parameters: params
            .iter()
            .enumerate()
            .map(|(i, ty)| Parameter::new(format!("p{i}"), *ty))
            .collect(),
        return_types: returns.iter().map(ToString::to_string).collect(),
        body: Vec::new(),
        line: 1,
    })
}

#[test]
fn families_resolve_through_aliases() {
    let mut context = Context::new();
    assert_eq!(family(&context, "int"), Family::Int);
    assert_eq!(family(&context, "Double"), Family::Float);
    assert_eq!(family(&context, "char"), Family::Str);
    assert_eq!(family(&context, "List<Integer>"), Family::List);
    assert_eq!(family(&context, "Fun<Integer : Integer>"), Family::Fun);
    assert_eq!(family(&context, "Object"), Family::Any);
    assert_eq!(family(&context, "Bag"), Family::Any);

    context.add_type_alias("Bag", "nf.util.ArrayList");
    assert_eq!(family(&context, "Bag"), Family::List);
}

#[test]
fn coerce_accepts_widens_and_rejects() {
    let context = Context::new();
    let double = TypeRef::plain("Double");
    assert_eq!(coerce(&context, &double, Value::Int(2)).unwrap(), Value::Float(2.0));

    let err = coerce(&context, &TypeRef::plain("Integer"), Value::Float(1.5)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3003);
    assert_eq!(err.message, "type mismatch: expected Integer, got Double");

    let anything = TypeRef::plain("com.acme.Widget");
    assert_eq!(coerce(&context, &anything, Value::Bool(true)).unwrap(), Value::Bool(true));
}

#[test]
fn null_is_rejected_only_for_primitives() {
    let context = Context::new();
    assert_eq!(coerce(&context, &TypeRef::plain("Integer"), Value::Null).unwrap(), Value::Null);
    let err = coerce(&context, &TypeRef::plain("int"), Value::Null).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3003);
}

#[test]
fn function_signatures_must_match() {
    let context = Context::new();
    let declared = type_ref_of("Fun<int : Integer>");
    assert!(declared.signature.is_some());

    let matching = FunctionReference::named("f", definition(&["Integer"], &["int"]));
    let matching = Value::function(matching);
    assert!(coerce(&context, &declared, matching).is_ok());

    let wrong = FunctionReference::named("f", definition(&["String"], &["Integer"]));
    let wrong = Value::function(wrong);
    let err = coerce(&context, &declared, wrong).unwrap_err();
    assert_eq!(
        err.message,
        "type mismatch: expected Fun<int : Integer>, got Fun<String : Integer>"
    );

    let lambda =
        FunctionReference::lambda(definition(&["Object"], &[]), Vec::new(), context.root());
    assert!(coerce(&context, &declared, Value::function(lambda)).is_ok());

    let untyped = TypeRef::plain("Fun");
    let any_fn = Value::function(FunctionReference::named("f", definition(&[], &[])));
    assert!(coerce(&context, &untyped, any_fn).is_ok());
}

#[test]
fn defaults_depend_on_the_spelling() {
    let context = Context::new();
    assert_eq!(default_value(&context, &TypeRef::plain("int")), Value::Int(0));
    assert_eq!(default_value(&context, &TypeRef::plain("double")), Value::Float(0.0));
    assert_eq!(default_value(&context, &TypeRef::plain("char")), Value::from(""));
    assert_eq!(default_value(&context, &TypeRef::plain("Integer")), Value::Null);
}

#[test]
fn instantiate_collections_and_strings() {
    let context = Context::new();
    assert_eq!(instantiate(&context, "ArrayList", &[]).unwrap(), Value::list(Vec::new()));

    let source = Value::list(vec![Value::Int(1)]);
    let copy = instantiate(&context, "List", std::slice::from_ref(&source)).unwrap();
    assert_eq!(copy, source);
    if let (Value::List(a), Value::List(b)) = (&copy, &source) {
        assert!(!Rc::ptr_eq(a, b));
    }

    assert_eq!(instantiate(&context, "String", &[Value::Int(5)]).unwrap(), Value::from("5"));
    let err = instantiate(&context, "Random", &[]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3015);
}
