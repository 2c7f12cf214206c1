#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::silent_handler;
use nf_diagnostic::ErrorCode;
use nf_ir::Parameter;
use pretty_assertions::assert_eq;

/// Executes `source` in a fresh context and keeps the context alive.
fn prepare(source: &str) -> Context {
    let tokens = nf_lexer::lex(source).unwrap();
    let program = nf_parse::parse(&tokens).unwrap();
    let mut context = Context::new().with_print_handler(silent_handler());
    let root = context.root();
    execute_all(&mut context, &program.nodes, root, ListKind::Global).unwrap();
    context
}

fn named(context: &Context, name: &str) -> FunctionReference {
    FunctionReference::named(name, Rc::clone(context.function(name).unwrap()))
}

fn bare(parameters: Vec<Parameter>, return_types: &[&str]) -> Rc<FunctionDefinition> {
    Rc::new(FunctionDefinition {
        name: None,
        parameters,
        return_types: return_types.iter().map(ToString::to_string).collect(),
        body: Vec::new(),
        line: 1,
    })
}

#[test]
fn named_call_binds_and_coerces_parameters() {
    let mut context = prepare("fun half(Double x) Double {\n  return x / 2\n}");
    let half = named(&context, "half");
    assert_eq!(invoke(&mut context, &half, &[Value::Int(3)]).unwrap(), Value::Float(1.5));

    let err = invoke(&mut context, &half, &[Value::from("3")]).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E3003);
    assert_eq!(context.live_scopes(), 1);
}

#[test]
fn arity_counts_a_variadic_tail_as_optional() {
    let mut context = Context::new();
    let definition = bare(
        vec![
            Parameter::new("first", "Integer"),
            Parameter::new("rest", "Integer").variadic(),
        ],
        &[],
    );
    let reference = FunctionReference::named("f", definition);
    let err = invoke(&mut context, &reference, &[]).unwrap_err();
    assert_eq!(
        err.kind,
        crate::EvalErrorKind::ArityMismatch {
            name: "f".to_string(),
            expected: 1,
            got: 0,
        }
    );
    assert_eq!(invoke(&mut context, &reference, &[Value::Int(1)]).unwrap(), Value::Null);
}

#[test]
fn body_without_return_yields_null() {
    let mut context = prepare("fun noop() {\n  x = 1\n}");
    let noop = named(&context, "noop");
    assert_eq!(invoke(&mut context, &noop, &[]).unwrap(), Value::Null);
    assert!(!context.is_defined(context.root(), "x").unwrap());
}

#[test]
fn lambda_signature_defaults_to_object() {
    let context = Context::new();
    let lambda = FunctionReference::lambda(
        bare(vec![Parameter::new("x", "Object")], &[]),
        Vec::new(),
        context.root(),
    );
    assert_eq!(lambda.signature.return_type, "Object");
    assert!(lambda.is_lambda());
    assert_eq!(lambda.name(), "<lambda>");
    assert_eq!(lambda.to_string(), "Lambda Fun<Object : Object>");

    let named = FunctionReference::named("g", bare(Vec::new(), &[]));
    assert_eq!(named.to_string(), "FunRef[g] Fun<: Void>");
    assert!(named.captured().is_empty());
}

#[test]
fn named_references_compare_by_definition() {
    let context = prepare("fun a() {\n}\nfun b() {\n}");
    assert_eq!(named(&context, "a"), named(&context, "a"));
    assert_ne!(named(&context, "a"), named(&context, "b"));

    let definition = bare(Vec::new(), &[]);
    let first = FunctionReference::lambda(Rc::clone(&definition), Vec::new(), context.root());
    let second = FunctionReference::lambda(definition, Vec::new(), context.root());
    assert_ne!(first, second);
}

#[test]
fn lambda_captures_are_a_snapshot() {
    let mut context = prepare("n = 1\nf = (x) -> x + n\nn = 100");
    let root = context.root();
    let f = context.get_variable(root, "f").unwrap().unwrap().value.clone();
    let reference = Rc::clone(f.as_function().unwrap());
    assert_eq!(reference.captured().len(), 1);
    assert_eq!(invoke(&mut context, &reference, &[Value::Int(1)]).unwrap(), Value::Int(2));
}

#[test]
fn cleared_context_invokes_in_a_fresh_one() {
    let mut context = prepare("fun answer() Integer {\n  return 42\n}");
    let answer = named(&context, "answer");
    context.clear();
    assert_eq!(invoke(&mut context, &answer, &[]).unwrap(), Value::Int(42));
    assert!(context.is_cleared());
}
