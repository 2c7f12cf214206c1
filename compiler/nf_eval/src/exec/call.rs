//! Calls: named functions, function-valued variables and methods.

use std::rc::Rc;

use nf_ir::FunctionDefinition;

use crate::errors::{not_callable, unknown_function, EvalResult};
use crate::function::{invoke, FunctionReference};
use crate::methods::call_method;
use crate::scope::ScopeId;
use crate::{Context, Value};

/// Methods that call a function value directly (`f.apply(x)`).
const CALL_METHODS: &[&str] = &["apply", "get", "run", "accept", "call"];

/// `name(args)`: a variable holding a function wins over the function table.
pub(super) fn call_by_name(
    context: &mut Context,
    callee: &str,
    args: &[Value],
    scope: ScopeId,
) -> EvalResult {
    if let Some(binding) = context.get_variable(scope, callee)? {
        let value = binding.value.clone();
        return call_function(context, &value, args);
    }
    let Some(definition) = context.function(callee).map(Rc::clone) else {
        return Err(unknown_function(callee));
    };
    let reference = FunctionReference::named(callee, definition);
    invoke(context, &reference, args)
}

/// Call a function value.
pub fn call_function(context: &mut Context, callee: &Value, args: &[Value]) -> EvalResult {
    match callee {
        Value::Function(reference) => invoke(context, reference, args),
        other => Err(not_callable(other.type_name())),
    }
}

pub(super) fn call_method_expr(
    context: &mut Context,
    receiver: &Value,
    method: &str,
    args: &[Value],
) -> EvalResult {
    if let Value::Function(reference) = receiver {
        if CALL_METHODS.contains(&method) {
            return invoke(context, reference, args);
        }
    }
    call_method(receiver, method, args)
}

/// Snapshot every visible variable into a new lambda value.
pub(super) fn make_lambda(
    context: &Context,
    definition: &Rc<FunctionDefinition>,
    scope: ScopeId,
) -> EvalResult {
    let captured = context.visible_variables(scope)?;
    tracing::trace!(captured = captured.len(), "lambda created");
    Ok(Value::function(FunctionReference::lambda(
        Rc::clone(definition),
        captured,
        scope,
    )))
}

/// A named function used as a value.
pub(super) fn named_reference(context: &Context, name: &str) -> Option<Value> {
    context
        .function(name)
        .map(|definition| Value::function(FunctionReference::named(name, Rc::clone(definition))))
}
