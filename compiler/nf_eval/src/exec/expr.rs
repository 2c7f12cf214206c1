//! Expression evaluation.

use std::cell::RefCell;
use std::rc::Rc;

use nf_ir::{BinaryOp, Expr, UnaryOp};
use nf_stack::ensure_sufficient_stack;

use super::call::{call_by_name, call_method_expr, make_lambda, named_reference};
use super::Args;
use crate::errors::{method_not_found, undefined_variable, EvalError, EvalResult};
use crate::operators::{evaluate_binary, negate, truth};
use crate::scope::ScopeId;
use crate::scripts::{call_in_script, read_global};
use crate::types::instantiate;
use crate::{Context, Value};

pub fn eval_expr(context: &mut Context, expr: &Expr, scope: ScopeId) -> EvalResult {
    ensure_sufficient_stack(|| match expr {
        Expr::Int(n) => Ok(Value::Int(*n)),
        Expr::Float(n) => Ok(Value::Float(*n)),
        Expr::Str(s) => Ok(Value::Str(s.clone())),
        Expr::Template(body) => Ok(Value::string(interpolate(context, body, scope)?)),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Null => Ok(Value::Null),
        Expr::Ident(name) => lookup(context, name, scope),
        Expr::Unary {
            op: UnaryOp::Neg,
            operand,
        } => negate(&eval_expr(context, operand, scope)?),
        Expr::Binary { op, left, right } => binary(context, *op, left, right, scope),
        Expr::Call { callee, args } => {
            let args = eval_args(context, args, scope)?;
            call_by_name(context, callee, &args, scope)
        }
        Expr::MethodCall {
            receiver,
            method,
            args,
        } => {
            if let Some((name, script)) = imported_receiver(context, receiver) {
                let args = eval_args(context, args, scope)?;
                return call_in_script(&script, name, method, &args);
            }
            let receiver = eval_expr(context, receiver, scope)?;
            let args = eval_args(context, args, scope)?;
            call_method_expr(context, &receiver, method, &args)
        }
        Expr::Member { receiver, name } => {
            if let Some((script_name, script)) = imported_receiver(context, receiver) {
                return read_global(&script, script_name, name);
            }
            let receiver = eval_expr(context, receiver, scope)?;
            Err(method_not_found(name, receiver.type_name())
                .with_note("only imported scripts expose members without a call"))
        }
        Expr::New { type_name, args } => {
            let args = eval_args(context, args, scope)?;
            instantiate(context, type_name, &args)
        }
        Expr::Lambda(definition) => make_lambda(context, definition, scope),
    })
}

/// The context behind `name` in `name.x` when `name` is an imported script.
///
/// Script names take precedence over variables of the same name.
fn imported_receiver<'e>(
    context: &Context,
    receiver: &'e Expr,
) -> Option<(&'e str, Rc<RefCell<Context>>)> {
    let name = receiver.as_ident()?;
    context.imported_script(name).map(|script| (name, script))
}

/// A variable, or a named function used as a value.
fn lookup(context: &Context, name: &str, scope: ScopeId) -> EvalResult {
    if let Some(binding) = context.get_variable(scope, name)? {
        return Ok(binding.value.clone());
    }
    named_reference(context, name).ok_or_else(|| undefined_variable(name))
}

fn binary(
    context: &mut Context,
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    scope: ScopeId,
) -> EvalResult {
    let left = eval_expr(context, left, scope)?;
    match op {
        BinaryOp::And if !truth(&left)? => Ok(Value::Bool(false)),
        BinaryOp::Or if truth(&left)? => Ok(Value::Bool(true)),
        _ => {
            let right = eval_expr(context, right, scope)?;
            evaluate_binary(op, &left, &right)
        }
    }
}

pub(super) fn eval_args(
    context: &mut Context,
    args: &[Expr],
    scope: ScopeId,
) -> Result<Args, EvalError> {
    let mut values = Args::new();
    for arg in args {
        values.push(eval_expr(context, arg, scope)?);
    }
    Ok(values)
}

/// Replace each `{name}` in `text` with the value of `name`.
///
/// Braces around anything that is not an identifier are kept as written.
pub fn interpolate(context: &Context, text: &str, scope: ScopeId) -> Result<String, EvalError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_identifier(&after[..close]) => {
                let name = &after[..close];
                let value = lookup(context, name, scope)?;
                out.push_str(&value.to_string());
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    Ok(out)
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests;
