//! Control flow: if chains, loops and switch.
//!
//! Every branch, switch arm and loop iteration runs in a child scope that is
//! removed when it finishes.

use nf_ir::{CaseLabel, Expr, ForRange, Payload, SyntaxNode};

use super::{eval_expr, execute_all, Flow, ListKind};
use crate::errors::{invalid_range, type_mismatch, EvalError};
use crate::operators::{loose_eq, truth};
use crate::scope::{Binding, ScopeId, ScopeKind};
use crate::{Context, Value};

/// Whether a loop keeps iterating after one pass over its body.
enum LoopStep {
    Next,
    Exit(Flow),
}

/// Run `nodes` in a fresh child scope of `parent`, removing it afterwards.
fn in_child_scope(
    context: &mut Context,
    parent: ScopeId,
    kind: ScopeKind,
    nodes: &[SyntaxNode],
    bind: Option<(&str, Value)>,
) -> Result<Flow, EvalError> {
    let scope = context.create_child_scope(parent, kind)?;
    let list_kind = match kind {
        ScopeKind::Loop => ListKind::Loop,
        ScopeKind::Global | ScopeKind::Block => ListKind::Block,
    };
    let result = match bind {
        Some((name, value)) => context
            .define(scope, name, Binding::new(value))
            .map_err(EvalError::from)
            .and_then(|()| execute_all(context, nodes, scope, list_kind)),
        None => execute_all(context, nodes, scope, list_kind),
    };
    let removed = context.remove_scope(scope);
    let flow = result?;
    removed?;
    Ok(flow)
}

/// One loop iteration.
fn iterate(
    context: &mut Context,
    parent: ScopeId,
    body: &[SyntaxNode],
    bind: Option<(&str, Value)>,
) -> Result<LoopStep, EvalError> {
    let flow = in_child_scope(context, parent, ScopeKind::Loop, body, bind)?;
    Ok(match flow {
        Flow::Normal | Flow::ContinueLoop => LoopStep::Next,
        Flow::Break => LoopStep::Exit(Flow::Normal),
        Flow::BreakAll | Flow::Return(_) => {
            tracing::trace!(?flow, "loop exit");
            LoopStep::Exit(flow)
        }
    })
}

fn condition(context: &mut Context, cond: &Expr, scope: ScopeId) -> Result<bool, EvalError> {
    let value = eval_expr(context, cond, scope)?;
    truth(&value)
}

pub(super) fn if_chain(
    context: &mut Context,
    node: &SyntaxNode,
    scope: ScopeId,
) -> Result<Flow, EvalError> {
    for arm in node.children() {
        let taken = match arm.payload() {
            Payload::Branch(Some(cond)) => {
                condition(context, cond, scope).map_err(|e| e.at_line(arm.line_number()))?
            }
            _ => true,
        };
        if taken {
            return in_child_scope(context, scope, ScopeKind::Block, arm.children(), None);
        }
    }
    Ok(Flow::Normal)
}

pub(super) fn while_loop(
    context: &mut Context,
    cond: &Expr,
    body: &[SyntaxNode],
    scope: ScopeId,
) -> Result<Flow, EvalError> {
    while condition(context, cond, scope)? {
        if let LoopStep::Exit(flow) = iterate(context, scope, body, None)? {
            return Ok(flow);
        }
    }
    Ok(Flow::Normal)
}

pub(super) fn do_while_loop(
    context: &mut Context,
    cond: &Expr,
    body: &[SyntaxNode],
    scope: ScopeId,
) -> Result<Flow, EvalError> {
    loop {
        if let LoopStep::Exit(flow) = iterate(context, scope, body, None)? {
            return Ok(flow);
        }
        if !condition(context, cond, scope)? {
            return Ok(Flow::Normal);
        }
    }
}

/// `for i in a..b`: both bounds inclusive, evaluated once. A start past the
/// end is an error rather than an empty loop.
pub(super) fn for_range(
    context: &mut Context,
    range: &ForRange,
    body: &[SyntaxNode],
    scope: ScopeId,
) -> Result<Flow, EvalError> {
    let start = bound(context, &range.start, scope)?;
    let end = bound(context, &range.end, scope)?;
    if start > end {
        return Err(invalid_range(start, end));
    }
    for i in start..=end {
        let bind = Some((range.var.as_str(), Value::Int(i)));
        if let LoopStep::Exit(flow) = iterate(context, scope, body, bind)? {
            return Ok(flow);
        }
    }
    Ok(Flow::Normal)
}

fn bound(context: &mut Context, expr: &Expr, scope: ScopeId) -> Result<i64, EvalError> {
    let value = eval_expr(context, expr, scope)?;
    value
        .as_int()
        .ok_or_else(|| type_mismatch("an integer range bound", value.type_name()))
}

/// The first arm whose label matches runs; `default` runs when none does.
/// Arms do not fall through.
pub(super) fn switch(
    context: &mut Context,
    subject: &Expr,
    arms: &[SyntaxNode],
    scope: ScopeId,
) -> Result<Flow, EvalError> {
    let subject = eval_expr(context, subject, scope)?;
    let mut default = None;
    for arm in arms {
        match arm.payload() {
            Payload::Case(CaseLabel::Values(values)) => {
                for value in values {
                    let label = eval_expr(context, value, scope)?;
                    if loose_eq(&subject, &label) {
                        let body = arm.children();
                        return in_child_scope(context, scope, ScopeKind::Block, body, None);
                    }
                }
            }
            Payload::Case(CaseLabel::Default) => default = Some(arm),
            _ => {}
        }
    }
    match default {
        Some(arm) => in_child_scope(context, scope, ScopeKind::Block, arm.children(), None),
        None => Ok(Flow::Normal),
    }
}
