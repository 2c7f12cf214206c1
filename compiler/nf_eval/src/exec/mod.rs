//! Statement execution.
//!
//! Every statement returns a [`Flow`] telling the enclosing list whether to
//! keep going. Lists apply one rule for `return`, `break` and `continue`
//! (stop and hand the signal up) and a kind-dependent rule for `breakAll`:
//!
//! | list kind | on `breakAll`                                   |
//! |-----------|-------------------------------------------------|
//! | `Loop`    | stop; the loop ends and passes `BreakAll` up    |
//! | `Block`   | keep running; report `BreakAll` when the list ends |
//! | `Global`  | drop it; later top-level statements still run   |

mod call;
mod control;
mod expr;

pub use call::call_function;
pub use expr::{eval_expr, interpolate};

use nf_ir::{
    Assignment, EchoPart, Expr, ImportCategory, ImportDecl, NodeKind, Payload, RunStmt, SyntaxNode,
    VarDecl,
};
use nf_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use crate::errors::{type_mismatch, unknown_task, EvalError, EvalResult};
use crate::scope::{Binding, ScopeId};
use crate::scripts::import_script;
use crate::tasks::TaskContext;
use crate::types::{coerce, default_value};
use crate::{Context, Value};

/// What the enclosing statement list should do next.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
    Break,
    ContinueLoop,
    BreakAll,
}

/// Kind of statement list being executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListKind {
    Global,
    Loop,
    Block,
}

/// Evaluated call arguments.
pub(crate) type Args = SmallVec<[Value; 4]>;

/// Run `nodes` in order in `scope`.
pub fn execute_all(
    context: &mut Context,
    nodes: &[SyntaxNode],
    scope: ScopeId,
    kind: ListKind,
) -> Result<Flow, EvalError> {
    ensure_sufficient_stack(|| {
        let mut break_all = false;
        for node in nodes {
            let flow = execute(context, node, scope).map_err(|e| e.at_line(node.line_number()))?;
            match flow {
                Flow::Normal => {}
                Flow::Return(_) | Flow::Break | Flow::ContinueLoop => return Ok(flow),
                Flow::BreakAll => match kind {
                    ListKind::Loop => return Ok(Flow::BreakAll),
                    ListKind::Block => break_all = true,
                    ListKind::Global => {
                        tracing::debug!(line = node.line_number(), "breakAll dropped at top level");
                    }
                },
            }
        }
        Ok(if break_all { Flow::BreakAll } else { Flow::Normal })
    })
}

/// Run one statement.
pub fn execute(
    context: &mut Context,
    node: &SyntaxNode,
    scope: ScopeId,
) -> Result<Flow, EvalError> {
    tracing::trace!(kind = %node.kind(), line = node.line_number(), "execute");
    match (node.kind(), node.payload()) {
        (NodeKind::Import | NodeKind::Task, Payload::Import(decl)) => {
            import(context, decl).map(|()| Flow::Normal)
        }
        (NodeKind::Var, Payload::Var(decl)) => var(context, decl, scope).map(|()| Flow::Normal),
        (NodeKind::Assign, Payload::Assign(assignment)) => {
            assign(context, assignment, scope).map(|()| Flow::Normal)
        }
        (NodeKind::Declare, Payload::Declare { name, ty }) => {
            let value = default_value(context, ty);
            context.define(scope, name, Binding::typed(value, ty.clone()))?;
            Ok(Flow::Normal)
        }
        (NodeKind::Run, Payload::Run(stmt)) => {
            run_tasks(context, stmt, scope, node.line_number()).map(|()| Flow::Normal)
        }
        (NodeKind::Export, Payload::Export(expr)) => {
            let value = eval_expr(context, expr, scope)?;
            context.set_export(value);
            Ok(Flow::Normal)
        }
        (NodeKind::Echo, Payload::Echo(parts)) => {
            echo(context, parts, scope).map(|()| Flow::Normal)
        }
        (NodeKind::FunDef, Payload::FunDef(definition)) => {
            context.define_function(std::rc::Rc::clone(definition));
            Ok(Flow::Normal)
        }
        (NodeKind::Return, Payload::Return(values)) => {
            let value = return_value(context, values, scope)?;
            Ok(Flow::Return(value))
        }
        (NodeKind::Call, Payload::Call(expr)) => {
            eval_expr(context, expr, scope)?;
            Ok(Flow::Normal)
        }
        (NodeKind::If, _) => control::if_chain(context, node, scope),
        (NodeKind::While, Payload::Condition(cond)) => {
            control::while_loop(context, cond, node.children(), scope)
        }
        (NodeKind::DoWhile, Payload::Condition(cond)) => {
            control::do_while_loop(context, cond, node.children(), scope)
        }
        (NodeKind::For, Payload::For(range)) => {
            control::for_range(context, range, node.children(), scope)
        }
        (NodeKind::Switch, Payload::Switch(subject)) => {
            control::switch(context, subject, node.children(), scope)
        }
        (NodeKind::Break, _) => Ok(Flow::Break),
        (NodeKind::BreakAll, _) => Ok(Flow::BreakAll),
        (NodeKind::Continue, _) => Ok(Flow::ContinueLoop),
        (kind, _) => {
            tracing::debug!(%kind, "node without an executable payload");
            Ok(Flow::Normal)
        }
    }
}

fn import(context: &mut Context, decl: &ImportDecl) -> Result<(), EvalError> {
    match decl.category {
        ImportCategory::Type => context.add_type_alias(&decl.alias, &decl.path),
        ImportCategory::Task => context.add_task_alias(&decl.alias, &decl.path),
        ImportCategory::Script => return import_script(context, &decl.path),
    }
    Ok(())
}

/// `var a = e` binds in the current scope; `var a, b = e` unpacks a list.
fn var(context: &mut Context, decl: &VarDecl, scope: ScopeId) -> Result<(), EvalError> {
    let value = eval_expr(context, &decl.value, scope)?;
    if let [target] = decl.targets.as_slice() {
        return define_target(context, scope, &target.name, target.ty.as_ref(), value);
    }
    let Value::List(items) = &value else {
        return Err(type_mismatch(
            &format!("a list of {} values", decl.targets.len()),
            value.type_name(),
        ));
    };
    let items = items.borrow().clone();
    if items.len() != decl.targets.len() {
        return Err(type_mismatch(
            &format!("a list of {} values", decl.targets.len()),
            &format!("a list of {} values", items.len()),
        ));
    }
    for (target, item) in decl.targets.iter().zip(items) {
        define_target(context, scope, &target.name, target.ty.as_ref(), item)?;
    }
    Ok(())
}

fn define_target(
    context: &mut Context,
    scope: ScopeId,
    name: &str,
    ty: Option<&nf_ir::TypeRef>,
    value: Value,
) -> Result<(), EvalError> {
    let binding = match ty {
        Some(ty) => Binding::typed(coerce(context, ty, value)?, ty.clone()),
        None => Binding::new(value),
    };
    context.define(scope, name, binding)?;
    Ok(())
}

/// `T x = e` declares in the current scope. `x = e` updates the nearest
/// binding, or declares `x` here when nothing binds it yet.
fn assign(context: &mut Context, assignment: &Assignment, scope: ScopeId) -> Result<(), EvalError> {
    let value = eval_expr(context, &assignment.value, scope)?;
    if assignment.declared.is_some() {
        return define_target(
            context,
            scope,
            &assignment.name,
            assignment.declared.as_ref(),
            value,
        );
    }
    if context.assign(scope, &assignment.name, value.clone())? {
        return Ok(());
    }
    context.define(scope, &assignment.name, Binding::new(value))?;
    Ok(())
}

fn return_value(context: &mut Context, values: &[Expr], scope: ScopeId) -> EvalResult {
    match values {
        [] => Ok(Value::Null),
        [value] => eval_expr(context, value, scope),
        values => {
            let mut items = Vec::with_capacity(values.len());
            for value in values {
                items.push(eval_expr(context, value, scope)?);
            }
            Ok(Value::list(items))
        }
    }
}

/// `echo`: parts are concatenated without separators; string literals and
/// templates have `{name}` placeholders filled in.
fn echo(context: &mut Context, parts: &[EchoPart], scope: ScopeId) -> Result<(), EvalError> {
    let mut out = String::new();
    for part in parts {
        match part {
            EchoPart::Newline => out.push('\n'),
            EchoPart::Tab => out.push('\t'),
            EchoPart::Expr(Expr::Str(text)) => out.push_str(&interpolate(context, text, scope)?),
            EchoPart::Expr(expr) => {
                let value = eval_expr(context, expr, scope)?;
                out.push_str(&value.to_string());
            }
        }
    }
    context.print().println(&out);
    Ok(())
}

/// `run a(x), b(y) -> target`: resolve each alias, call each task in order,
/// bind the last result.
fn run_tasks(
    context: &mut Context,
    stmt: &RunStmt,
    scope: ScopeId,
    line: u32,
) -> Result<(), EvalError> {
    let tasks = context.tasks();
    let mut last = Value::Null;
    for call in &stmt.calls {
        let qualified = context
            .resolve_task(&call.alias)
            .unwrap_or(&call.alias)
            .to_string();
        let Some(task) = tasks.get(&qualified) else {
            let err = unknown_task(&call.alias);
            if qualified == call.alias {
                return Err(err);
            }
            return Err(err.with_note(format!("`{}` resolves to `{qualified}`", call.alias)));
        };
        let mut args = Args::new();
        for arg in &call.args {
            args.push(eval_expr(context, arg, scope)?);
        }
        tracing::debug!(task = %qualified, args = args.len(), "run task");
        let mut task_context = TaskContext::new(context, line);
        last = task.run(&args, &mut task_context)?;
    }
    if let Some(target) = &stmt.target {
        if !context.assign(scope, target, last.clone())? {
            context.define(scope, target, Binding::new(last))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
