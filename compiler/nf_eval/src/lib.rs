//! Tree-walking interpreter for NF scripts.
//!
//! Executes the node list built by `nf_parse` against a [`Context`]:
//! - `scope`: generation-checked scope arena
//! - `context`: per-run state (scopes, aliases, functions, host tasks)
//! - `exec`: statement execution and the [`Flow`] propagation rules
//! - `function`: function values, lambdas and [`invoke`]
//! - `adapter`: exposing closures to host code as [`HostCallable`]s
//! - `tasks`: host tasks called by `run` statements
//! - `scripts`: registered scripts reached through `import nf`
//!
//! # Lifecycle
//!
//! [`run`] executes one program and clears its context afterwards. Lambdas
//! that escape the run stay callable: they execute in a fresh context built
//! from the cleared one.

mod adapter;
mod context;
mod errors;
mod exec;
mod function;
mod methods;
mod operators;
mod print_handler;
mod scope;
mod scripts;
mod tasks;
mod types;
mod value;

pub use adapter::{ClosureAdapter, HostCallable, HostInterface, HostMethod};
pub use context::Context;
pub use errors::{
    arity_mismatch, host_task_failed, type_mismatch, EvalError, EvalErrorKind, EvalResult,
};
pub use exec::{call_function, eval_expr, execute, execute_all, interpolate, Flow, ListKind};
pub use function::{invoke, FunctionReference, ReferenceKind};
pub use methods::call_method;
pub use operators::{compare, evaluate_binary, loose_eq};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use scope::{Binding, Scope, ScopeArena, ScopeError, ScopeId, ScopeKind};
pub use scripts::ScriptRegistry;
pub use tasks::{HostTask, TaskContext, TaskRegistry};
pub use types::{coerce, Family};
pub use value::{ListRef, MapRef, Value};

use std::collections::BTreeMap;
use std::rc::Rc;

use nf_ir::{NodeKind, Payload, SyntaxNode};

/// Root-scope name of [`ScriptInput::params`].
pub const PARAMS_VARIABLE: &str = "$params";
/// Root-scope name of [`ScriptInput::pre_value`].
pub const PRE_VALUE_VARIABLE: &str = "$preValue";

/// Inputs bound in the root scope before a run.
#[derive(Clone, Debug, Default)]
pub struct ScriptInput {
    /// Bound as the map `$params`.
    pub params: BTreeMap<String, Value>,
    /// Bound as `$preValue`; `null` when absent.
    pub pre_value: Option<Value>,
}

/// Result of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// Value of the last `export` statement executed.
    pub export: Option<Value>,
}

/// Execute `nodes` as a whole script, then clear `context`.
///
/// Top-level `fun` definitions are registered before the first statement
/// runs, so a function may be called above its definition.
#[tracing::instrument(level = "debug", skip_all, fields(nodes = nodes.len()))]
pub fn run(
    nodes: &[SyntaxNode],
    context: &mut Context,
    input: ScriptInput,
) -> Result<RunOutcome, EvalError> {
    let result = run_uncleared(nodes, context, input);
    context.clear();
    result
}

fn run_uncleared(
    nodes: &[SyntaxNode],
    context: &mut Context,
    input: ScriptInput,
) -> Result<RunOutcome, EvalError> {
    let root = context.root();
    context.define(root, PARAMS_VARIABLE, Binding::new(Value::map(input.params)))?;
    context.define(
        root,
        PRE_VALUE_VARIABLE,
        Binding::new(input.pre_value.unwrap_or_default()),
    )?;

    hoist_functions(context, nodes);

    let flow = execute_all(context, nodes, root, ListKind::Global)?;
    if flow != Flow::Normal {
        tracing::debug!(?flow, "script stopped early");
    }
    Ok(RunOutcome {
        export: context.take_export(),
    })
}

/// Register every top-level `fun` before the first statement runs.
pub(crate) fn hoist_functions(context: &mut Context, nodes: &[SyntaxNode]) {
    for node in nodes {
        if let (NodeKind::FunDef, Payload::FunDef(definition)) = (node.kind(), node.payload()) {
            context.define_function(Rc::clone(definition));
        }
    }
}
