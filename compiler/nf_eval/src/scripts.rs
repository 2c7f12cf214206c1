//! Scripts pulled in with `import nf name`.
//!
//! A host parses each script once and registers its nodes in a
//! [`ScriptRegistry`]. Importing runs the script in a [`Context`] of its
//! own, which the importing context keeps until it is cleared:
//! `name.variable` reads one of the script's globals and
//! `name.function(args)` calls one of its functions in that context.

use std::cell::RefCell;
use std::rc::Rc;

use nf_ir::SyntaxNode;
use rustc_hash::FxHashMap;

use crate::errors::{
    circular_import, context_busy, undefined_variable, unknown_function, unknown_script,
    EvalError, EvalResult,
};
use crate::exec::{execute_all, ListKind};
use crate::function::{invoke, FunctionReference};
use crate::scope::Binding;
use crate::{hoist_functions, Context, Value, PARAMS_VARIABLE, PRE_VALUE_VARIABLE};

/// Parsed scripts by name.
#[derive(Default)]
pub struct ScriptRegistry {
    scripts: FxHashMap<String, Rc<[SyntaxNode]>>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `nodes` under `name`, replacing an earlier registration.
    pub fn register(&mut self, name: impl Into<String>, nodes: Vec<SyntaxNode>) {
        let name = name.into();
        tracing::debug!(script = %name, nodes = nodes.len(), "script registered");
        self.scripts.insert(name, nodes.into());
    }

    pub fn get(&self, name: &str) -> Option<Rc<[SyntaxNode]>> {
        self.scripts.get(name).map(Rc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

/// Run the script registered as `name` and keep its context in `context`.
///
/// A second import of the same name is ignored. The script sees `$params`
/// and `$preValue` as `null`; its `export` is discarded.
pub(crate) fn import_script(context: &mut Context, name: &str) -> Result<(), EvalError> {
    if context.imported_script(name).is_some() {
        tracing::debug!(script = name, "already imported");
        return Ok(());
    }
    if context.import_chain().iter().any(|outer| outer == name) {
        return Err(circular_import(context.import_chain(), name));
    }
    let Some(nodes) = context.scripts().get(name) else {
        return Err(unknown_script(name));
    };

    let mut script = context.for_import(name);
    let root = script.root();
    script.define(root, PARAMS_VARIABLE, Binding::new(Value::Null))?;
    script.define(root, PRE_VALUE_VARIABLE, Binding::new(Value::Null))?;
    hoist_functions(&mut script, &nodes);
    execute_all(&mut script, &nodes, root, ListKind::Global)
        .map_err(|err| err.with_note(format!("while importing script `{name}`")))?;
    script.take_export();

    tracing::debug!(script = name, scopes = script.live_scopes(), "script imported");
    context.add_imported_script(name, script);
    Ok(())
}

/// `script.name`: a global variable of the imported script.
pub(crate) fn read_global(
    script: &RefCell<Context>,
    script_name: &str,
    name: &str,
) -> EvalResult {
    let script = script.try_borrow().map_err(|_| context_busy())?;
    match script.get_variable(script.root(), name)? {
        Some(binding) => Ok(binding.value.clone()),
        None => Err(undefined_variable(name)
            .with_note(format!("script `{script_name}` has no global `{name}`"))),
    }
}

/// `script.function(args)`: call a function the imported script defines,
/// inside the script's own context.
pub(crate) fn call_in_script(
    script: &RefCell<Context>,
    script_name: &str,
    function: &str,
    args: &[Value],
) -> EvalResult {
    let mut script = script.try_borrow_mut().map_err(|_| context_busy())?;
    let Some(definition) = script.function(function).map(Rc::clone) else {
        return Err(unknown_function(function)
            .with_note(format!("script `{script_name}` defines no function `{function}`")));
    };
    let reference = FunctionReference::named(function, definition);
    invoke(&mut script, &reference, args)
}

#[cfg(test)]
mod tests;
