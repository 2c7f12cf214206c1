//! Function values and invocation.
//!
//! A [`FunctionReference`] is either a reference to a named `fun` definition
//! or a lambda. A lambda carries a snapshot of every variable visible when it
//! was created plus the handle of the scope it was created in; later changes
//! to those variables are not seen by the lambda.

use std::fmt;
use std::rc::Rc;

use nf_ir::{FunctionDefinition, FunctionSignature};

use crate::errors::{arity_mismatch, EvalResult};
use crate::exec::{execute_all, Flow, ListKind};
use crate::scope::{Binding, ScopeId, ScopeKind};
use crate::types::{coerce, type_ref_of};
use crate::{Context, Value};

#[derive(Clone, Debug)]
pub enum ReferenceKind {
    Named { name: String },
    Lambda {
        captured: Vec<(String, Value)>,
        capture_scope: ScopeId,
    },
}

#[derive(Clone, Debug)]
pub struct FunctionReference {
    pub definition: Rc<FunctionDefinition>,
    pub signature: FunctionSignature,
    pub kind: ReferenceKind,
}

impl FunctionReference {
    pub fn named(name: impl Into<String>, definition: Rc<FunctionDefinition>) -> Self {
        let signature = FunctionSignature::from_definition(&definition);
        FunctionReference {
            definition,
            signature,
            kind: ReferenceKind::Named { name: name.into() },
        }
    }

    /// A lambda over `definition`. Without declared return types the
    /// signature returns `Object`.
    pub fn lambda(
        definition: Rc<FunctionDefinition>,
        captured: Vec<(String, Value)>,
        capture_scope: ScopeId,
    ) -> Self {
        let mut signature = FunctionSignature::from_definition(&definition);
        if definition.return_types.is_empty() {
            signature.return_type = "Object".to_string();
        }
        FunctionReference {
            definition,
            signature,
            kind: ReferenceKind::Lambda {
                captured,
                capture_scope,
            },
        }
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            ReferenceKind::Named { name } => name,
            ReferenceKind::Lambda { .. } => self.definition.display_name(),
        }
    }

    pub fn is_lambda(&self) -> bool {
        matches!(self.kind, ReferenceKind::Lambda { .. })
    }

    pub fn captured(&self) -> &[(String, Value)] {
        match &self.kind {
            ReferenceKind::Lambda { captured, .. } => captured,
            ReferenceKind::Named { .. } => &[],
        }
    }
}

/// Named references are equal when they name the same definition; lambdas
/// only equal themselves.
impl PartialEq for FunctionReference {
    fn eq(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (ReferenceKind::Named { name: a }, ReferenceKind::Named { name: b }) => {
                a == b && Rc::ptr_eq(&self.definition, &other.definition)
            }
            (ReferenceKind::Lambda { .. }, ReferenceKind::Lambda { .. }) => {
                std::ptr::eq(self, other)
            }
            _ => false,
        }
    }
}

impl fmt::Display for FunctionReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ReferenceKind::Named { name } => write!(f, "FunRef[{name}] {}", self.signature),
            ReferenceKind::Lambda { .. } => write!(f, "Lambda {}", self.signature),
        }
    }
}

/// Call `reference` with positional `args`.
///
/// A cleared context is replaced by a [`Context::fresh`] copy for the
/// duration of the call. `break` and `breakAll` stop at the call boundary.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(function = reference.name(), args = args.len())
)]
pub fn invoke(context: &mut Context, reference: &FunctionReference, args: &[Value]) -> EvalResult {
    if context.is_cleared() {
        tracing::debug!("context cleared; invoking in a fresh context");
        let mut fresh = context.fresh();
        let result = invoke_in(&mut fresh, reference, args);
        fresh.clear();
        return result;
    }
    invoke_in(context, reference, args)
}

fn invoke_in(context: &mut Context, reference: &FunctionReference, args: &[Value]) -> EvalResult {
    let parent = match &reference.kind {
        ReferenceKind::Lambda { capture_scope, .. } => context.resolve_scope(*capture_scope),
        ReferenceKind::Named { .. } => context.root(),
    };
    let scope = context.create_child_scope(parent, ScopeKind::Block)?;
    let result = bind_and_run(context, reference, args, scope);
    let removed = context.remove_scope(scope);
    let value = result?;
    removed?;
    Ok(value)
}

fn bind_and_run(
    context: &mut Context,
    reference: &FunctionReference,
    args: &[Value],
    scope: ScopeId,
) -> EvalResult {
    let definition = &reference.definition;
    let parameters = &definition.parameters;
    let arity_ok = if definition.is_variadic() {
        args.len() + 1 >= parameters.len()
    } else {
        args.len() == parameters.len()
    };
    if !arity_ok {
        let expected = parameters.len() - usize::from(definition.is_variadic());
        return Err(arity_mismatch(reference.name(), expected, args.len()));
    }

    for (i, parameter) in parameters.iter().enumerate() {
        let declared = type_ref_of(&parameter.ty);
        let binding = if parameter.variadic {
            let rest = args[i..]
                .iter()
                .map(|arg| coerce(context, &declared, arg.clone()))
                .collect::<Result<Vec<_>, _>>()?;
            Binding::new(Value::list(rest))
        } else {
            Binding::typed(coerce(context, &declared, args[i].clone())?, declared)
        };
        context.define(scope, &parameter.name, binding)?;
    }

    for (name, value) in reference.captured() {
        if parameters.iter().any(|p| p.name == *name) {
            continue;
        }
        context.define(scope, name, Binding::new(value.clone()))?;
    }

    match execute_all(context, &definition.body, scope, ListKind::Block)? {
        Flow::Return(value) => Ok(value),
        flow => {
            if flow != Flow::Normal {
                tracing::debug!(?flow, "absorbed at call boundary");
            }
            Ok(Value::Null)
        }
    }
}

#[cfg(test)]
mod tests;
