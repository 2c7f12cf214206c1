//! Declared-type checks.
//!
//! A declared type is resolved through the context's type alias table and
//! mapped to a [`Family`]. Values are checked (and `Int` widened to `Float`)
//! against known families; `Object` and host types the interpreter knows
//! nothing about accept any value.

use nf_ir::{FunctionSignature, TypeRef};

use crate::errors::{cannot_instantiate, type_mismatch, EvalError};
use crate::function::ReferenceKind;
use crate::{Context, Value};

/// Runtime representation a declared type maps to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Family {
    Int,
    Float,
    Str,
    Bool,
    List,
    Map,
    Fun,
    Any,
}

impl Family {
    pub fn of_qualified(qualified: &str) -> Family {
        match qualified {
            "nf.lang.Integer" | "nf.lang.Long" | "nf.lang.Short" | "nf.lang.Byte" => Family::Int,
            "nf.lang.Double" | "nf.lang.Float" => Family::Float,
            "nf.lang.String" | "nf.lang.StringBuilder" | "nf.lang.Character" => Family::Str,
            "nf.lang.Boolean" => Family::Bool,
            "nf.util.List" | "nf.util.ArrayList" | "nf.util.LinkedList" | "nf.util.Set"
            | "nf.util.HashSet" => Family::List,
            "nf.util.Map" | "nf.util.HashMap" | "nf.util.TreeMap" => Family::Map,
            "nf.lang.Fun" => Family::Fun,
            _ => Family::Any,
        }
    }
}

/// `List<Integer>` -> `List`.
fn base_name(name: &str) -> &str {
    name.split('<').next().map_or(name, str::trim)
}

/// Lowercase primitive spellings cannot hold `null`.
fn is_primitive(name: &str) -> bool {
    matches!(
        name,
        "int" | "long" | "short" | "byte" | "char" | "float" | "double" | "boolean" | "bool"
    )
}

pub fn family(context: &Context, name: &str) -> Family {
    Family::of_qualified(context.resolve_type(base_name(name)))
}

/// Type annotation for a parameter's declared type text.
pub fn type_ref_of(text: &str) -> TypeRef {
    TypeRef {
        name: text.to_string(),
        signature: text
            .starts_with("Fun<")
            .then(|| FunctionSignature::parse(text).ok())
            .flatten(),
    }
}

/// Check `value` against `declared`, widening `Int` to `Float` where the
/// declared type is a floating family.
pub fn coerce(context: &Context, declared: &TypeRef, value: Value) -> Result<Value, EvalError> {
    if value.is_null() {
        if is_primitive(&declared.name) {
            return Err(type_mismatch(&declared.to_string(), "null"));
        }
        return Ok(value);
    }
    let accepted = match (family(context, &declared.name), &value) {
        (Family::Any, _)
        | (Family::Int, Value::Int(_))
        | (Family::Float, Value::Float(_))
        | (Family::Str, Value::Str(_))
        | (Family::Bool, Value::Bool(_))
        | (Family::List, Value::List(_))
        | (Family::Map, Value::Map(_)) => true,
        (Family::Float, Value::Int(n)) => return Ok(Value::Float(widen(*n))),
        (Family::Fun, Value::Function(reference)) => match &declared.signature {
            None => true,
            Some(expected) => match reference.kind {
                ReferenceKind::Named { .. } => reference.signature == *expected,
                ReferenceKind::Lambda { .. } => reference.signature.arity() == expected.arity(),
            },
        },
        _ => false,
    };
    if accepted {
        Ok(value)
    } else {
        Err(type_mismatch(&declared.to_string(), &describe(&value)))
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Function(reference) => reference.signature.to_string(),
        other => other.type_name().to_string(),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integer to double widening matches the script's numeric model"
)]
pub fn widen(n: i64) -> f64 {
    n as f64
}

/// Value a `Type name` declaration starts with.
pub fn default_value(context: &Context, declared: &TypeRef) -> Value {
    if !is_primitive(&declared.name) {
        return Value::Null;
    }
    match family(context, &declared.name) {
        Family::Int => Value::Int(0),
        Family::Float => Value::Float(0.0),
        Family::Bool => Value::Bool(false),
        Family::Str => Value::string(""),
        _ => Value::Null,
    }
}

/// `new Type(args)`.
pub fn instantiate(context: &Context, type_name: &str, args: &[Value]) -> Result<Value, EvalError> {
    match family(context, type_name) {
        Family::List if args.is_empty() => Ok(Value::list(Vec::new())),
        Family::List => match &args[0] {
            Value::List(items) if args.len() == 1 => Ok(Value::list(items.borrow().clone())),
            _ => Err(cannot_instantiate(type_name)),
        },
        Family::Map if args.is_empty() => Ok(Value::map(Default::default())),
        Family::Map => match &args[0] {
            Value::Map(entries) if args.len() == 1 => Ok(Value::map(entries.borrow().clone())),
            _ => Err(cannot_instantiate(type_name)),
        },
        Family::Str => match args {
            [] => Ok(Value::string("")),
            [value] => Ok(Value::string(value.to_string())),
            _ => Err(cannot_instantiate(type_name)),
        },
        _ => Err(cannot_instantiate(type_name)),
    }
}

#[cfg(test)]
mod tests;
