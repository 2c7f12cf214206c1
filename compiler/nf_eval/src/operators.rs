//! Binary and unary operators.
//!
//! Integer arithmetic is checked: overflow is an error, not a wrap. Mixing
//! `Int` and `Float` widens to `Float`. `+` concatenates when either side is
//! a string. `&&` and `||` short-circuit and are handled by the expression
//! evaluator before operands reach this module.

use std::cmp::Ordering;

use nf_ir::BinaryOp;

use crate::errors::{
    division_by_zero, integer_overflow, type_mismatch, unsupported_negation, unsupported_operator,
    EvalResult,
};
use crate::types::widen;
use crate::Value;

pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(loose_eq(left, right))),
        BinaryOp::NotEq => Ok(Value::Bool(!loose_eq(left, right))),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let Some(ordering) = compare(left, right) else {
                return Err(unsupported_operator(op, left.type_name(), right.type_name()));
            };
            let result = match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::LtEq => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            };
            Ok(Value::Bool(result))
        }
        BinaryOp::Add if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) => {
            Ok(Value::string(format!("{left}{right}")))
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => {
            arithmetic(op, left, right)
        }
        BinaryOp::And | BinaryOp::Or => match (left, right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinaryOp::And {
                *a && *b
            } else {
                *a || *b
            })),
            _ => Err(unsupported_operator(op, left.type_name(), right.type_name())),
        },
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_arithmetic(op, *a, *b),
        (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_arithmetic(op, *a, *b))),
        (Value::Int(a), Value::Float(b)) => Ok(Value::Float(float_arithmetic(op, widen(*a), *b))),
        (Value::Float(a), Value::Int(b)) => Ok(Value::Float(float_arithmetic(op, *a, widen(*b)))),
        _ => Err(unsupported_operator(op, left.type_name(), right.type_name())),
    }
}

fn int_arithmetic(op: BinaryOp, a: i64, b: i64) -> EvalResult {
    let result = match op {
        BinaryOp::Add => a.checked_add(b).ok_or_else(|| integer_overflow("addition"))?,
        BinaryOp::Sub => a.checked_sub(b).ok_or_else(|| integer_overflow("subtraction"))?,
        BinaryOp::Mul => a.checked_mul(b).ok_or_else(|| integer_overflow("multiplication"))?,
        BinaryOp::Div => {
            if b == 0 {
                return Err(division_by_zero());
            }
            a.checked_div(b).ok_or_else(|| integer_overflow("division"))?
        }
        BinaryOp::Rem => {
            if b == 0 {
                return Err(division_by_zero());
            }
            a.checked_rem(b).ok_or_else(|| integer_overflow("remainder"))?
        }
        _ => return Err(unsupported_operator(op, "Integer", "Integer")),
    };
    Ok(Value::Int(result))
}

fn float_arithmetic(op: BinaryOp, a: f64, b: f64) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        _ => a % b,
    }
}

/// `==`: strict equality, except that numbers compare by value across
/// `Int` and `Float`.
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => widen(*a) == *b,
        _ => left == right,
    }
}

/// Ordering for numbers and strings; `None` for anything else.
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float(b)) => widen(*a).partial_cmp(b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&widen(*b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

pub fn negate(value: &Value) -> EvalResult {
    match value {
        Value::Int(n) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("negation")),
        Value::Float(n) => Ok(Value::Float(-n)),
        other => Err(unsupported_negation(other.type_name())),
    }
}

/// A condition must be a boolean.
pub fn truth(value: &Value) -> Result<bool, crate::EvalError> {
    value
        .as_bool()
        .ok_or_else(|| type_mismatch("Boolean", value.type_name()))
}
