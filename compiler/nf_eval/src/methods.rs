//! Built-in methods on strings, lists and maps.
//!
//! Dispatch is by receiver variant, then by method name. `equals` and
//! `toString` work on every value.

use std::cmp::Ordering;

use crate::errors::{
    arity_mismatch, index_out_of_bounds, method_not_found, type_mismatch, EvalError, EvalResult,
};
use crate::operators::{compare, loose_eq};
use crate::value::{ListRef, MapRef};
use crate::Value;

pub fn call_method(receiver: &Value, method: &str, args: &[Value]) -> EvalResult {
    match method {
        "equals" => {
            expect_args(method, args, 1)?;
            return Ok(Value::Bool(loose_eq(receiver, &args[0])));
        }
        "toString" => {
            expect_args(method, args, 0)?;
            return Ok(Value::string(receiver.to_string()));
        }
        _ => {}
    }
    match receiver {
        Value::Str(s) => string_method(s, method, args),
        Value::List(items) => list_method(items, method, args),
        Value::Map(entries) => map_method(entries, method, args),
        other => Err(method_not_found(method, other.type_name())),
    }
}

fn expect_args(method: &str, args: &[Value], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(arity_mismatch(method, expected, args.len()))
    }
}

fn int_arg(value: &Value) -> Result<i64, EvalError> {
    value
        .as_int()
        .ok_or_else(|| type_mismatch("Integer", value.type_name()))
}

fn str_arg(value: &Value) -> Result<&str, EvalError> {
    value
        .as_str()
        .ok_or_else(|| type_mismatch("String", value.type_name()))
}

fn len_value(len: usize) -> Value {
    Value::Int(i64::try_from(len).unwrap_or(i64::MAX))
}

/// `index` as a position in a sequence of `len` items.
fn position(index: i64, len: usize) -> Result<usize, EvalError> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < len)
        .ok_or_else(|| index_out_of_bounds(index, len))
}

fn string_method(s: &str, method: &str, args: &[Value]) -> EvalResult {
    match method {
        "length" => {
            expect_args(method, args, 0)?;
            Ok(len_value(s.chars().count()))
        }
        "toUpperCase" => {
            expect_args(method, args, 0)?;
            Ok(Value::string(s.to_uppercase()))
        }
        "toLowerCase" => {
            expect_args(method, args, 0)?;
            Ok(Value::string(s.to_lowercase()))
        }
        "trim" => {
            expect_args(method, args, 0)?;
            Ok(Value::string(s.trim()))
        }
        "contains" => {
            expect_args(method, args, 1)?;
            Ok(Value::Bool(s.contains(str_arg(&args[0])?)))
        }
        "startsWith" => {
            expect_args(method, args, 1)?;
            Ok(Value::Bool(s.starts_with(str_arg(&args[0])?)))
        }
        "endsWith" => {
            expect_args(method, args, 1)?;
            Ok(Value::Bool(s.ends_with(str_arg(&args[0])?)))
        }
        "substring" => substring(s, args),
        _ => Err(method_not_found(method, "String")),
    }
}

/// `substring(start)` or `substring(start, end)`, in characters.
fn substring(s: &str, args: &[Value]) -> EvalResult {
    let len = s.chars().count();
    let (start, end) = match args {
        [start] => (int_arg(start)?, i64::try_from(len).unwrap_or(i64::MAX)),
        [start, end] => (int_arg(start)?, int_arg(end)?),
        _ => return Err(arity_mismatch("substring", 1, args.len())),
    };
    let in_range = |i: i64| usize::try_from(i).ok().filter(|i| *i <= len);
    let Some(from) = in_range(start) else {
        return Err(index_out_of_bounds(start, len));
    };
    let Some(to) = in_range(end).filter(|to| *to >= from) else {
        return Err(index_out_of_bounds(end, len));
    };
    Ok(Value::string(
        s.chars().skip(from).take(to - from).collect::<String>(),
    ))
}

fn list_method(items: &ListRef, method: &str, args: &[Value]) -> EvalResult {
    match method {
        "size" => {
            expect_args(method, args, 0)?;
            Ok(len_value(items.borrow().len()))
        }
        "isEmpty" => {
            expect_args(method, args, 0)?;
            Ok(Value::Bool(items.borrow().is_empty()))
        }
        "get" => {
            expect_args(method, args, 1)?;
            let items = items.borrow();
            let index = position(int_arg(&args[0])?, items.len())?;
            Ok(items[index].clone())
        }
        "set" => {
            expect_args(method, args, 2)?;
            let mut items = items.borrow_mut();
            let index = position(int_arg(&args[0])?, items.len())?;
            Ok(std::mem::replace(&mut items[index], args[1].clone()))
        }
        "add" => {
            expect_args(method, args, 1)?;
            items.borrow_mut().push(args[0].clone());
            Ok(Value::Bool(true))
        }
        "remove" => {
            expect_args(method, args, 1)?;
            let mut items = items.borrow_mut();
            let index = position(int_arg(&args[0])?, items.len())?;
            Ok(items.remove(index))
        }
        "contains" => {
            expect_args(method, args, 1)?;
            Ok(Value::Bool(
                items.borrow().iter().any(|item| loose_eq(item, &args[0])),
            ))
        }
        "min" => {
            expect_args(method, args, 0)?;
            extreme(&items.borrow(), Ordering::Less)
        }
        "max" => {
            expect_args(method, args, 0)?;
            extreme(&items.borrow(), Ordering::Greater)
        }
        _ => Err(method_not_found(method, "List")),
    }
}

/// Smallest (`Less`) or largest (`Greater`) element; `null` when empty.
///
/// The element itself is returned, not a wrapper around it.
fn extreme(items: &[Value], wanted: Ordering) -> EvalResult {
    let mut best: Option<&Value> = None;
    for item in items {
        match best {
            None => best = Some(item),
            Some(current) => {
                let Some(ordering) = compare(item, current) else {
                    return Err(type_mismatch(current.type_name(), item.type_name()));
                };
                if ordering == wanted {
                    best = Some(item);
                }
            }
        }
    }
    Ok(best.cloned().unwrap_or(Value::Null))
}

/// Map keys are the display form of the key value.
fn map_key(value: &Value) -> String {
    value.to_string()
}

fn map_method(entries: &MapRef, method: &str, args: &[Value]) -> EvalResult {
    match method {
        "size" => {
            expect_args(method, args, 0)?;
            Ok(len_value(entries.borrow().len()))
        }
        "isEmpty" => {
            expect_args(method, args, 0)?;
            Ok(Value::Bool(entries.borrow().is_empty()))
        }
        "get" => {
            expect_args(method, args, 1)?;
            Ok(entries
                .borrow()
                .get(&map_key(&args[0]))
                .cloned()
                .unwrap_or(Value::Null))
        }
        "put" => {
            expect_args(method, args, 2)?;
            Ok(entries
                .borrow_mut()
                .insert(map_key(&args[0]), args[1].clone())
                .unwrap_or(Value::Null))
        }
        "containsKey" => {
            expect_args(method, args, 1)?;
            Ok(Value::Bool(entries.borrow().contains_key(&map_key(&args[0]))))
        }
        "remove" => {
            expect_args(method, args, 1)?;
            Ok(entries
                .borrow_mut()
                .remove(&map_key(&args[0]))
                .unwrap_or(Value::Null))
        }
        _ => Err(method_not_found(method, "Map")),
    }
}

#[cfg(test)]
mod tests;
