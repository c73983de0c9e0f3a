//! Named builtin callbacks available to scripts.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::error::{ListError, Result};
use crate::json::{compare, kind_of};
use crate::render::render_value;

pub type Transform = fn(&Value) -> Result<Value>;
pub type Predicate = fn(&Value) -> bool;
pub type Reducer = fn(Value, &Value) -> Result<Value>;
pub type Action = fn(&Value, usize) -> Result<String>;

// =============================================================================
// Lookup by name
// =============================================================================

pub fn transform(name: &str) -> Result<Transform> {
    let callback: Transform = match name {
        "identity" => |value| Ok(value.clone()),
        "double" => |value| multiply("double", value, &Value::from(2)),
        "square" => |value| multiply("square", value, value),
        "negate" => |value| multiply("negate", value, &Value::from(-1)),
        "increment" => |value| add("increment", value, &Value::from(1)),
        "stringify" => |value| Ok(Value::String(serde_json::to_string(value)?)),
        "key" => |value| field("key", value),
        "value" => |value| field("value", value),
        _ => return Err(unknown(name)),
    };
    Ok(callback)
}

pub fn predicate(name: &str) -> Result<Predicate> {
    let callback: Predicate = match name {
        "even" => |value| integer(value).is_some_and(|n| n % 2 == 0),
        "odd" => |value| integer(value).is_some_and(|n| n % 2 != 0),
        "positive" => |value| value.as_f64().is_some_and(|n| n > 0.0),
        "negative" => |value| value.as_f64().is_some_and(|n| n < 0.0),
        "zero" => |value| value.as_f64().is_some_and(|n| n == 0.0),
        "truthy" => truthy,
        "falsy" => |value| !truthy(value),
        "number" => Value::is_number,
        "string" => Value::is_string,
        "record" => Value::is_object,
        _ => return Err(unknown(name)),
    };
    Ok(callback)
}

pub fn reducer(name: &str) -> Result<Reducer> {
    let callback: Reducer = match name {
        "sum" => |acc, value| add("sum", &acc, value),
        "product" => |acc, value| multiply("product", &acc, value),
        "min" => |acc, value| extreme("min", acc, value, Ordering::Greater),
        "max" => |acc, value| extreme("max", acc, value, Ordering::Less),
        "count" => |acc, _| add("count", &acc, &Value::from(1)),
        "concat" => |acc, value| {
            let mut text = render_value(&acc, 0)?;
            text.push_str(&render_value(value, 0)?);
            Ok(Value::String(text))
        },
        _ => return Err(unknown(name)),
    };
    Ok(callback)
}

pub fn action(name: &str) -> Result<Action> {
    let callback: Action = match name {
        "print" => |value, _| render_value(value, 2),
        "index" => |value, index| Ok(format!("{index}: {value}")),
        _ => return Err(unknown(name)),
    };
    Ok(callback)
}

// =============================================================================
// Helpers
// =============================================================================

fn unknown(name: &str) -> ListError {
    ListError::UnknownCallback {
        name: name.to_string(),
    }
}

/// JavaScript-style truthiness: `null`, `false`, `0`, `""` are falsy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        let n = value.as_f64()?;
        (n.fract() == 0.0 && n.abs() < i64::MAX as f64).then_some(n as i64)
    })
}

fn number(operation: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| ListError::type_mismatch(operation, "a number", kind_of(value)))
}

fn add(operation: &str, left: &Value, right: &Value) -> Result<Value> {
    arithmetic(operation, left, right, i64::checked_add, |a, b| a + b)
}

fn multiply(operation: &str, left: &Value, right: &Value) -> Result<Value> {
    arithmetic(operation, left, right, i64::checked_mul, |a, b| a * b)
}

/// Integer arithmetic while both sides are integers and the result fits,
/// floating point otherwise.
fn arithmetic(
    operation: &str,
    left: &Value,
    right: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value> {
    if let (Some(a), Some(b)) = (left.as_i64(), right.as_i64()) {
        if let Some(result) = int_op(a, b) {
            return Ok(Value::from(result));
        }
    }
    let result = float_op(number(operation, left)?, number(operation, right)?);
    Number::from_f64(result)
        .map(Value::Number)
        .ok_or_else(|| ListError::invalid_argument(operation, "result is not a finite number"))
}

/// Keeps `acc` unless it compares as `replace_when` against `value`.
fn extreme(operation: &str, acc: Value, value: &Value, replace_when: Ordering) -> Result<Value> {
    match compare(&acc, value) {
        Some(ordering) if ordering == replace_when => Ok(value.clone()),
        Some(_) => Ok(acc),
        None => Err(ListError::type_mismatch(
            operation,
            format!("a value comparable with {}", kind_of(&acc)),
            kind_of(value),
        )),
    }
}

fn field(name: &str, value: &Value) -> Result<Value> {
    value
        .as_object()
        .and_then(|record| record.get(name))
        .cloned()
        .ok_or_else(|| ListError::type_mismatch(name, "a {key, value} record", kind_of(value)))
}
