//! Lists of JSON values: construction from arbitrary JSON and the ordering
//! used when such lists are sorted.

use std::cmp::Ordering;

use log::debug;
use serde_json::Value;

use crate::error::{ListError, Result};
use crate::list::List;
use crate::record::Entry;

/// Short name of a JSON value's kind, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Ordering between two JSON values of the same comparable kind.
///
/// Numbers compare numerically, strings lexicographically, booleans with
/// `false < true`. Anything else is unordered.
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// The default out-of-order test for JSON lists: `left > right`.
pub fn greater(left: &Value, right: &Value) -> bool {
    compare(left, right) == Some(Ordering::Greater)
}

impl List<Value> {
    /// An array becomes a list of its elements; an object becomes a list of
    /// `{"key", "value"}` records in insertion order.
    pub fn from_json(source: Value) -> Result<Self> {
        let list = match source {
            Value::Array(items) => List::from_sequence(items),
            Value::Object(map) => List::from(List::from_mapping(map)),
            other => {
                return Err(ListError::UnsupportedSource {
                    found: kind_of(&other).to_string(),
                })
            }
        };
        debug!("built a list of {} values from JSON", list.len());
        Ok(list)
    }

    /// Sorts with [`greater`] as the out-of-order test.
    pub fn sort_json(&mut self) {
        self.sort_by(greater);
    }
}

impl From<List<Entry<String, Value>>> for List<Value> {
    fn from(records: List<Entry<String, Value>>) -> Self {
        records.into_iter().map(Value::from).collect()
    }
}
