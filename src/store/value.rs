//! Record Value Module
//!
//! Record types and the equality/ordering rules used by query operators.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde_json::{Map, Number, Value};

/// Field name holding a record's identifier.
pub const ID_FIELD: &str = "id";

/// A stored document: ordered field name to value mapping.
pub type Record = Map<String, Value>;

/// Advisory table schema: field name to type name. Never enforced.
pub type Schema = BTreeMap<String, String>;

// == Equality ==
/// Compares two values for query equality.
///
/// Numbers compare by numeric value, so `1` equals `1.0`. Arrays and objects
/// compare element-wise with the same rule. Everything else uses plain JSON
/// equality, and values of different types are never equal.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y) == Some(Ordering::Equal),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| values_equal(l, r))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x
                    .iter()
                    .all(|(key, l)| y.get(key).is_some_and(|r| values_equal(l, r)))
        }
        _ => a == b,
    }
}

// == Ordering ==
/// Orders two values for the `$gt`/`$gte`/`$lt`/`$lte` operators.
///
/// Returns `None` when the pair has no natural order: mixed types, nulls,
/// objects, or arrays containing such a pair.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => compare_numbers(x, y),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Array(x), Value::Array(y)) => {
            for (l, r) in x.iter().zip(y) {
                match compare_values(l, r)? {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(x.len().cmp(&y.len()))
        }
        _ => None,
    }
}

fn compare_numbers(x: &Number, y: &Number) -> Option<Ordering> {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return Some(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return Some(a.cmp(&b));
    }
    x.as_f64()?.partial_cmp(&y.as_f64()?)
}

/// Returns true if `needle` equals any element of `haystack`.
pub fn contains_value(haystack: &[Value], needle: &Value) -> bool {
    haystack.iter().any(|candidate| values_equal(candidate, needle))
}
