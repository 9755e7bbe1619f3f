//! Structural difference between an existing translation and its source
//!
//! Used by extend mode: only the parts of the source that the target does not
//! have yet are translated, so the result only ever *adds* structure.
//!
//! Rules, for two objects, walking the source keys in insertion order:
//!
//! - a key missing from the target is taken verbatim,
//! - two objects or two arrays under the same key are diffed recursively and
//!   kept only when the difference is non-empty,
//! - a container in the source where the target holds a scalar or the other
//!   container kind is taken verbatim,
//! - a scalar present in both is never taken: translated leaves are not
//!   overwritten.
//!
//! Arrays are compared as a whole. When they differ at all, the complete
//! source array is the difference.

use crate::tree::error::{TreeError, TreeResult, kind_name};
use serde_json::{Map, Value};

/// Compute the part of `source` that `target` lacks
///
/// `target` must be an object or an array and `source` must be of the same
/// kind.
pub fn diff(target: &Value, source: &Value) -> TreeResult<Value> {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => Ok(Value::Object(diff_objects(target, source))),
        (Value::Array(target), Value::Array(source)) => Ok(Value::Array(diff_arrays(target, source))),
        _ => Err(TreeError::UnsupportedDiffKind {
            target_kind: kind_name(target),
            source_kind: kind_name(source),
        }),
    }
}

fn diff_objects(target: &Map<String, Value>, source: &Map<String, Value>) -> Map<String, Value> {
    let mut missing = Map::new();

    for (key, source_value) in source {
        let Some(target_value) = target.get(key) else {
            missing.insert(key.clone(), source_value.clone());
            continue;
        };

        let difference = match (target_value, source_value) {
            (Value::Object(t), Value::Object(s)) => {
                Some(Value::Object(diff_objects(t, s))).filter(|d| !is_empty_container(d))
            }
            (Value::Array(t), Value::Array(s)) => {
                Some(Value::Array(diff_arrays(t, s))).filter(|d| !is_empty_container(d))
            }
            (_, Value::Object(_) | Value::Array(_)) => Some(source_value.clone()),
            _ => None,
        };

        if let Some(difference) = difference {
            missing.insert(key.clone(), difference);
        }
    }

    missing
}

fn diff_arrays(target: &[Value], source: &[Value]) -> Vec<Value> {
    if target == source {
        Vec::new()
    } else {
        source.to_vec()
    }
}

/// `true` for `{}` and `[]`, the "nothing missing" results of [`diff`]
pub fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
