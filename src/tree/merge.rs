//! Merge a translated difference back into an existing document

use serde_json::Value;

/// Deep-merge `patch` into `target`
///
/// Objects merge member by member: existing keys keep their position, new
/// keys are appended in patch order. Any other patch value replaces what the
/// target holds.
pub fn merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}
