//! Structural key-subset checks over JSON documents.

use serde_json::Value;

/// Check that every key of `subset` exists in `target` at the corresponding
/// path, values ignored.
///
/// Nested objects in `subset` recurse into the matching key of `target`; any
/// other subset value only asserts key presence. An empty subset object
/// matches any target. Non-object subsets degrade to a shape check so that a
/// key-only rule written against an array or scalar cannot spuriously fail.
pub fn json_keys_subset(target: &Value, subset: &Value) -> bool {
    match (target, subset) {
        (Value::Object(t), Value::Object(s)) => s.iter().all(|(key, sv)| match t.get(key) {
            None => false,
            Some(tv) => match sv {
                Value::Object(_) => json_keys_subset(tv, sv),
                _ => true,
            },
        }),
        (_, Value::Object(_)) => false,
        (Value::Array(_), Value::Array(_)) => true,
        (_, Value::Array(_)) => false,
        _ => true,
    }
}
