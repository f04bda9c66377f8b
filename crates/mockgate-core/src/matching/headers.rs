//! Key/value rule matching for headers and query parameters.

use crate::types::route::KeyValueRule;
use std::collections::HashMap;

/// Check enabled key/value rules against an actual key/value map.
///
/// Keys compare case-insensitively, values case-sensitively with exact
/// equality. An empty rule set matches anything; that is how "no
/// requirements" is expressed. A rule with an empty value only asserts key
/// presence. A missing key is a non-match, never an error.
pub fn key_values_match(rules: &[KeyValueRule], actual: &HashMap<String, String>) -> bool {
    let enabled: Vec<&KeyValueRule> = rules.iter().filter(|rule| rule.enabled).collect();
    if enabled.is_empty() {
        return true;
    }

    let normalized: HashMap<String, &str> = actual
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.as_str()))
        .collect();

    enabled.into_iter().all(|rule| {
        let key = rule.key.trim().to_lowercase();
        if key.is_empty() {
            return true;
        }
        match normalized.get(&key) {
            None => false,
            Some(actual_value) => {
                let expected = rule.value.trim();
                expected.is_empty() || *actual_value == expected
            }
        }
    })
}
