//! Query string parsing for query-parameter rules.
//!
//! Query rules share [`key_values_match`](crate::matching::key_values_match)
//! with header rules; this module only turns the request's query string into
//! the actual-value map.

use std::collections::HashMap;

/// Parse a query string into a map with URL decoding.
///
/// Repeated keys keep the last value, mirroring how the authoring UI treats
/// query rules as single-valued.
pub fn parse_query_string(query: &str) -> HashMap<String, String> {
    let mut result = HashMap::new();

    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urlencoding::decode(key)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| key.to_string());
        let value = urlencoding::decode(value)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| value.to_string());
        result.insert(key, value);
    }

    result
}
