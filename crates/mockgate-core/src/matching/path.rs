//! Method and path matching for the route store's pre-filter.

use regex::Regex;

/// Compare HTTP methods case-insensitively, ignoring surrounding whitespace.
pub fn method_matches(route_method: &str, method: &str) -> bool {
    route_method.trim().eq_ignore_ascii_case(method.trim())
}

/// Match a request path against a route path pattern.
///
/// Paths are normalized before comparison: the query string is stripped and
/// trailing slashes are ignored. Patterns may contain `{param}` placeholders,
/// each matching exactly one non-empty path segment.
pub fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern = normalize_path(pattern);
    if pattern.is_empty() {
        return false;
    }
    let path = normalize_path(path);

    if !pattern.contains('{') {
        return pattern == path;
    }

    let Ok(regex) = Regex::new(&pattern_to_regex(&pattern)) else {
        return false;
    };
    regex.is_match(&path)
}

fn normalize_path(path: &str) -> String {
    let without_query = path.split('?').next().unwrap_or("");
    let trimmed = without_query.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

fn pattern_to_regex(pattern: &str) -> String {
    let mut regex_str = String::with_capacity(pattern.len() + 8);
    regex_str.push('^');

    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '{' {
            // Consume through the closing brace; the name itself is unused.
            chars.by_ref().take_while(|&c| c != '}').for_each(drop);
            regex_str.push_str("([^/]+)");
        } else if matches!(
            c,
            '.' | '*' | '+' | '?' | '^' | '$' | '(' | ')' | '[' | ']' | '|' | '\\'
        ) {
            regex_str.push('\\');
            regex_str.push(c);
        } else {
            regex_str.push(c);
        }
    }

    regex_str.push('$');
    regex_str
}
