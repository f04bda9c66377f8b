//! Body validation against a route's body rule.

use crate::extract::{parse_json_lenient, ExtractedBody};
use crate::matching::intersection::json_keys_subset;
use crate::types::body::{BodyRule, BodyType, ValidationStrategy};
use std::collections::BTreeSet;

/// Validate an extracted body against an optional body rule.
///
/// A missing rule or `BodyType::None` always passes. A content-type family
/// mismatch (rule expects JSON, body extracted as a form, etc.) is a
/// non-match, never an error. A rule whose expected value cannot be parsed
/// fails closed.
pub fn body_matches(rule: Option<&BodyRule>, extracted: &ExtractedBody) -> bool {
    let Some(rule) = rule else {
        return true;
    };
    match rule.body_type {
        BodyType::None => true,
        BodyType::RawJson => match_raw_json(rule, extracted),
        BodyType::RawXml => match_raw_xml(rule, extracted),
        BodyType::FormData => match_form_data(rule, extracted),
        BodyType::FormUrlencode => match_form_urlencode(rule, extracted),
    }
}

fn match_raw_json(rule: &BodyRule, extracted: &ExtractedBody) -> bool {
    // An empty expected value places no constraint on the body.
    if rule.value.trim().is_empty() {
        return true;
    }
    let ExtractedBody::Json(body) = extracted else {
        return false;
    };
    let Some(expected) = parse_json_lenient(rule.value.trim()) else {
        return false;
    };
    match rule.validation_strategy {
        ValidationStrategy::Exact => *body == expected,
        ValidationStrategy::KeyOnly => json_keys_subset(body, &expected),
    }
}

fn match_raw_xml(rule: &BodyRule, extracted: &ExtractedBody) -> bool {
    if rule.value.trim().is_empty() {
        return true;
    }
    // XML carries no key semantics here; key-only degrades to a pass.
    if rule.validation_strategy == ValidationStrategy::KeyOnly {
        return true;
    }
    let ExtractedBody::Xml(body) = extracted else {
        return false;
    };
    normalize_xml(body) == normalize_xml(&rule.value)
}

/// Collapse whitespace runs, trim, and drop inter-tag whitespace so that
/// formatting differences never affect comparison.
fn normalize_xml(input: &str) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.replace("> <", "><")
}

fn match_form_urlencode(rule: &BodyRule, extracted: &ExtractedBody) -> bool {
    let expected: Vec<(&str, &str)> = rule
        .form_urlencode
        .iter()
        .filter(|r| r.enabled && !r.key.trim().is_empty())
        .map(|r| (r.key.trim(), r.value.trim()))
        .collect();
    if expected.is_empty() {
        return true;
    }
    let ExtractedBody::Form(pairs) = extracted else {
        return false;
    };
    match rule.validation_strategy {
        ValidationStrategy::Exact => {
            let actual: BTreeSet<(&str, &str)> = pairs
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let expected: BTreeSet<(&str, &str)> = expected.into_iter().collect();
            actual == expected
        }
        ValidationStrategy::KeyOnly => expected
            .iter()
            .all(|(key, _)| pairs.iter().any(|(k, _)| k == key)),
    }
}

fn match_form_data(rule: &BodyRule, extracted: &ExtractedBody) -> bool {
    let expected: Vec<(&str, &str)> = rule
        .form_data
        .iter()
        .filter(|r| r.enabled && !r.key.trim().is_empty())
        .map(|r| (r.key.trim(), r.value.trim()))
        .collect();
    if expected.is_empty() {
        return true;
    }
    let ExtractedBody::Multipart(fields) = extracted else {
        return false;
    };
    match rule.validation_strategy {
        ValidationStrategy::Exact => {
            // File fields carry the filename as their value, so one pair
            // representation covers both field types.
            let actual: BTreeSet<(&str, &str)> = fields
                .iter()
                .map(|f| (f.name.as_str(), f.value.as_str()))
                .collect();
            let expected: BTreeSet<(&str, &str)> = expected.into_iter().collect();
            actual == expected
        }
        ValidationStrategy::KeyOnly => expected
            .iter()
            .all(|(key, _)| fields.iter().any(|f| f.name == *key)),
    }
}
