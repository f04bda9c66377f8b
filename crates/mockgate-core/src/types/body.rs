//! Body matching rule types.

use crate::types::route::KeyValueRule;
use serde::{Deserialize, Serialize};

/// Content-type family a body rule validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    /// No body constraint; validation always succeeds.
    None,
    #[default]
    RawJson,
    RawXml,
    FormData,
    FormUrlencode,
}

/// Raw value comparison mode.
///
/// Reserved field: it is carried through the data model for forward
/// compatibility but matching does not consult it. `validation_strategy`
/// decides how bodies are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    #[default]
    Exact,
    Contains,
    Regex,
}

/// How the expected body is validated against the actual body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStrategy {
    /// Body must be structurally equal to the expected value.
    #[default]
    Exact,
    /// Only the presence of expected keys is checked; values are ignored.
    KeyOnly,
}

/// Field type of an expected multipart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FormFieldType {
    #[default]
    Text,
    /// For file fields the rule value is the expected filename.
    File,
}

/// Expected multipart form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFieldRule {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default)]
    pub field_type: FormFieldType,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

/// Body matching rule attached to a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BodyRule {
    #[serde(default)]
    pub body_type: BodyType,
    #[serde(default)]
    pub mode: MatchMode,
    #[serde(default)]
    pub validation_strategy: ValidationStrategy,
    /// Expected raw body for `RawJson` / `RawXml`.
    #[serde(default)]
    pub value: String,
    /// Expected fields for `FormData`.
    #[serde(default)]
    pub form_data: Vec<FormFieldRule>,
    /// Expected pairs for `FormUrlencode`.
    #[serde(default)]
    pub form_urlencode: Vec<KeyValueRule>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(r#""none""#, BodyType::None)]
    #[case(r#""raw_json""#, BodyType::RawJson)]
    #[case(r#""raw_xml""#, BodyType::RawXml)]
    #[case(r#""form_data""#, BodyType::FormData)]
    #[case(r#""form_urlencode""#, BodyType::FormUrlencode)]
    fn test_body_type_deserialize(#[case] json: &str, #[case] expected: BodyType) {
        let parsed: BodyType = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case(r#""exact""#, ValidationStrategy::Exact)]
    #[case(r#""key_only""#, ValidationStrategy::KeyOnly)]
    fn test_validation_strategy_deserialize(
        #[case] json: &str,
        #[case] expected: ValidationStrategy,
    ) {
        let parsed: ValidationStrategy = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(parsed, expected);
    }

    #[rstest]
    fn test_body_rule_defaults() {
        let rule: BodyRule = serde_json::from_str("{}").expect("Should deserialize");
        assert_eq!(rule.body_type, BodyType::RawJson);
        assert_eq!(rule.mode, MatchMode::Exact);
        assert_eq!(rule.validation_strategy, ValidationStrategy::Exact);
        assert!(rule.value.is_empty());
        assert!(rule.form_data.is_empty());
        assert!(rule.form_urlencode.is_empty());
    }

    #[rstest]
    fn test_form_field_rule_type_rename() {
        let json = r#"{"key": "avatar", "value": "photo.png", "type": "file"}"#;
        let rule: FormFieldRule = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(rule.field_type, FormFieldType::File);
        assert!(rule.enabled);
    }

    #[rstest]
    fn test_body_rule_full_document() {
        let json = r#"{
            "bodyType": "form_urlencode",
            "mode": "contains",
            "validationStrategy": "key_only",
            "formUrlencode": [{"key": "user", "value": "alice", "enabled": true}]
        }"#;
        let rule: BodyRule = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(rule.body_type, BodyType::FormUrlencode);
        assert_eq!(rule.mode, MatchMode::Contains);
        assert_eq!(rule.validation_strategy, ValidationStrategy::KeyOnly);
        assert_eq!(rule.form_urlencode.len(), 1);
    }
}
