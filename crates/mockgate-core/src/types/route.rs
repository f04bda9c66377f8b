//! Core route types.

use crate::types::body::BodyRule;
use crate::types::response::MockResponse;
use serde::{Deserialize, Serialize};

/// How a route produces its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStrategy {
    /// Always return the route's single canned response.
    #[default]
    Single,
    /// Pick a response from `multi_responses` by matching the request payload.
    Multi,
}

/// How payload mappings are compared in multi-response mode.
///
/// This is a route-level setting, not per-mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MultiMatchMode {
    /// Mapping payload must be structurally equal to the request body.
    #[default]
    Exact,
    /// Mapping payload keys must all be present in the request body;
    /// values are ignored.
    #[serde(rename = "keymatch", alias = "key_match")]
    KeyMatch,
}

/// A single key/value matching rule. Disabled rules never participate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValueRule {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "enabled_default")]
    pub enabled: bool,
}

fn enabled_default() -> bool {
    true
}

impl KeyValueRule {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

/// Request matchers attached to a route.
///
/// All matcher groups are conjunctive: a route is a candidate only when its
/// header rules, query rules, and body rule all pass. An empty group is
/// vacuously true.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMatchers {
    #[serde(default)]
    pub query_params: Vec<KeyValueRule>,
    #[serde(default)]
    pub headers: Vec<KeyValueRule>,
    /// Absent means "no body constraint, any body matches".
    #[serde(default)]
    pub body: Option<BodyRule>,
}

/// Maps an expected request payload to the response it selects.
///
/// Mappings are evaluated in list order; the first match wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadResponseMapping {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Expected JSON body in string form.
    pub payload: String,
    #[serde(default)]
    pub response: MockResponse,
}

/// A configured mock endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockRoute {
    /// Unique identifier for this route
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Disabled routes are skipped entirely by the store.
    #[serde(default = "enabled_default")]
    pub enabled: bool,
    /// HTTP method, compared case-insensitively
    pub method: String,
    /// Path pattern (supports `{param}` placeholders)
    pub path: String,
    #[serde(default)]
    pub matchers: RouteMatchers,
    #[serde(default)]
    pub response_strategy: ResponseStrategy,
    #[serde(default)]
    pub multi_response_match_mode: MultiMatchMode,
    /// Response used when `response_strategy` is `Single`.
    #[serde(default)]
    pub response: MockResponse,
    /// Payload mappings used when `response_strategy` is `Multi`.
    #[serde(default)]
    pub multi_responses: Vec<PayloadResponseMapping>,
}
