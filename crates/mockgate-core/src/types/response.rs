//! Mock response types.

use crate::types::body::FormFieldRule;
use crate::types::route::KeyValueRule;
use serde::{Deserialize, Serialize};

/// Body family of a mock response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseBodyType {
    None,
    #[default]
    Raw,
    FormData,
    FormUrlencode,
}

/// Sub-type of a raw response body; drives the inferred Content-Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RawSubType {
    #[default]
    Json,
    Xml,
    Text,
    Html,
    Javascript,
}

impl RawSubType {
    fn mime(self) -> &'static str {
        match self {
            RawSubType::Json => "application/json",
            RawSubType::Xml => "application/xml",
            RawSubType::Text => "text/plain",
            RawSubType::Html => "text/html",
            RawSubType::Javascript => "text/javascript",
        }
    }
}

/// The response a matched route returns to the transport layer.
///
/// The engine only resolves which response applies; serialization onto the
/// wire (status line, header casing, body encoding) is the transport's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockResponse {
    pub status: u16,
    #[serde(default)]
    pub headers: Vec<KeyValueRule>,
    #[serde(default)]
    pub body_type: ResponseBodyType,
    #[serde(default)]
    pub raw_sub_type: RawSubType,
    /// Raw payload for `body_type = Raw`.
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub form_data: Vec<FormFieldRule>,
    #[serde(default)]
    pub form_urlencode: Vec<KeyValueRule>,
    /// Artificial latency the transport applies before writing the response.
    /// The engine itself never sleeps.
    #[serde(default)]
    pub delay_ms: Option<u64>,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            body_type: ResponseBodyType::Raw,
            raw_sub_type: RawSubType::Json,
            body: "{}".to_string(),
            form_data: Vec::new(),
            form_urlencode: Vec::new(),
            delay_ms: None,
        }
    }
}

impl MockResponse {
    /// Content-Type the transport should emit for this response.
    ///
    /// An enabled explicit `Content-Type` header always wins. Otherwise the
    /// type is inferred from `body_type` / `raw_sub_type`, falling back to a
    /// shape sniff of the body for text sub-types carrying JSON.
    pub fn content_type(&self) -> Option<String> {
        if self.body_type == ResponseBodyType::None {
            return None;
        }

        let explicit = self
            .headers
            .iter()
            .filter(|h| h.enabled)
            .find(|h| h.key.eq_ignore_ascii_case("content-type"));
        if let Some(header) = explicit {
            return Some(header.value.clone());
        }

        let inferred = match self.body_type {
            ResponseBodyType::None => return None,
            ResponseBodyType::FormData => "multipart/form-data",
            ResponseBodyType::FormUrlencode => "application/x-www-form-urlencoded",
            ResponseBodyType::Raw => {
                let trimmed = self.body.trim_start();
                if self.raw_sub_type == RawSubType::Text
                    && (trimmed.starts_with('{') || trimmed.starts_with('['))
                {
                    "application/json"
                } else {
                    self.raw_sub_type.mime()
                }
            }
        };
        Some(inferred.to_string())
    }
}
