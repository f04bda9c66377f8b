//! Request body extraction.
//!
//! Normalizes a raw request body into a comparable [`ExtractedBody`] by the
//! declared (or sniffed) content type. Extraction never fails: unparseable
//! input becomes a variant that fails every matcher except `BodyType::None`.

mod multipart;

pub use multipart::{parse_multipart, MultipartField};

use crate::config::parser::strip_json_comments;
use serde_json::Value;

/// Normalized request body, ready for matching.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractedBody {
    /// No body, or an unrecognized content type with no sniffable shape.
    Empty,
    /// Parsed JSON document.
    Json(Value),
    /// Body declared as JSON but unparseable; matches nothing but `None` rules.
    Opaque(String),
    /// XML text; whitespace normalization is the matcher's job.
    Xml(String),
    /// Multipart fields in document order, duplicate names preserved.
    Multipart(Vec<MultipartField>),
    /// URL-encoded pairs in document order, duplicate keys preserved.
    Form(Vec<(String, String)>),
}

/// Parse JSON, tolerating JSONC-style comments the way editor-authored
/// documents carry them.
pub fn parse_json_lenient(input: &str) -> Option<Value> {
    serde_json::from_str(input)
        .ok()
        .or_else(|| serde_json::from_str(&strip_json_comments(input)).ok())
}

/// Normalize a raw body by its declared content type.
///
/// Without a declared type the body shape is sniffed: a `{`/`[` prefix is
/// tried as JSON, a `<` prefix is taken as XML.
pub fn extract(raw: &[u8], content_type: Option<&str>) -> ExtractedBody {
    if raw.is_empty() {
        return ExtractedBody::Empty;
    }
    let text = String::from_utf8_lossy(raw);

    match content_type.map(media_type) {
        Some(MediaType::Json) => match parse_json_lenient(text.trim()) {
            Some(value) => ExtractedBody::Json(value),
            None => ExtractedBody::Opaque(text.into_owned()),
        },
        Some(MediaType::Xml) => ExtractedBody::Xml(text.into_owned()),
        Some(MediaType::Multipart) => {
            let boundary = content_type.and_then(boundary_param);
            match boundary.and_then(|b| parse_multipart(&text, &b)) {
                Some(fields) => ExtractedBody::Multipart(fields),
                None => ExtractedBody::Empty,
            }
        }
        Some(MediaType::Form) => ExtractedBody::Form(parse_form_pairs(&text)),
        Some(MediaType::Other) | None => sniff(&text),
    }
}

enum MediaType {
    Json,
    Xml,
    Multipart,
    Form,
    Other,
}

fn media_type(content_type: &str) -> MediaType {
    // Parameters (charset, boundary) do not participate in the family check.
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    if essence == "application/json" || essence.ends_with("+json") {
        MediaType::Json
    } else if essence == "application/xml" || essence == "text/xml" || essence.ends_with("+xml") {
        MediaType::Xml
    } else if essence == "multipart/form-data" {
        MediaType::Multipart
    } else if essence == "application/x-www-form-urlencoded" {
        MediaType::Form
    } else {
        MediaType::Other
    }
}

fn sniff(text: &str) -> ExtractedBody {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Some(value) = parse_json_lenient(trimmed.trim_end()) {
            return ExtractedBody::Json(value);
        }
        return ExtractedBody::Opaque(text.to_string());
    }
    if trimmed.starts_with('<') {
        return ExtractedBody::Xml(text.to_string());
    }
    if trimmed.is_empty() {
        ExtractedBody::Empty
    } else {
        ExtractedBody::Opaque(text.to_string())
    }
}

fn boundary_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("boundary") {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}

/// Parse a URL-encoded body into ordered pairs, duplicates preserved.
pub fn parse_form_pairs(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

fn decode_component(component: &str) -> String {
    // Form encoding uses '+' for spaces on top of percent escapes.
    let with_spaces = component.replace('+', " ");
    urlencoding::decode(&with_spaces)
        .map(|s| s.into_owned())
        .unwrap_or(with_spaces)
}
