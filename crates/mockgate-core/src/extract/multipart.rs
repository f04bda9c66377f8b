//! Minimal multipart/form-data parsing for matching purposes.
//!
//! Only what the matchers need is extracted: field names, text values, and
//! filenames for file parts. File content is never compared, so it is not
//! retained.

use crate::types::body::FormFieldType;

/// One multipart field in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartField {
    pub name: String,
    /// Text content for text parts, filename for file parts.
    pub value: String,
    pub field_type: FormFieldType,
}

/// Parse a multipart body with the given boundary.
///
/// Returns `None` when the body does not contain a single well-formed part;
/// the extractor maps that to `ExtractedBody::Empty`.
pub fn parse_multipart(body: &str, boundary: &str) -> Option<Vec<MultipartField>> {
    if boundary.is_empty() {
        return None;
    }
    let delimiter = format!("--{boundary}");

    let mut fields = Vec::new();
    for segment in body.split(delimiter.as_str()).skip(1) {
        // The closing delimiter leaves a "--" remnant.
        if segment.starts_with("--") {
            break;
        }
        if let Some(field) = parse_part(segment) {
            fields.push(field);
        }
    }

    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}

fn parse_part(segment: &str) -> Option<MultipartField> {
    let part = segment.strip_prefix("\r\n").unwrap_or(segment);
    let (headers, content) = split_headers(part)?;

    let disposition = headers
        .lines()
        .find(|line| {
            line.to_ascii_lowercase()
                .starts_with("content-disposition:")
        })?;

    let name = header_param(disposition, "name")?;
    let filename = header_param(disposition, "filename");

    let (value, field_type) = match filename {
        Some(filename) => (filename, FormFieldType::File),
        None => (
            content.trim_end_matches(['\r', '\n']).to_string(),
            FormFieldType::Text,
        ),
    };

    Some(MultipartField {
        name,
        value,
        field_type,
    })
}

fn split_headers(part: &str) -> Option<(&str, &str)> {
    part.split_once("\r\n\r\n")
        .or_else(|| part.split_once("\n\n"))
}

fn header_param(header: &str, param: &str) -> Option<String> {
    header.split(';').skip(1).find_map(|segment| {
        let (key, value) = segment.split_once('=')?;
        if key.trim().eq_ignore_ascii_case(param) {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}
