//! Response selection for a matched route.

use crate::extract::{parse_json_lenient, ExtractedBody};
use crate::matching::json_keys_subset;
use crate::types::response::MockResponse;
use crate::types::route::{MockRoute, MultiMatchMode, ResponseStrategy};

/// Resolve the response a matched route returns for the given body.
///
/// Single-strategy routes return their canned response unconditionally.
/// Multi-strategy routes evaluate payload mappings in list order under the
/// route's match mode; the first hit wins. `None` means no mapping matched.
/// Multi routes never fall back to the single response; the two strategies
/// are mutually exclusive response sources.
pub fn select_response<'a>(
    route: &'a MockRoute,
    extracted: &ExtractedBody,
) -> Option<&'a MockResponse> {
    match route.response_strategy {
        ResponseStrategy::Single => Some(&route.response),
        ResponseStrategy::Multi => route
            .multi_responses
            .iter()
            .find(|mapping| {
                mapping_matches(route.multi_response_match_mode, &mapping.payload, extracted)
            })
            .map(|mapping| &mapping.response),
    }
}

fn mapping_matches(mode: MultiMatchMode, payload: &str, extracted: &ExtractedBody) -> bool {
    match mode {
        MultiMatchMode::Exact => payload_equals(payload, extracted),
        MultiMatchMode::KeyMatch => payload_keys_present(payload, extracted),
    }
}

/// Structural equality between the mapping payload and the request body,
/// whitespace-insensitive. When neither side is JSON the comparison degrades
/// to trimmed-string equality.
fn payload_equals(payload: &str, extracted: &ExtractedBody) -> bool {
    let expected = parse_json_lenient(payload.trim());
    match (expected, extracted) {
        (Some(expected), ExtractedBody::Json(body)) => *body == expected,
        (None, ExtractedBody::Opaque(text)) | (None, ExtractedBody::Xml(text)) => {
            payload.trim() == text.trim()
        }
        _ => false,
    }
}

/// Key-subset check: every key of the mapping payload must be present in the
/// request body, values ignored. A malformed payload fails closed and the
/// selector skips to the next mapping.
fn payload_keys_present(payload: &str, extracted: &ExtractedBody) -> bool {
    let Some(expected) = parse_json_lenient(payload.trim()) else {
        return false;
    };
    let ExtractedBody::Json(body) = extracted else {
        return false;
    };
    json_keys_subset(body, &expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::route::PayloadResponseMapping;
    use rstest::rstest;
    use serde_json::json;

    fn mapping(id: &str, payload: &str, status: u16) -> PayloadResponseMapping {
        PayloadResponseMapping {
            id: id.to_string(),
            name: id.to_string(),
            payload: payload.to_string(),
            response: MockResponse {
                status,
                ..MockResponse::default()
            },
        }
    }

    fn multi_route(mode: MultiMatchMode, mappings: Vec<PayloadResponseMapping>) -> MockRoute {
        MockRoute {
            id: "r1".to_string(),
            name: String::new(),
            enabled: true,
            method: "POST".to_string(),
            path: "/api".to_string(),
            matchers: Default::default(),
            response_strategy: ResponseStrategy::Multi,
            multi_response_match_mode: mode,
            response: MockResponse {
                status: 299,
                ..MockResponse::default()
            },
            multi_responses: mappings,
        }
    }

    #[rstest]
    fn test_single_strategy_unconditional() {
        let mut route = multi_route(MultiMatchMode::Exact, vec![]);
        route.response_strategy = ResponseStrategy::Single;

        let selected = select_response(&route, &ExtractedBody::Empty).expect("Should select");
        assert_eq!(selected.status, 299);

        let selected = select_response(&route, &ExtractedBody::Json(json!({"x": 1})))
            .expect("Should select");
        assert_eq!(selected.status, 299);
    }

    #[rstest]
    fn test_multi_exact_picks_matching_mapping() {
        let route = multi_route(
            MultiMatchMode::Exact,
            vec![
                mapping("m1", r#"{"type":"admin"}"#, 201),
                mapping("m2", r#"{"type":"user"}"#, 202),
            ],
        );
        let body = ExtractedBody::Json(json!({"type": "user"}));
        assert_eq!(select_response(&route, &body).map(|r| r.status), Some(202));
    }

    #[rstest]
    fn test_multi_exact_whitespace_and_key_order_insensitive() {
        let route = multi_route(
            MultiMatchMode::Exact,
            vec![mapping("m1", "{ \"a\": 1,\n \"b\": 2 }", 201)],
        );
        let body = ExtractedBody::Json(json!({"b": 2, "a": 1}));
        assert_eq!(select_response(&route, &body).map(|r| r.status), Some(201));
    }

    #[rstest]
    fn test_multi_exact_extra_keys_do_not_match() {
        let route = multi_route(
            MultiMatchMode::Exact,
            vec![mapping("m1", r#"{"type":"user"}"#, 201)],
        );
        let body = ExtractedBody::Json(json!({"type": "user", "extra": true}));
        assert_eq!(select_response(&route, &body), None);
    }

    #[rstest]
    fn test_multi_first_match_wins() {
        // An empty payload matches every body under key matching, so the
        // first mapping shadows the second even when the second is a
        // "better" match.
        let route = multi_route(
            MultiMatchMode::KeyMatch,
            vec![mapping("m1", "{}", 201), mapping("m2", r#"{"id":"1"}"#, 202)],
        );
        let body = ExtractedBody::Json(json!({"id": "1"}));
        assert_eq!(select_response(&route, &body).map(|r| r.status), Some(201));
    }

    #[rstest]
    fn test_multi_key_match_is_presence_only() {
        // Key presence alone decides: both mappings share the key "type",
        // so the first in list order wins regardless of its value.
        let route = multi_route(
            MultiMatchMode::KeyMatch,
            vec![
                mapping("m1", r#"{"type":"admin"}"#, 201),
                mapping("m2", r#"{"type":"user"}"#, 202),
            ],
        );
        let body = ExtractedBody::Json(json!({"type": "user", "extra": true}));
        assert_eq!(select_response(&route, &body).map(|r| r.status), Some(201));
    }

    #[rstest]
    fn test_multi_no_mapping_hit_returns_none() {
        let route = multi_route(
            MultiMatchMode::Exact,
            vec![mapping("m1", r#"{"a":1}"#, 201)],
        );
        let body = ExtractedBody::Json(json!({"b": 2}));
        // No fallback to the route's single response
        assert_eq!(select_response(&route, &body), None);
    }

    #[rstest]
    fn test_multi_empty_mappings_returns_none() {
        let route = multi_route(MultiMatchMode::Exact, vec![]);
        assert_eq!(select_response(&route, &ExtractedBody::Empty), None);
    }

    #[rstest]
    fn test_multi_malformed_payload_skipped() {
        let route = multi_route(
            MultiMatchMode::KeyMatch,
            vec![
                mapping("broken", "{not json", 500),
                mapping("m2", r#"{"a":1}"#, 202),
            ],
        );
        let body = ExtractedBody::Json(json!({"a": 1}));
        assert_eq!(select_response(&route, &body).map(|r| r.status), Some(202));
    }

    #[rstest]
    fn test_multi_exact_non_json_fallback_string_equality() {
        let route = multi_route(
            MultiMatchMode::Exact,
            vec![mapping("m1", "plain payload", 201)],
        );
        let body = ExtractedBody::Opaque(" plain payload ".to_string());
        assert_eq!(select_response(&route, &body).map(|r| r.status), Some(201));
    }

    #[rstest]
    fn test_multi_key_match_non_json_body_never_matches() {
        let route = multi_route(MultiMatchMode::KeyMatch, vec![mapping("m1", "{}", 201)]);
        assert_eq!(select_response(&route, &ExtractedBody::Empty), None);
        assert_eq!(
            select_response(&route, &ExtractedBody::Opaque("x".into())),
            None
        );
    }
}
