//! Candidate filtering and the resolution entry point.

use crate::engine::selector::select_response;
use crate::extract::{extract, ExtractedBody};
use crate::matching::{body_matches, key_values_match, parse_query_string};
use crate::types::response::MockResponse;
use crate::types::route::MockRoute;
use std::collections::HashMap;
use tracing::debug;

/// Inbound request as supplied by the transport layer.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub method: String,
    /// Request path; may carry a query string.
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    /// Declared content type; when `None` the `Content-Type` header is used.
    pub content_type: Option<String>,
}

impl Request {
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref().or_else(|| {
            self.headers
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("content-type"))
                .map(|(_, value)| value.as_str())
        })
    }

    fn query_params(&self) -> HashMap<String, String> {
        match self.path.split_once('?') {
            Some((_, query)) => parse_query_string(query),
            None => HashMap::new(),
        }
    }
}

/// Terminal result of resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Matched {
        route_id: String,
        response: MockResponse,
    },
    Unmatched,
}

/// Filter pre-ordered candidate routes by header, query, and body rules.
///
/// The caller has already filtered by method and path; input order is
/// preserved so earlier registrations keep priority.
pub fn find_candidates<'a>(
    routes: &'a [MockRoute],
    request: &Request,
    extracted: &ExtractedBody,
) -> Vec<&'a MockRoute> {
    let query = request.query_params();
    routes
        .iter()
        .filter(|route| {
            key_values_match(&route.matchers.headers, &request.headers)
                && key_values_match(&route.matchers.query_params, &query)
                && body_matches(route.matchers.body.as_ref(), extracted)
        })
        .collect()
}

/// Resolve a request against pre-filtered candidate routes.
///
/// Only the first candidate (registration order) is attempted; a selector
/// miss on a multi-response route yields `Unmatched` without cascading to
/// later candidates. Every resolution emits a traffic event for
/// observability.
pub fn resolve(request: &Request, routes: &[MockRoute]) -> Outcome {
    let extracted = extract(&request.body, request.content_type());
    let candidates = find_candidates(routes, request, &extracted);

    let Some(route) = candidates.first() else {
        debug!(
            method = %request.method,
            path = %request.path,
            routes = routes.len(),
            matched = false,
            "no candidate route"
        );
        return Outcome::Unmatched;
    };

    match select_response(route, &extracted) {
        Some(response) => {
            debug!(
                method = %request.method,
                path = %request.path,
                route_id = %route.id,
                matched = true,
                "route matched"
            );
            Outcome::Matched {
                route_id: route.id.clone(),
                response: response.clone(),
            }
        }
        None => {
            debug!(
                method = %request.method,
                path = %request.path,
                route_id = %route.id,
                matched = false,
                "no payload mapping matched"
            );
            Outcome::Unmatched
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::body::{BodyRule, BodyType, ValidationStrategy};
    use crate::types::route::{
        KeyValueRule, MultiMatchMode, PayloadResponseMapping, ResponseStrategy, RouteMatchers,
    };
    use rstest::rstest;

    fn route(id: &str) -> MockRoute {
        MockRoute {
            id: id.to_string(),
            name: id.to_string(),
            enabled: true,
            method: "POST".to_string(),
            path: "/api/test".to_string(),
            matchers: RouteMatchers::default(),
            response_strategy: ResponseStrategy::Single,
            multi_response_match_mode: MultiMatchMode::Exact,
            response: MockResponse::default(),
            multi_responses: vec![],
        }
    }

    fn json_request(body: &str) -> Request {
        Request {
            method: "POST".to_string(),
            path: "/api/test".to_string(),
            headers: HashMap::new(),
            body: body.as_bytes().to_vec(),
            content_type: Some("application/json".to_string()),
        }
    }

    fn json_body_rule(value: &str, strategy: ValidationStrategy) -> BodyRule {
        BodyRule {
            body_type: BodyType::RawJson,
            validation_strategy: strategy,
            value: value.to_string(),
            ..BodyRule::default()
        }
    }

    #[rstest]
    fn test_vacuous_route_matches_any_body() {
        // Empty header rules and a none-typed body rule match everything.
        let mut r = route("r1");
        r.matchers.body = Some(BodyRule {
            body_type: BodyType::None,
            ..BodyRule::default()
        });
        let outcome = resolve(&json_request("random garbage"), &[r]);
        assert!(matches!(outcome, Outcome::Matched { route_id, .. } if route_id == "r1"));
    }

    #[rstest]
    #[case(r#"{"a": 1}"#, true)]
    #[case(r#"{ "a" :   1 }"#, true)]
    #[case(r#"{"a":1,"b":2}"#, false)]
    fn test_exact_json_route(#[case] body: &str, #[case] matched: bool) {
        let mut r = route("r1");
        r.matchers.body = Some(json_body_rule(r#"{"a":1}"#, ValidationStrategy::Exact));
        let outcome = resolve(&json_request(body), &[r]);
        assert_eq!(
            matches!(outcome, Outcome::Matched { .. }),
            matched
        );
    }

    #[rstest]
    fn test_key_only_route_ignores_extra_keys() {
        let mut r = route("r1");
        r.matchers.body = Some(json_body_rule(r#"{"a":1}"#, ValidationStrategy::KeyOnly));
        let outcome = resolve(&json_request(r#"{"a":1,"b":2}"#), &[r]);
        assert!(matches!(outcome, Outcome::Matched { .. }));
    }

    #[rstest]
    fn test_header_rules_filter_candidates() {
        let mut r = route("r1");
        r.matchers.headers = vec![KeyValueRule::new("X-Token", "a")];

        let mut request = json_request("{}");
        assert_eq!(resolve(&request, std::slice::from_ref(&r)), Outcome::Unmatched);

        request
            .headers
            .insert("x-token".to_string(), "a".to_string());
        assert!(matches!(
            resolve(&request, &[r]),
            Outcome::Matched { .. }
        ));
    }

    #[rstest]
    fn test_query_rules_filter_candidates() {
        let mut r = route("r1");
        r.matchers.query_params = vec![KeyValueRule::new("page", "2")];

        let mut request = json_request("{}");
        request.path = "/api/test?page=1".to_string();
        assert_eq!(resolve(&request, std::slice::from_ref(&r)), Outcome::Unmatched);

        request.path = "/api/test?page=2".to_string();
        assert!(matches!(resolve(&request, &[r]), Outcome::Matched { .. }));
    }

    #[rstest]
    fn test_first_candidate_wins() {
        let mut first = route("first");
        first.response.status = 201;
        let mut second = route("second");
        second.response.status = 202;

        let outcome = resolve(&json_request("{}"), &[first, second]);
        assert!(
            matches!(outcome, Outcome::Matched { route_id, response } if route_id == "first" && response.status == 201)
        );
    }

    #[rstest]
    fn test_no_cascade_past_first_candidate() {
        // The first candidate is a multi route with no matching mapping;
        // resolution stops there instead of trying the second candidate.
        let mut first = route("first");
        first.response_strategy = ResponseStrategy::Multi;
        first.multi_responses = vec![PayloadResponseMapping {
            id: "m1".to_string(),
            name: String::new(),
            payload: r#"{"never":"matches"}"#.to_string(),
            response: MockResponse::default(),
        }];
        let second = route("second");

        let outcome = resolve(&json_request(r#"{"a":1}"#), &[first, second]);
        assert_eq!(outcome, Outcome::Unmatched);
    }

    #[rstest]
    fn test_multi_route_no_fallback_to_single_response() {
        let mut r = route("r1");
        r.response_strategy = ResponseStrategy::Multi;
        r.response.status = 299;
        r.multi_responses = vec![];

        let outcome = resolve(&json_request("{}"), &[r]);
        assert_eq!(outcome, Outcome::Unmatched);
    }

    #[rstest]
    fn test_empty_route_table() {
        assert_eq!(resolve(&json_request("{}"), &[]), Outcome::Unmatched);
    }

    #[rstest]
    fn test_content_type_falls_back_to_header() {
        let mut r = route("r1");
        r.matchers.body = Some(json_body_rule(r#"{"a":1}"#, ValidationStrategy::Exact));

        let mut request = json_request(r#"{"a":1}"#);
        request.content_type = None;
        request
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        assert!(matches!(resolve(&request, &[r]), Outcome::Matched { .. }));
    }
}
