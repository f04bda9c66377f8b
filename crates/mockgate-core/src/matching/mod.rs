//! Request matching predicates.

mod body;
mod headers;
mod intersection;
mod path;
mod query;

pub use body::body_matches;
pub use headers::key_values_match;
pub use intersection::json_keys_subset;
pub use path::{method_matches, path_matches};
pub use query::parse_query_string;
