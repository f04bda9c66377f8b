//! Core library for the Mockgate mock server.
//!
//! Implements request matching and response resolution over a table of
//! configured mock routes:
//! - [`types`]: route, matcher, and response definitions
//! - [`extract`]: request body normalization by content type
//! - [`matching`]: header, query, body, and path predicates
//! - [`engine`]: candidate filtering, response selection, and the route store
//! - [`config`]: parsing and loading route documents (JSON/JSONC/YAML)
//!
//! Resolution is a pure function of `(routes, request)`; the HTTP listener
//! and route persistence are external collaborators.

pub mod config;
pub mod engine;
pub mod extract;
pub mod matching;
pub mod types;

pub use engine::dispatcher::{resolve, Outcome, Request};
pub use engine::store::RouteStore;
pub use extract::{extract, ExtractedBody};
