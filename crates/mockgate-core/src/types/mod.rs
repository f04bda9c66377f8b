//! Core domain types for routes, matchers, and responses.

pub mod body;
pub mod response;
pub mod route;
