//! Route configuration parsing and loading.

pub mod error;
pub mod loader;
pub mod parser;

pub use error::ConfigError;
pub use loader::{load_config, load_routes_from_dir, MockConfig};
