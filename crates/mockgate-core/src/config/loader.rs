//! Loading route configuration from disk.

use crate::config::error::ConfigError;
use crate::config::parser::{get_file_type, parse_config_content, ConfigFileType};
use crate::types::route::MockRoute;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Top-level mock server configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub routes: Vec<MockRoute>,
}

fn default_port() -> u16 {
    4010
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            routes: Vec::new(),
        }
    }
}

/// Load a whole configuration document from a single file.
///
/// A missing file yields the default configuration so that a fresh
/// installation starts with an empty route table.
pub async fn load_config(path: impl AsRef<Path>) -> Result<MockConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(MockConfig::default());
    }
    let content = tokio::fs::read_to_string(path).await?;
    parse_config_content(&content, &path.to_string_lossy())
}

/// Load route definition files from a directory, one route per file.
///
/// All `*.json`, `*.jsonc`, `*.yaml`, and `*.yml` files under the directory
/// (recursively) are considered. Files that fail to parse are skipped with a
/// warning; a bad file must not take down the rest of the table.
pub async fn load_routes_from_dir(dir: impl AsRef<Path>) -> Result<Vec<MockRoute>, ConfigError> {
    let pattern = format!("{}/**/*.*", dir.as_ref().to_string_lossy());
    let mut paths: Vec<_> = glob::glob(&pattern)?
        .filter_map(Result::ok)
        .filter(|path| {
            get_file_type(&path.to_string_lossy()) != ConfigFileType::Unknown
        })
        .collect();
    paths.sort();

    let mut routes = Vec::new();
    for path in paths {
        let content = tokio::fs::read_to_string(&path).await?;
        match parse_config_content::<MockRoute>(&content, &path.to_string_lossy()) {
            Ok(route) => routes.push(route),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unparseable route file");
            }
        }
    }
    Ok(routes)
}
