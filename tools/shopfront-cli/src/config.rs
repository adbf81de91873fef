//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shopfront_data::DEFAULT_API_BASE;

/// Config file looked up when no explicit path is given.
const DEFAULT_CONFIG_PATH: &str = "shopfront.toml";

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Catalog API configuration.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl CliConfig {
    /// Load config from a file, or defaults when none is present.
    ///
    /// An explicit path must exist and parse; the implicit
    /// `shopfront.toml` is optional.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::parse_file(path),
            None if std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::parse_file(DEFAULT_CONFIG_PATH)
            }
            None => Ok(Self::default()),
        }
    }

    fn parse_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse TOML config: {}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_parse_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://catalog.example.test/api"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://catalog.example.test/api");
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
    }
}
