//! Shared command context.

use std::sync::Arc;

use anyhow::Result;
use shopfront_data::{CatalogApi, HttpCatalogClient};

use crate::config::CliConfig;
use crate::output::Output;

/// Context passed to every command: output handling and the API client.
pub struct Context {
    pub output: Output,
    api: Arc<HttpCatalogClient>,
}

impl Context {
    /// Load config and build the API client. The `--api-url` flag wins
    /// over the config file.
    pub fn load(config_path: Option<&str>, api_url: Option<&str>, output: Output) -> Result<Self> {
        let config = CliConfig::load(config_path)?;
        let base_url = api_url
            .map(str::to_string)
            .unwrap_or(config.api.base_url);

        output.debug(&format!("catalog api: {}", base_url));
        let api = Arc::new(HttpCatalogClient::new().with_base_url(base_url));

        Ok(Self { output, api })
    }

    /// The catalog API collaborator the stores consume.
    pub fn api(&self) -> Arc<dyn CatalogApi> {
        self.api.clone()
    }
}
