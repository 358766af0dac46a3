//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function for automatic configuration loading.

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{Result, ServiceError};
use std::path::Path;
use tracing::info;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "config/service.yaml";

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| ServiceError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from `path`, falling back to the environment
///
/// A missing or invalid file is not fatal: the environment (or built-in
/// defaults) takes over and the reason is logged.
pub async fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    info!("Loading configuration file: {}", path.display());

    match Config::from_file(path).await {
        Ok(config) => {
            info!("Configuration file loaded successfully");
            Ok(config)
        }
        Err(e) => {
            info!(
                "Configuration file loading failed, using environment and defaults: {}",
                e
            );
            Config::from_env()
        }
    }
}

/// Run the server with the given configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting item service");

    let server = ServerBuilder::new().with_config(config.clone()).build().await?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET    /health - Health check");
    info!("   GET    /api/items - List items");
    info!("   GET    /api/items/{{id}} - Get item");
    info!("   POST   /api/items - Create item");
    info!("   PUT    /api/items/{{id}} - Replace item");
    info!("   DELETE /api/items/{{id}} - Delete item");
    info!("   GET    /api/items/process - Process all items");

    server.start().await
}
