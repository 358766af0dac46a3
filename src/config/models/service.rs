//! Top-level service configuration

#![allow(missing_docs)]

use super::*;
use crate::utils::error::{Result, ServiceError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Worker pool configuration
    #[serde(default)]
    pub worker_pool: WorkerPoolConfig,
    /// Batch processing configuration
    #[serde(default)]
    pub batch: BatchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Read an environment variable and parse it, if present
fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| ServiceError::Config(format!("Invalid value for {}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

impl ServiceConfig {
    /// Build a configuration from `ITEM_SERVICE_*` environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = env_parse::<String>("ITEM_SERVICE_HOST")? {
            config.server.host = host;
        }
        if let Some(port) = env_parse::<u16>("ITEM_SERVICE_PORT")? {
            config.server.port = port;
        }
        if let Some(workers) = env_parse::<usize>("ITEM_SERVICE_HTTP_WORKERS")? {
            config.server.workers = Some(workers);
        }
        if let Some(url) = env_parse::<String>("ITEM_SERVICE_DATABASE_URL")? {
            config.storage.database.url = url;
            config.storage.database.enabled = true;
        }
        if let Some(workers) = env_parse::<usize>("ITEM_SERVICE_POOL_WORKERS")? {
            config.worker_pool.workers = workers;
        }
        if let Some(grace) = env_parse::<u64>("ITEM_SERVICE_SHUTDOWN_GRACE_SECS")? {
            config.worker_pool.shutdown_grace_period = grace;
        }
        if let Some(delay) = env_parse::<u64>("ITEM_SERVICE_PROCESSING_DELAY_MS")? {
            config.batch.processing_delay_ms = delay;
        }
        if let Some(level) = env_parse::<String>("ITEM_SERVICE_LOG_LEVEL")? {
            config.logging.level = level;
        }
        if let Some(json) = env_parse::<bool>("ITEM_SERVICE_LOG_JSON")? {
            config.logging.json = json;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.server = self.server.merge(other.server);
        self.storage = self.storage.merge(other.storage);
        self.worker_pool = self.worker_pool.merge(other.worker_pool);
        self.batch = self.batch.merge(other.batch);
        self.logging = self.logging.merge(other.logging);
        self
    }
}
