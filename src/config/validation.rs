//! Configuration validation
//!
//! This module provides validation logic for the service configuration.

use super::models::*;
use crate::utils::error::{Result, ServiceError};
use tracing::debug;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        debug!("Validating service configuration");

        if self.server.host.is_empty() {
            return Err(ServiceError::Config(
                "Server host cannot be empty".to_string(),
            ));
        }

        self.server
            .validate()
            .map_err(|e| ServiceError::Config(format!("Server config error: {}", e)))?;

        self.server
            .cors
            .validate()
            .map_err(|e| ServiceError::Config(format!("CORS config error: {}", e)))?;

        self.storage
            .validate()
            .map_err(|e| ServiceError::Config(format!("Storage config error: {}", e)))?;

        self.worker_pool
            .validate()
            .map_err(|e| ServiceError::Config(format!("Worker pool config error: {}", e)))?;

        self.batch
            .validate()
            .map_err(|e| ServiceError::Config(format!("Batch config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| ServiceError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }
}
