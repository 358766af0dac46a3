//! # item-service
//!
//! A small CRUD service for items with a concurrent batch-processing
//! endpoint.
//!
//! ## Features
//!
//! - **CRUD API**: `/api/items` backed by SQLite (SeaORM) or an in-memory store
//! - **Batch processing**: `/api/items/process` fans one task per item out
//!   onto a bounded worker pool and answers once every task has finished
//! - **Failure isolation**: a failing or panicking task never affects its
//!   siblings or the batch response
//! - **Bounded shutdown**: in-flight batch work gets a grace period, then is
//!   cancelled
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use item_service::{Config, ItemServiceApp};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/service.yaml").await?;
//!     let app = ItemServiceApp::new(config).await?;
//!     app.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Batch processing as a library
//!
//! ```rust,no_run
//! use item_service::config::{BatchConfig, WorkerPoolConfig};
//! use item_service::storage::InMemoryItemStore;
//! use item_service::{BatchCoordinator, WorkerPool};
//! use std::sync::Arc;
//!
//! # async fn demo() -> item_service::Result<()> {
//! let store = Arc::new(InMemoryItemStore::new());
//! let pool = Arc::new(WorkerPool::new(WorkerPoolConfig::default()));
//! let coordinator = BatchCoordinator::new(store, pool.clone(), BatchConfig::default());
//!
//! let processed = coordinator.process_all().await?;
//! println!("processed {} items", processed.len());
//!
//! pool.shutdown().await;
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Result, ServiceError};

// Export core functionality
pub use core::batch::{
    BatchCoordinator, BatchResult, BatchSummary, ShutdownOutcome, TaskError, WorkerPool,
};
pub use core::models::{Item, ItemPayload};
pub use services::ItemService;
pub use storage::{ItemStore, StorageLayer};

use tracing::info;

/// The assembled item service: configuration plus HTTP server
pub struct ItemServiceApp {
    config: Config,
    server: server::HttpServer,
}

impl ItemServiceApp {
    /// Create a new service instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new item service instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run until the HTTP server stops and the worker pool has shut down
    pub async fn run(self) -> Result<()> {
        info!("Starting item service");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await?;

        Ok(())
    }

    /// Get configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
