//! Storage layer for the item service
//!
//! This module provides item persistence behind the [`ItemStore`] trait.

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;

use crate::config::StorageConfig;
use crate::core::models::Item;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub use memory::InMemoryItemStore;

/// Durable item record store keyed by identifier
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Identifiers of every stored item
    async fn list_all_ids(&self) -> Result<Vec<i64>>;

    /// Every stored item
    async fn list_all(&self) -> Result<Vec<Item>>;

    /// Look up one item
    async fn get(&self, id: i64) -> Result<Option<Item>>;

    /// Insert or replace an item, returning the stored version
    async fn save(&self, item: Item) -> Result<Item>;

    /// Delete an item, returning whether it existed
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Verify the backend is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Which backend the storage layer runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local map
    Memory,
    /// SeaORM database
    Database,
}

/// Main storage layer that owns the item store
#[derive(Clone)]
pub struct StorageLayer {
    /// Item store
    pub items: Arc<dyn ItemStore>,
    backend: StorageBackend,
}

impl std::fmt::Debug for StorageLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageLayer")
            .field("backend", &self.backend)
            .finish()
    }
}

impl StorageLayer {
    /// Create a new storage layer
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing storage layer");

        if !config.database.enabled {
            debug!("Database disabled, using in-memory item store");
            return Ok(Self::in_memory());
        }

        debug!("Connecting to database");
        let database = database::Database::new(&config.database).await?;
        database.migrate().await?;

        info!("Storage layer initialized successfully");
        Ok(Self {
            items: Arc::new(database),
            backend: StorageBackend::Database,
        })
    }

    /// Storage layer backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self {
            items: Arc::new(InMemoryItemStore::new()),
            backend: StorageBackend::Memory,
        }
    }

    /// Wrap an existing store
    pub fn from_store(items: Arc<dyn ItemStore>, backend: StorageBackend) -> Self {
        Self { items, backend }
    }

    /// Active backend
    pub fn backend(&self) -> StorageBackend {
        self.backend
    }

    /// Health check for the item store
    pub async fn health_check(&self) -> StorageHealthStatus {
        let healthy = match self.items.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Item store health check failed: {}", e);
                false
            }
        };

        StorageHealthStatus {
            backend: self.backend,
            healthy,
        }
    }
}

/// Storage health status
#[derive(Debug, Clone, Serialize)]
pub struct StorageHealthStatus {
    /// Active backend
    pub backend: StorageBackend,
    /// Whether the backend answered
    pub healthy: bool,
}
