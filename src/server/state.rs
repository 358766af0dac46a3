//! Application state shared across HTTP handlers
//!
//! This module provides the AppState struct and its implementations.

use crate::config::Config;
use crate::core::batch::{BatchCoordinator, WorkerPool};
use crate::services::ItemService;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc so every actix worker shares the same
/// store and the same worker pool.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Worker pool used by batch runs
    pub pool: Arc<WorkerPool>,
    /// Item service
    pub items: Arc<ItemService>,
}

impl AppState {
    /// Create a new AppState, wiring the batch coordinator and item service
    pub fn new(config: Config, storage: StorageLayer, pool: Arc<WorkerPool>) -> Self {
        let coordinator = Arc::new(BatchCoordinator::new(
            Arc::clone(&storage.items),
            Arc::clone(&pool),
            config.batch().clone(),
        ));
        let items = Arc::new(ItemService::new(Arc::clone(&storage.items), coordinator));

        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            pool,
            items,
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
