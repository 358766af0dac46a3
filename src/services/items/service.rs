//! Main item service implementation

use crate::core::batch::{BatchCoordinator, BatchSummary};
use crate::core::models::{Item, ItemPayload};
use crate::storage::ItemStore;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Item service: request-level operations over the store
#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
    coordinator: Arc<BatchCoordinator>,
}

impl std::fmt::Debug for ItemService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemService")
            .field("batch", self.coordinator.config())
            .finish()
    }
}

impl ItemService {
    /// Create a new item service
    pub fn new(store: Arc<dyn ItemStore>, coordinator: Arc<BatchCoordinator>) -> Self {
        Self { store, coordinator }
    }

    /// Every stored item
    pub async fn find_all(&self) -> Result<Vec<Item>> {
        self.store.list_all().await
    }

    /// One item, if it exists
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Item>> {
        self.store.get(id).await
    }

    /// Validate and store a new item
    pub async fn save(&self, payload: ItemPayload) -> Result<Item> {
        payload.validate()?;

        let item = self.store.save(payload.into_item(None)).await?;
        info!(item_id = ?item.id, "Item created");
        Ok(item)
    }

    /// Replace an existing item
    ///
    /// The payload is validated before the existence check. Returns `None`
    /// when no item has the given id.
    pub async fn update(&self, id: i64, payload: ItemPayload) -> Result<Option<Item>> {
        payload.validate()?;

        if self.store.get(id).await?.is_none() {
            debug!(item_id = id, "Update target not found");
            return Ok(None);
        }

        let item = self.store.save(payload.into_item(Some(id))).await?;
        info!(item_id = id, "Item updated");
        Ok(Some(item))
    }

    /// Delete an item, returning whether it existed
    pub async fn delete_by_id(&self, id: i64) -> Result<bool> {
        if self.store.get(id).await?.is_none() {
            debug!(item_id = id, "Delete target not found");
            return Ok(false);
        }

        let deleted = self.store.delete(id).await?;
        if deleted {
            info!(item_id = id, "Item deleted");
        }
        Ok(deleted)
    }

    /// Mark every stored item as processed
    pub async fn process_items(&self) -> Result<Vec<Item>> {
        self.coordinator.process_all().await
    }

    /// Mark every stored item as processed, with run statistics
    pub async fn process_items_with_summary(&self) -> Result<(Vec<Item>, BatchSummary)> {
        self.coordinator.process_all_with_summary().await
    }
}
