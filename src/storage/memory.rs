//! In-memory item store
//!
//! Used when the database is disabled and throughout the test suite.

use super::ItemStore;
use crate::core::models::Item;
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

/// Concurrent in-memory item store
#[derive(Debug)]
pub struct InMemoryItemStore {
    items: DashMap<i64, Item>,
    next_id: AtomicI64,
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryItemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn allocate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Keep the sequence ahead of explicitly chosen ids
    fn bump_sequence(&self, id: i64) {
        self.next_id.fetch_max(id + 1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn list_all_ids(&self) -> Result<Vec<i64>> {
        let mut ids: Vec<i64> = self.items.iter().map(|entry| *entry.key()).collect();
        ids.sort_unstable();
        Ok(ids)
    }

    async fn list_all(&self) -> Result<Vec<Item>> {
        let mut items: Vec<Item> = self.items.iter().map(|entry| entry.value().clone()).collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn get(&self, id: i64) -> Result<Option<Item>> {
        Ok(self.items.get(&id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, mut item: Item) -> Result<Item> {
        let id = match item.id {
            Some(id) => {
                self.bump_sequence(id);
                id
            }
            None => self.allocate_id(),
        };
        item.id = Some(id);
        debug!(item_id = id, "Saving item in memory");
        self.items.insert(id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        Ok(self.items.remove(&id).is_some())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
