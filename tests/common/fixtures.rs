//! Test fixtures and data factories
//!
//! Provides factory methods for creating test items and a store wrapper
//! that injects failures for chosen ids.

use async_trait::async_trait;
use item_service::{Item, ItemPayload, ItemStore, Result, ServiceError};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Factory for creating test items
pub struct ItemFactory;

impl ItemFactory {
    /// Create an unsaved item with a unique name
    pub fn create() -> Item {
        let tag = &Uuid::new_v4().to_string()[..8];
        Item::new(
            format!("Item {}", tag),
            "Test item",
            format!("item-{}@example.com", tag),
        )
    }

    /// Create an item with a specific email
    pub fn with_email(email: &str) -> Item {
        let mut item = Self::create();
        item.email = email.to_string();
        item
    }

    /// Request body for a valid item
    pub fn payload() -> ItemPayload {
        ItemPayload::from(Self::create())
    }
}

/// Store wrapper that fails saves or panics on lookups for chosen ids
pub struct FaultyStore {
    inner: Arc<dyn ItemStore>,
    fail_save: HashSet<i64>,
    panic_get: HashSet<i64>,
    saves: AtomicUsize,
}

impl FaultyStore {
    /// Wrap a store without any faults
    pub fn new(inner: Arc<dyn ItemStore>) -> Self {
        Self {
            inner,
            fail_save: HashSet::new(),
            panic_get: HashSet::new(),
            saves: AtomicUsize::new(0),
        }
    }

    /// Make saves of these ids fail
    pub fn failing_saves(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.fail_save.extend(ids);
        self
    }

    /// Make lookups of these ids panic
    pub fn panicking_gets(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.panic_get.extend(ids);
        self
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ItemStore for FaultyStore {
    async fn list_all_ids(&self) -> Result<Vec<i64>> {
        self.inner.list_all_ids().await
    }

    async fn list_all(&self) -> Result<Vec<Item>> {
        self.inner.list_all().await
    }

    async fn get(&self, id: i64) -> Result<Option<Item>> {
        if self.panic_get.contains(&id) {
            panic!("injected panic for item {}", id);
        }
        self.inner.get(id).await
    }

    async fn save(&self, item: Item) -> Result<Item> {
        if let Some(id) = item.id.filter(|id| self.fail_save.contains(id)) {
            return Err(ServiceError::storage(format!("injected failure for item {}", id)));
        }
        let saved = self.inner.save(item).await?;
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        self.inner.delete(id).await
    }

    async fn health_check(&self) -> Result<()> {
        self.inner.health_check().await
    }
}
