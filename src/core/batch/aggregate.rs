//! Batch result aggregate shared by the tasks of one batch run

use crate::core::models::Item;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Append-only, thread-safe collection of processed items
///
/// Writers call [`BatchResult::add`] concurrently. The aggregate has no
/// completion signal of its own: read it only after every writer has
/// finished, which the coordinator guarantees by awaiting all task handles.
#[derive(Debug, Default)]
pub struct BatchResult {
    items: Mutex<Vec<Item>>,
    processed: AtomicUsize,
}

impl BatchResult {
    /// Create an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty aggregate sized for `capacity` items
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Mutex::new(Vec::with_capacity(capacity)),
            processed: AtomicUsize::new(0),
        }
    }

    /// Record one processed item
    pub fn add(&self, item: Item) {
        self.items.lock().push(item);
        self.processed.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of successful adds; informational only
    pub fn processed_count(&self) -> usize {
        self.processed.load(Ordering::SeqCst)
    }

    /// Number of items currently held
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether no item has been added
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.lock().clone()
    }

    /// Consume the aggregate and return its items
    pub fn into_items(self) -> Vec<Item> {
        self.items.into_inner()
    }
}
