//! Test database utilities
//!
//! Provides in-memory SQLite database for testing without external dependencies.
//! Each test gets an isolated database instance using SeaORM.

use item_service::config::DatabaseConfig;
use item_service::storage::database::Database;
use item_service::{Item, ItemStore};
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new, migrated in-memory test database
    ///
    /// Each call creates a completely isolated database instance.
    pub async fn new() -> Self {
        let db = Database::new(&test_db_config())
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Create a test database holding `count` fresh items
    pub async fn seeded(count: usize) -> Self {
        let db = Self::new().await;
        for n in 0..count {
            db.inner
                .save(Item::new(
                    format!("Item {}", n + 1),
                    format!("Desc {}", n + 1),
                    format!("item{}@example.com", n + 1),
                ))
                .await
                .expect("Failed to seed item");
        }
        db
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// Get Arc to the underlying database
    pub fn db_arc(&self) -> Arc<Database> {
        Arc::clone(&self.inner)
    }
}

/// Helper to create a simple test database config
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        // In-memory SQLite is per connection
        max_connections: 1,
        connection_timeout: 5,
        enabled: true,
    }
}
