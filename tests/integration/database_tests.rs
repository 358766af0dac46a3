//! Database integration tests
//!
//! Tests the SeaORM item store using a real in-memory SQLite database.

#[cfg(test)]
mod tests {
    use crate::common::database::test_db_config;
    use crate::common::{ItemFactory, TestDatabase};
    use crate::assert_ok;
    use item_service::config::StorageConfig;
    use item_service::storage::database::{Database, DatabaseBackendType};
    use item_service::storage::{StorageBackend, StorageLayer};
    use item_service::{Item, ItemStore};

    /// Test basic database connection and health check
    #[tokio::test]
    async fn test_database_health_check() {
        let db = TestDatabase::new().await;

        let health = db.db().health_check().await;
        assert!(health.is_ok(), "Health check failed: {:?}", health.err());
        assert_eq!(db.db().backend_type(), DatabaseBackendType::SQLite);
    }

    /// Test database migration is repeatable
    #[tokio::test]
    async fn test_database_migration() {
        let db = Database::new(&test_db_config())
            .await
            .expect("Failed to create database");

        assert_ok!(db.migrate().await);
        assert_ok!(db.migrate().await);
    }

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let db = TestDatabase::new().await;

        let first = assert_ok!(db.db().save(ItemFactory::create()).await);
        let second = assert_ok!(db.db().save(ItemFactory::create()).await);

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(first.status, "NEW");
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let db = TestDatabase::seeded(3).await;

        let item = assert_ok!(db.db().get(2).await).expect("item 2 exists");
        assert_eq!(item.name, "Item 2");
        assert_eq!(item.email, "item2@example.com");

        assert!(assert_ok!(db.db().get(99).await).is_none());
        assert!(assert_ok!(db.db().get(i64::MAX).await).is_none());

        let items = assert_ok!(db.db().list_all().await);
        assert_eq!(items.len(), 3);
        assert_eq!(assert_ok!(db.db().list_all_ids().await), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_save_existing_replaces_fields() {
        let db = TestDatabase::seeded(1).await;

        let mut item = assert_ok!(db.db().get(1).await).expect("item 1 exists");
        item.mark_processed();
        item.description = "Updated".to_string();
        assert_ok!(db.db().save(item).await);

        let stored = assert_ok!(db.db().get(1).await).expect("item 1 exists");
        assert!(stored.is_processed());
        assert_eq!(stored.description, "Updated");
        assert_eq!(assert_ok!(db.db().list_all_ids().await).len(), 1);
    }

    #[tokio::test]
    async fn test_save_with_explicit_new_id() {
        let db = TestDatabase::new().await;

        let item = assert_ok!(db.db().save(ItemFactory::with_email("x@y.io").with_id(10)).await);
        assert_eq!(item.id, Some(10));
        assert_eq!(assert_ok!(db.db().get(10).await).map(|i| i.email), Some("x@y.io".to_string()));
    }

    #[tokio::test]
    async fn test_ids_beyond_32_bits_round_trip() {
        let db = TestDatabase::seeded(2).await;
        let wide_id = 3_000_000_000_i64;

        let saved = assert_ok!(db.db().save(ItemFactory::create().with_id(wide_id)).await);
        assert_eq!(saved.id, Some(wide_id));

        assert_eq!(
            assert_ok!(db.db().list_all_ids().await),
            vec![1, 2, wide_id]
        );
        assert_eq!(assert_ok!(db.db().list_all().await).len(), 3);
        assert!(assert_ok!(db.db().get(wide_id).await).is_some());
        assert!(assert_ok!(db.db().delete(wide_id).await));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = TestDatabase::seeded(2).await;

        assert!(assert_ok!(db.db().delete(1).await));
        assert!(!assert_ok!(db.db().delete(1).await));
        assert_eq!(assert_ok!(db.db().list_all_ids().await), vec![2]);
    }

    #[tokio::test]
    async fn test_storage_layer_selects_database() {
        let mut config = StorageConfig::default();
        config.database = test_db_config();

        let storage = assert_ok!(StorageLayer::new(&config).await);
        assert_eq!(storage.backend(), StorageBackend::Database);
        assert!(storage.health_check().await.healthy);

        let saved: Item = assert_ok!(storage.items.save(ItemFactory::create()).await);
        assert_eq!(saved.id, Some(1));
    }
}
