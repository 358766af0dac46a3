//! Batch processing integration tests
//!
//! Runs the coordinator against real stores, with failures injected through
//! [`FaultyStore`](crate::common::FaultyStore).

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::{FaultyStore, ItemFactory, TestDatabase};
    use item_service::config::{BatchConfig, WorkerPoolConfig};
    use item_service::storage::InMemoryItemStore;
    use item_service::{BatchCoordinator, Item, ItemStore, ShutdownOutcome, WorkerPool};
    use std::sync::Arc;
    use std::time::Duration;

    fn pool(workers: usize) -> Arc<WorkerPool> {
        Arc::new(WorkerPool::new(
            WorkerPoolConfig::default()
                .with_workers(workers)
                .with_shutdown_grace_period(Duration::from_secs(5)),
        ))
    }

    fn fast() -> BatchConfig {
        BatchConfig::default().with_processing_delay(Duration::from_millis(1))
    }

    async fn memory_store(count: usize) -> Arc<InMemoryItemStore> {
        let store = Arc::new(InMemoryItemStore::new());
        for _ in 0..count {
            assert_ok!(store.save(ItemFactory::create()).await);
        }
        store
    }

    fn ids(items: &[Item]) -> Vec<i64> {
        let mut ids: Vec<i64> = items.iter().filter_map(|item| item.id).collect();
        ids.sort_unstable();
        ids
    }

    #[tokio::test]
    async fn test_batch_over_sqlite_processes_everything() {
        let db = TestDatabase::seeded(12).await;
        let coordinator = BatchCoordinator::new(db.db_arc(), pool(4), fast());

        let (items, summary) = assert_ok!(coordinator.process_all_with_summary().await);

        assert_eq!(ids(&items), (1..=12).collect::<Vec<_>>());
        assert_eq!(summary.processed, 12);
        assert!(items.iter().all(Item::is_processed));

        let stored = assert_ok!(db.db().list_all().await);
        assert!(stored.iter().all(Item::is_processed));
    }

    #[tokio::test]
    async fn test_batch_over_sqlite_handles_wide_ids() {
        let db = TestDatabase::seeded(2).await;
        let wide_id = 3_000_000_000_i64;
        assert_ok!(db.db().save(ItemFactory::create().with_id(wide_id)).await);
        let coordinator = BatchCoordinator::new(db.db_arc(), pool(2), fast());

        let items = assert_ok!(coordinator.process_all().await);

        assert_eq!(ids(&items), vec![1, 2, wide_id]);
        let stored = assert_ok!(db.db().get(wide_id).await).expect("wide item exists");
        assert!(stored.is_processed());
    }

    #[tokio::test]
    async fn test_one_failing_save_yields_n_minus_one() {
        let inner = memory_store(5).await;
        let store = Arc::new(FaultyStore::new(inner.clone()).failing_saves([3]));
        let coordinator = BatchCoordinator::new(store.clone(), pool(3), fast());

        let (items, summary) = assert_ok!(coordinator.process_all_with_summary().await);

        assert_eq!(ids(&items), vec![1, 2, 4, 5]);
        assert_eq!(summary.failed, 1);
        assert_eq!(store.save_count(), 4);

        let untouched = assert_ok!(inner.get(3).await).expect("item 3 exists");
        assert!(!untouched.is_processed());
    }

    #[tokio::test]
    async fn test_panicking_task_is_isolated() {
        let inner = memory_store(4).await;
        let store = Arc::new(FaultyStore::new(inner).panicking_gets([2]));
        let pool = pool(2);
        let coordinator = BatchCoordinator::new(store, pool.clone(), fast());

        let (items, summary) = assert_ok!(coordinator.process_all_with_summary().await);

        assert_eq!(ids(&items), vec![1, 3, 4]);
        assert_eq!(summary.failed, 1);
        assert!(pool.is_accepting());

        // The pool keeps serving runs after a panic.
        let again = assert_ok!(coordinator.process_all().await);
        assert_eq!(again.len(), 3);
    }

    #[tokio::test]
    async fn test_deleted_items_are_skipped() {
        let store = memory_store(3).await;
        assert_ok!(store.delete(2).await);
        let coordinator = BatchCoordinator::new(store, pool(2), fast());

        let items = assert_ok!(coordinator.process_all().await);
        assert_eq!(ids(&items), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_successive_runs_are_idempotent() {
        let db = TestDatabase::seeded(4).await;
        let coordinator = BatchCoordinator::new(db.db_arc(), pool(4), fast());

        let first = assert_ok!(coordinator.process_all().await);
        let second = assert_ok!(coordinator.process_all().await);

        assert_eq!(ids(&first), ids(&second));
        assert!(second.iter().all(Item::is_processed));
    }

    #[tokio::test]
    async fn test_concurrent_runs_each_get_full_result() {
        let store = memory_store(8).await;
        let shared = pool(4);
        let coordinator = Arc::new(BatchCoordinator::new(store, shared, fast()));

        let runs: Vec<_> = (0..3)
            .map(|_| {
                let coordinator = Arc::clone(&coordinator);
                tokio::spawn(async move { coordinator.process_all().await })
            })
            .collect();

        for run in runs {
            let items = assert_ok!(run.await.expect("run task joined"));
            assert_eq!(ids(&items), (1..=8).collect::<Vec<_>>());
        }
    }

    #[tokio::test]
    async fn test_shutdown_waits_for_running_batch() {
        let store = memory_store(6).await;
        let pool = pool(2);
        let config = BatchConfig::default().with_processing_delay(Duration::from_millis(50));
        let coordinator = Arc::new(BatchCoordinator::new(store, pool.clone(), config));

        let run = {
            let coordinator = Arc::clone(&coordinator);
            tokio::spawn(async move { coordinator.process_all().await })
        };
        // Let the run submit its tasks before closing the pool.
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(pool.shutdown().await, ShutdownOutcome::Graceful);

        let items = assert_ok!(run.await.expect("run task joined"));
        assert_eq!(items.len(), 6);
        assert!(coordinator.process_all().await.is_err());
    }
}
