//! Batch Processing Coordinator - fan-out/fan-in over the worker pool
//!
//! One run snapshots every item id, schedules one task per id on the shared
//! [`WorkerPool`], and resolves only after every task reached a terminal
//! state. Successful tasks append to a per-run [`BatchResult`]; failures are
//! logged and dropped at the task boundary so they never affect siblings or
//! the run as a whole.

use super::aggregate::BatchResult;
use super::pool::WorkerPool;
use super::types::{BatchSummary, TaskOutcome};
use crate::config::BatchConfig;
use crate::core::models::Item;
use crate::storage::ItemStore;
use crate::utils::error::{Result, ServiceError};
use crate::utils::format_duration;
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, debug, error, info, info_span, warn};
use uuid::Uuid;

/// Coordinates batch runs over the item store
pub struct BatchCoordinator {
    store: Arc<dyn ItemStore>,
    pool: Arc<WorkerPool>,
    config: BatchConfig,
}

impl BatchCoordinator {
    /// Create a coordinator over a store and a shared pool
    pub fn new(store: Arc<dyn ItemStore>, pool: Arc<WorkerPool>, config: BatchConfig) -> Self {
        Self {
            store,
            pool,
            config,
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Mark every stored item as processed
    ///
    /// Resolves with the items that were found and saved, in completion
    /// order. Items that vanished or failed are left out silently.
    pub async fn process_all(&self) -> Result<Vec<Item>> {
        let (items, _summary) = self.process_all_with_summary().await?;
        Ok(items)
    }

    /// Same as [`process_all`](Self::process_all), also returning run statistics
    pub async fn process_all_with_summary(&self) -> Result<(Vec<Item>, BatchSummary)> {
        if !self.pool.is_accepting() {
            return Err(ServiceError::pool_unavailable(
                "batch processing is shutting down",
            ));
        }

        let start = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        let ids = self.store.list_all_ids().await?;
        info!(run_id = %run_id, total = ids.len(), "Starting batch run");

        let span = info_span!("batch_run", run_id = %run_id);
        let aggregate = Arc::new(BatchResult::with_capacity(ids.len()));
        let mut pending = Vec::with_capacity(ids.len());
        let mut rejected = 0usize;

        for id in ids {
            let task = process_item(
                Arc::clone(&self.store),
                Arc::clone(&aggregate),
                self.config.processing_delay(),
                id,
            )
            .instrument(span.clone());

            match self.pool.submit(task) {
                Ok(handle) => pending.push((id, handle)),
                Err(e) => {
                    warn!(run_id = %run_id, item_id = id, error = %e, "Could not schedule item");
                    rejected += 1;
                }
            }
        }

        // Fan-in: every handle is awaited, whatever the task's fate.
        let mut outcomes: Vec<TaskOutcome> =
            join_all(pending.into_iter().map(|(id, handle)| async move {
                match handle.await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!(item_id = id, error = %e, "Error processing item");
                        TaskOutcome::Failed
                    }
                }
            }))
            .await;
        outcomes.extend(std::iter::repeat_n(TaskOutcome::Failed, rejected));

        let summary = BatchSummary::from_outcomes(run_id, &outcomes, start.elapsed());
        info!(
            run_id = %summary.run_id,
            total = summary.total,
            processed = summary.processed,
            skipped = summary.skipped,
            failed = summary.failed,
            "Batch run finished in {}",
            format_duration(summary.duration.as_millis() as u64)
        );

        // A cancelled task may still be releasing its clone of the aggregate.
        let items = Arc::try_unwrap(aggregate)
            .map(BatchResult::into_items)
            .unwrap_or_else(|shared| shared.snapshot());

        Ok((items, summary))
    }
}

/// Task body: never fails, failures become [`TaskOutcome::Failed`]
async fn process_item(
    store: Arc<dyn ItemStore>,
    aggregate: Arc<BatchResult>,
    delay: Duration,
    id: i64,
) -> TaskOutcome {
    match try_process_item(store.as_ref(), &aggregate, delay, id).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!(item_id = id, error = %e, "Error processing item");
            TaskOutcome::Failed
        }
    }
}

async fn try_process_item(
    store: &dyn ItemStore,
    aggregate: &BatchResult,
    delay: Duration,
    id: i64,
) -> Result<TaskOutcome> {
    tokio::time::sleep(delay).await;

    let Some(mut item) = store.get(id).await? else {
        debug!(item_id = id, "Item vanished before processing, skipping");
        return Ok(TaskOutcome::Skipped);
    };

    item.mark_processed();
    let saved = store.save(item).await?;
    aggregate.add(saved);

    debug!(item_id = id, "Item processed");
    Ok(TaskOutcome::Processed)
}
