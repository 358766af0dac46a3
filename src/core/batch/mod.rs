//! Batch processing for stored items
//!
//! A [`BatchCoordinator`] fans one task per item out onto a shared
//! [`WorkerPool`], collects successes in a [`BatchResult`], and resolves
//! once every task has finished.

mod aggregate;
mod coordinator;
mod pool;
mod types;


pub use aggregate::BatchResult;
pub use coordinator::BatchCoordinator;
pub use pool::{PoolStats, ShutdownOutcome, TaskError, TaskHandle, WorkerPool};
pub use types::{BatchSummary, TaskOutcome};
