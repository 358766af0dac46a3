//! Worker pool configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Worker pool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerPoolConfig {
    /// Number of long-lived workers
    #[serde(default = "default_pool_workers")]
    pub workers: usize,
    /// Seconds to wait for in-flight tasks before forcing cancellation
    #[serde(default = "default_shutdown_grace_period")]
    pub shutdown_grace_period: u64,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            workers: default_pool_workers(),
            shutdown_grace_period: default_shutdown_grace_period(),
        }
    }
}

impl WorkerPoolConfig {
    /// Set the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the shutdown grace period
    pub fn with_shutdown_grace_period(mut self, grace: Duration) -> Self {
        self.shutdown_grace_period = grace.as_secs();
        self
    }

    /// Grace period as a duration
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_period)
    }

    /// Merge worker pool configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.workers != default_pool_workers() {
            self.workers = other.workers;
        }
        if other.shutdown_grace_period != default_shutdown_grace_period() {
            self.shutdown_grace_period = other.shutdown_grace_period;
        }
        self
    }

    /// Validate worker pool configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("Worker pool needs at least one worker".to_string());
        }
        Ok(())
    }
}
