//! Batch processing configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on the simulated per-item latency
const MAX_PROCESSING_DELAY_MS: u64 = 60_000;

/// Batch processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Simulated work latency per item, in milliseconds
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
        }
    }
}

impl BatchConfig {
    /// Set the per-item delay
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Per-item delay as a duration
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    /// Merge batch configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.processing_delay_ms != default_processing_delay_ms() {
            self.processing_delay_ms = other.processing_delay_ms;
        }
        self
    }

    /// Validate batch configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.processing_delay_ms > MAX_PROCESSING_DELAY_MS {
            return Err(format!(
                "Batch processing delay cannot exceed {} ms",
                MAX_PROCESSING_DELAY_MS
            ));
        }
        Ok(())
    }
}
