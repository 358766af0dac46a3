//! Batch processing types

use serde::Serialize;
use std::time::Duration;

/// Terminal state of one processing task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskOutcome {
    /// Item found, marked and saved
    Processed,
    /// Item no longer exists
    Skipped,
    /// Lookup or save failed, the task panicked, or it was cancelled
    Failed,
}

/// Summary of one batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Run identifier used in log fields
    pub run_id: String,
    /// Ids in the snapshot
    pub total: usize,
    /// Tasks that saved their item
    pub processed: usize,
    /// Tasks whose item was gone
    pub skipped: usize,
    /// Tasks that failed or could not be scheduled
    pub failed: usize,
    /// Wall time of the whole run
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

impl BatchSummary {
    /// Tally task outcomes
    pub fn from_outcomes(
        run_id: impl Into<String>,
        outcomes: &[TaskOutcome],
        duration: Duration,
    ) -> Self {
        let count = |wanted: TaskOutcome| outcomes.iter().filter(|o| **o == wanted).count();

        Self {
            run_id: run_id.into(),
            total: outcomes.len(),
            processed: count(TaskOutcome::Processed),
            skipped: count(TaskOutcome::Skipped),
            failed: count(TaskOutcome::Failed),
            duration,
        }
    }
}

mod duration_millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }
}
