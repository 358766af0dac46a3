//! Core functionality for the item service
//!
//! This module contains the domain model and the batch processing engine.

pub mod batch;
pub mod models;

pub use batch::{BatchCoordinator, BatchResult, BatchSummary, WorkerPool};
pub use models::{Item, ItemPayload};
