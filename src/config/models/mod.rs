//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod batch;
pub mod logging;
pub mod server;
pub mod service;
pub mod storage;
pub mod worker_pool;

// Re-export all configuration types
pub use batch::*;
pub use logging::*;
pub use server::*;
pub use service::*;
pub use storage::*;
pub use worker_pool::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

pub fn default_database_url() -> String {
    "sqlite://data/items.db?mode=rwc".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

pub fn default_connection_timeout() -> u64 {
    5
}

/// Default number of batch workers
pub fn default_pool_workers() -> usize {
    10
}

/// Default shutdown grace period in seconds
pub fn default_shutdown_grace_period() -> u64 {
    60
}

/// Default simulated per-item latency in milliseconds
pub fn default_processing_delay_ms() -> u64 {
    100
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
