//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod health;
pub mod items;

pub use health::HealthStatus;
pub use items::configure_item_routes;
