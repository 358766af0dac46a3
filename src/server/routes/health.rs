//! Health check endpoint

use crate::core::batch::PoolStats;
use crate::server::state::AppState;
use crate::storage::StorageHealthStatus;
use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

/// Health status response
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// "healthy" or "degraded"
    pub status: Cow<'static, str>,
    /// When the check ran
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Crate version
    pub version: Cow<'static, str>,
    /// Item store status
    pub storage: StorageHealthStatus,
    /// Worker pool statistics
    pub pool: PoolStats,
}

/// Health check endpoint
///
/// Always answers 200 so load balancers can tell a live process from a dead
/// one; the body says whether the store is reachable.
pub async fn health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let storage = state.storage.health_check().await;
    let status = if storage.healthy {
        Cow::Borrowed("healthy")
    } else {
        Cow::Borrowed("degraded")
    };

    Ok(HttpResponse::Ok().json(HealthStatus {
        status,
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        storage,
        pool: state.pool.stats(),
    }))
}
