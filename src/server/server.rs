//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::core::batch::{ShutdownOutcome, WorkerPool};
use crate::server::middleware::RequestIdMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::utils::error::{Result, ServiceError};
use actix_cors::Cors;
use actix_web::{
    App, HttpResponse, HttpServer as ActixHttpServer, error::InternalError,
    middleware::DefaultHeaders, web,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let storage = StorageLayer::new(config.storage()).await?;
        let pool = Arc::new(WorkerPool::new(config.worker_pool().clone()));
        let state = AppState::new(config.clone(), storage, pool);

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Create a server around prepared state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.server().clone(),
            state,
        }
    }

    /// Build the CORS policy from configuration
    fn cors(state: &AppState) -> Cors {
        let cors_config = &state.config.server().cors;
        let mut cors = Cors::default();

        if !cors_config.enabled {
            return cors;
        }

        if cors_config.allows_all_origins() {
            cors = cors.allow_any_origin();
            cors_config.validate().unwrap_or_else(|e| {
                warn!(error = %e, "CORS Configuration Warning");
            });
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        let methods: Vec<actix_web::http::Method> = cors_config
            .allowed_methods
            .iter()
            .filter_map(|m| m.parse().ok())
            .collect();
        if !methods.is_empty() {
            cors = cors.allowed_methods(methods);
        }

        let headers: Vec<actix_web::http::header::HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        if !headers.is_empty() {
            cors = cors.allowed_headers(headers);
        }

        cors = cors.max_age(cors_config.max_age as usize);

        if cors_config.allow_credentials {
            cors = cors.supports_credentials();
        }

        cors
    }

    /// Malformed or incomplete JSON bodies get a bare 400
    fn json_config(state: &AppState) -> web::JsonConfig {
        web::JsonConfig::default()
            .limit(state.config.server().max_body_size)
            .error_handler(|err, _req| {
                InternalError::from_response(err, HttpResponse::BadRequest().finish()).into()
            })
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors = Self::cors(&state);
        let json_config = Self::json_config(&state);

        App::new()
            .app_data(state)
            .app_data(json_config)
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .wrap(DefaultHeaders::new().add(("Server", "item-service")))
            .configure(routes::health::configure_routes)
            .configure(routes::configure_item_routes)
    }

    /// Start the HTTP server
    ///
    /// Returns once the server has stopped and the worker pool has been shut
    /// down. A second Ctrl-C during the pool's grace period cancels remaining
    /// batch tasks.
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {}", bind_addr);
        info!("Setting up routes and middleware");

        let pool = Arc::clone(&self.state.pool);
        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .client_request_timeout(Duration::from_secs(self.config.timeout))
            .shutdown_timeout(self.config.timeout)
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let served = server
            .await
            .map_err(|e| ServiceError::internal(format!("Server error: {}", e)));

        info!("HTTP server stopped");

        match pool.shutdown_with_interrupt(tokio::signal::ctrl_c()).await {
            ShutdownOutcome::Graceful | ShutdownOutcome::AlreadyStopped => {}
            outcome => warn!(?outcome, "Batch tasks were cancelled during shutdown"),
        }

        served
    }

    /// Describe a bind failure
    fn format_bind_error(e: std::io::Error, bind_addr: &str, port: u16) -> ServiceError {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            ServiceError::internal(format!(
                "Failed to bind to {}: port {} is already in use",
                bind_addr, port
            ))
        } else {
            ServiceError::internal(format!("Failed to bind to {}: {}", bind_addr, e))
        }
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
