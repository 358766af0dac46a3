//! Item API endpoints
//!
//! CRUD over `/api/items` plus the batch processing trigger

use crate::core::models::ItemPayload;
use crate::server::AppState;
use crate::utils::error::{Result, ServiceError};
use actix_web::{HttpResponse, web};
use tracing::{debug, info};

/// List every item
/// GET /api/items
pub async fn list_items(data: web::Data<AppState>) -> Result<HttpResponse> {
    let items = data.items.find_all().await?;
    debug!(count = items.len(), "Listed items");
    Ok(HttpResponse::Ok().json(items))
}

/// Fetch one item
/// GET /api/items/{id}
pub async fn get_item(data: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    let id = path.into_inner();

    match data.items.find_by_id(id).await? {
        Some(item) => Ok(HttpResponse::Ok().json(item)),
        None => Ok(HttpResponse::NotFound().finish()),
    }
}

/// Create an item
/// POST /api/items
pub async fn create_item(
    data: web::Data<AppState>,
    payload: web::Json<ItemPayload>,
) -> Result<HttpResponse> {
    match data.items.save(payload.into_inner()).await {
        Ok(item) => Ok(HttpResponse::Created().json(item)),
        Err(e) => rejected_or(e),
    }
}

/// Replace an item
/// PUT /api/items/{id}
pub async fn update_item(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<ItemPayload>,
) -> Result<HttpResponse> {
    let id = path.into_inner();

    match data.items.update(id, payload.into_inner()).await {
        Ok(Some(item)) => Ok(HttpResponse::Ok().json(item)),
        Ok(None) => Ok(HttpResponse::NotFound().finish()),
        Err(e) => rejected_or(e),
    }
}

/// Delete an item
/// DELETE /api/items/{id}
pub async fn delete_item(data: web::Data<AppState>, path: web::Path<i64>) -> Result<HttpResponse> {
    let id = path.into_inner();

    if data.items.delete_by_id(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Ok(HttpResponse::NotFound().finish())
    }
}

/// Mark every stored item as processed
/// GET /api/items/process
///
/// Answers once the whole batch has finished, with the items that were
/// processed. Skipped and failed items are not reported.
pub async fn process_items(data: web::Data<AppState>) -> Result<HttpResponse> {
    info!("Batch processing requested");

    let items = data.items.process_items().await?;
    Ok(HttpResponse::Ok().json(items))
}

/// Invalid input is a bare 400; everything else keeps its error body
fn rejected_or(error: ServiceError) -> Result<HttpResponse> {
    match error {
        ServiceError::Validation(message) => {
            debug!(reason = %message, "Rejected item payload");
            Ok(HttpResponse::BadRequest().finish())
        }
        other => Err(other),
    }
}

/// Configure item routes
pub fn configure_item_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/items")
            .route("", web::get().to(list_items))
            .route("", web::post().to(create_item))
            // Must precede "/{id}" so "process" is not parsed as an id.
            .route("/process", web::get().to(process_items))
            .route("/{id}", web::get().to(get_item))
            .route("/{id}", web::put().to(update_item))
            .route("/{id}", web::delete().to(delete_item)),
    );
}
