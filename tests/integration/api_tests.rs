//! HTTP API integration tests
//!
//! Drives the full actix application over a SQLite-backed store.

#[cfg(test)]
mod tests {
    use crate::common::{ItemFactory, TestDatabase};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use item_service::config::{BatchConfig, WorkerPoolConfig};
    use item_service::server::{AppState, HttpServer};
    use item_service::storage::{StorageBackend, StorageLayer};
    use item_service::{Config, Item, WorkerPool};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;

    async fn sqlite_state(seed: usize) -> AppState {
        let db = TestDatabase::seeded(seed).await;
        let storage = StorageLayer::from_store(db.db_arc(), StorageBackend::Database);

        let mut config = Config::default();
        config.service.batch =
            BatchConfig::default().with_processing_delay(Duration::from_millis(5));

        let pool = Arc::new(WorkerPool::new(
            WorkerPoolConfig::default()
                .with_workers(4)
                .with_shutdown_grace_period(Duration::from_secs(1)),
        ));
        AppState::new(config, storage, pool)
    }

    #[actix_web::test]
    async fn test_crud_round_trip() {
        let state = web::Data::new(sqlite_state(0).await);
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/items")
            .set_json(ItemFactory::payload())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Item = test::read_body_json(resp).await;
        let id = created.id.expect("id assigned");

        let req = test::TestRequest::put()
            .uri(&format!("/api/items/{}", id))
            .set_json(json!({"name": "Renamed", "email": "renamed@example.com"}))
            .to_request();
        let updated: Item = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.status, "NEW");

        let req = test::TestRequest::get().uri("/api/items").to_request();
        let items: Vec<Item> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(items, vec![updated]);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/items/{}", id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&format!("/api/items/{}", id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_process_endpoint_updates_store() {
        let state = web::Data::new(sqlite_state(2).await);
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get().uri("/api/items/process").to_request();
        let processed: Vec<Item> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(processed.len(), 2);

        let req = test::TestRequest::get().uri("/api/items").to_request();
        let items: Vec<Item> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.status == "Processed"));
    }

    #[actix_web::test]
    async fn test_health_reports_database_backend() {
        let state = web::Data::new(sqlite_state(0).await);
        let app = test::init_service(HttpServer::create_app(state)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["storage"]["backend"], "database");
        assert_eq!(body["storage"]["healthy"], true);
        assert_eq!(body["version"], item_service::VERSION);
    }
}
