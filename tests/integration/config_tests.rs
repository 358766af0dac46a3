//! Configuration loading tests

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use item_service::server::builder::load_config;
    use item_service::{Config, ServiceError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const EXAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/config/service.yaml.example");

    #[tokio::test]
    async fn test_example_config_loads() {
        let config = assert_ok!(Config::from_file(EXAMPLE).await);

        assert_eq!(config.server().port, 8080);
        assert_eq!(config.worker_pool().workers, 10);
        assert_eq!(config.worker_pool().shutdown_grace_period, 60);
        assert_eq!(config.batch().processing_delay_ms, 100);
        assert!(!config.storage().database.enabled);
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"server: [not, a, map\n").unwrap();

        let err = assert_err!(Config::from_file(file.path()).await);
        assert!(matches!(err, ServiceError::Config(_)));
    }

    #[tokio::test]
    async fn test_load_config_prefers_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"worker_pool:\n  workers: 3\n").unwrap();

        let config = assert_ok!(load_config(file.path()).await);
        assert_eq!(config.worker_pool().workers, 3);
    }

    #[tokio::test]
    async fn test_yaml_round_trip_keeps_values() {
        let mut config = Config::default();
        config.service.worker_pool.workers = 7;

        let yaml = assert_ok!(config.to_yaml());
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loaded = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(loaded.worker_pool().workers, 7);
    }
}
