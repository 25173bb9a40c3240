use std::sync::Arc;

use logship_log::{LogError, Logger};
use logship_log_elasticsearch::ElasticsearchLogger;
use logship_log_memory::MemoryLogger;

use crate::config::LoggingConfig;

/// Create a logger for the configured backend.
///
/// The returned logger is constructed but not opened; the caller drives the
/// lifecycle.
pub fn create_logger(config: &LoggingConfig) -> Result<Arc<dyn Logger>, LogError> {
    let logger: Arc<dyn Logger> = match config.backend.as_str() {
        "memory" => Arc::new(MemoryLogger::new(
            config.elasticsearch.level,
            config.elasticsearch.source.clone(),
        )),
        "elasticsearch" => Arc::new(ElasticsearchLogger::new(config.elasticsearch.clone())),
        other => {
            return Err(LogError::Config(format!("unknown log backend: {other}")));
        }
    };
    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn builds_memory_backend() {
        let config = LoggingConfig::from_toml_str(r#"backend = "memory""#).unwrap();
        let logger = create_logger(&config).unwrap();
        logger.open().await.unwrap();
        assert!(logger.is_open());
        logger.close().await.unwrap();
    }

    #[test]
    fn builds_elasticsearch_backend_unopened() {
        let config = LoggingConfig::from_toml_str(
            r#"
            backend = "elasticsearch"

            [elasticsearch.connection]
            uri = "http://localhost:9200"
            "#,
        )
        .unwrap();
        let logger = create_logger(&config).unwrap();
        assert!(!logger.is_open());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        let config = LoggingConfig::from_toml_str(r#"backend = "syslog""#).unwrap();
        let err = create_logger(&config).map(|_| ()).unwrap_err();
        assert!(matches!(err, LogError::Config(_)));
    }
}
