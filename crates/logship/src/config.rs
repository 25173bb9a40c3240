use serde::Deserialize;

use logship_log::LogError;
use logship_log_elasticsearch::ElasticsearchLoggerConfig;

/// Top-level logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Which backend to use: `"memory"` or `"elasticsearch"`.
    pub backend: String,
    /// Elasticsearch backend settings, used when `backend = "elasticsearch"`.
    pub elasticsearch: ElasticsearchLoggerConfig,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            elasticsearch: ElasticsearchLoggerConfig::default(),
        }
    }
}

fn default_backend() -> String {
    "memory".to_owned()
}

impl LoggingConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, LogError> {
        toml::from_str(toml_str).map_err(|e| LogError::Config(e.to_string()))
    }
}
