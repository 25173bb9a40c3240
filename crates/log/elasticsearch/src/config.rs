use serde::Deserialize;

use logship_log::LogLevel;

/// Connection settings for the Elasticsearch backend.
///
/// Either a full `uri`, a `discovery_key` resolved through a
/// [`Discovery`](crate::connect::Discovery) reference, or the
/// `protocol`/`host`/`port` parts must be provided; otherwise opening the
/// logger fails with a configuration error.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Connection protocol: `http` or `https` (default `http` when a host
    /// is given).
    pub protocol: Option<String>,
    /// Host name or IP address.
    pub host: Option<String>,
    /// Port (default 9200 when a host is given).
    pub port: Option<u16>,
    /// Full resource URI, taking precedence over the individual parts.
    pub uri: Option<String>,
    /// Key to resolve the connection through a discovery reference.
    pub discovery_key: Option<String>,
}

/// Configuration for the Elasticsearch logger.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElasticsearchLoggerConfig {
    /// Connection settings.
    pub connection: ConnectionConfig,
    /// Maximum log level to capture.
    pub level: LogLevel,
    /// Source (context) name stamped on every message.
    pub source: Option<String>,
    /// Interval in milliseconds between periodic flushes.
    pub interval_ms: u64,
    /// Cache size at which an early flush is scheduled.
    pub max_cache_size: usize,
    /// Index base name.
    pub index: String,
    /// Whether to rotate to a new index every UTC day by suffixing the date.
    pub daily: bool,
    /// Idle-connection timeout in milliseconds.
    pub reconnect_ms: u64,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of transport-level attempts per request.
    pub max_retries: u32,
    /// Whether the message text field is indexed.
    pub index_message: bool,
}

impl Default for ElasticsearchLoggerConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionConfig::default(),
            level: LogLevel::Info,
            source: None,
            interval_ms: 10_000,
            max_cache_size: 100,
            index: "log".to_owned(),
            daily: false,
            reconnect_ms: 60_000,
            timeout_ms: 30_000,
            max_retries: 3,
            index_message: false,
        }
    }
}

impl ElasticsearchLoggerConfig {
    /// Create a configuration with default tunables and no connection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the full connection URI.
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.connection.uri = Some(uri.into());
        self
    }

    /// Set the connection from protocol, host and port parts.
    #[must_use]
    pub fn with_connection(
        mut self,
        protocol: impl Into<String>,
        host: impl Into<String>,
        port: u16,
    ) -> Self {
        self.connection.protocol = Some(protocol.into());
        self.connection.host = Some(host.into());
        self.connection.port = Some(port);
        self
    }

    /// Set the discovery key used to resolve the connection.
    #[must_use]
    pub fn with_discovery_key(mut self, key: impl Into<String>) -> Self {
        self.connection.discovery_key = Some(key.into());
        self
    }

    /// Set the index base name.
    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    /// Enable or disable daily index rotation.
    #[must_use]
    pub fn with_daily(mut self, daily: bool) -> Self {
        self.daily = daily;
        self
    }

    /// Set the capture threshold.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Set the source (context) name.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the periodic flush interval in milliseconds.
    #[must_use]
    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Enable or disable indexing of the message text field.
    #[must_use]
    pub fn with_index_message(mut self, index_message: bool) -> Self {
        self.index_message = index_message;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let cfg = ElasticsearchLoggerConfig::default();
        assert_eq!(cfg.interval_ms, 10_000);
        assert_eq!(cfg.max_cache_size, 100);
        assert_eq!(cfg.index, "log");
        assert!(!cfg.daily);
        assert_eq!(cfg.reconnect_ms, 60_000);
        assert_eq!(cfg.timeout_ms, 30_000);
        assert_eq!(cfg.max_retries, 3);
        assert!(!cfg.index_message);
        assert_eq!(cfg.level, LogLevel::Info);
        assert!(cfg.connection.uri.is_none());
        assert!(cfg.connection.host.is_none());
    }

    #[test]
    fn builders() {
        let cfg = ElasticsearchLoggerConfig::new()
            .with_connection("http", "localhost", 9200)
            .with_index("applog")
            .with_daily(true)
            .with_source("orders")
            .with_index_message(true);
        assert_eq!(cfg.connection.host.as_deref(), Some("localhost"));
        assert_eq!(cfg.connection.port, Some(9200));
        assert_eq!(cfg.index, "applog");
        assert!(cfg.daily);
        assert_eq!(cfg.source.as_deref(), Some("orders"));
        assert!(cfg.index_message);
    }

    #[test]
    fn deserializes_with_defaults() {
        let cfg: ElasticsearchLoggerConfig = serde_json::from_str(
            r#"{ "connection": { "uri": "http://es:9200" }, "daily": true }"#,
        )
        .unwrap();
        assert_eq!(cfg.connection.uri.as_deref(), Some("http://es:9200"));
        assert!(cfg.daily);
        assert_eq!(cfg.interval_ms, 10_000);
    }
}
