//! HTTP connection resolution for the Elasticsearch backend.

use std::sync::Arc;

use async_trait::async_trait;

use logship_log::LogError;

use crate::config::ConnectionConfig;

/// Optional discovery reference that turns a key into connection settings.
///
/// A hosting application can register an implementation so the logger
/// resolves its endpoint through service discovery instead of static
/// configuration.
#[async_trait]
pub trait Discovery: Send + Sync {
    /// Resolve one connection for the given key, if known.
    async fn resolve_one(&self, key: &str) -> Option<ConnectionConfig>;
}

/// Resolves the configured connection into a base URI.
///
/// Precedence: explicit `uri`, then a `discovery_key` lookup through the
/// registered [`Discovery`] reference, then `protocol://host:port` from the
/// individual parts.
pub struct ConnectionResolver {
    connection: ConnectionConfig,
    discovery: Option<Arc<dyn Discovery>>,
}

impl ConnectionResolver {
    /// Create a resolver over the given connection settings.
    pub fn new(connection: ConnectionConfig) -> Self {
        Self {
            connection,
            discovery: None,
        }
    }

    /// Register a discovery reference.
    pub fn set_discovery(&mut self, discovery: Arc<dyn Discovery>) {
        self.discovery = Some(discovery);
    }

    /// Resolve the base URI, or fail with a configuration error when no
    /// connection is configured.
    pub async fn resolve(&self) -> Result<String, LogError> {
        if let Some(uri) = uri_from(&self.connection) {
            return Ok(uri);
        }

        if let (Some(key), Some(discovery)) = (&self.connection.discovery_key, &self.discovery) {
            if let Some(resolved) = discovery.resolve_one(key).await {
                if let Some(uri) = uri_from(&resolved) {
                    return Ok(uri);
                }
            }
        }

        Err(LogError::Config("connection is not configured".to_owned()))
    }
}

/// Build a base URI from connection settings, when they carry enough.
fn uri_from(connection: &ConnectionConfig) -> Option<String> {
    if let Some(uri) = &connection.uri {
        return Some(uri.trim_end_matches('/').to_owned());
    }

    let host = connection.host.as_deref()?;
    let protocol = connection.protocol.as_deref().unwrap_or("http");
    let port = connection.port.unwrap_or(9200);
    Some(format!("{protocol}://{host}:{port}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uri_takes_precedence() {
        let resolver = ConnectionResolver::new(ConnectionConfig {
            protocol: Some("https".to_owned()),
            host: Some("ignored".to_owned()),
            port: Some(1),
            uri: Some("http://es:9200/".to_owned()),
            discovery_key: None,
        });
        let uri = futures_block(resolver.resolve()).unwrap();
        assert_eq!(uri, "http://es:9200");
    }

    #[test]
    fn parts_build_uri_with_defaults() {
        let resolver = ConnectionResolver::new(ConnectionConfig {
            host: Some("localhost".to_owned()),
            ..ConnectionConfig::default()
        });
        let uri = futures_block(resolver.resolve()).unwrap();
        assert_eq!(uri, "http://localhost:9200");
    }

    #[test]
    fn missing_connection_is_a_config_error() {
        let resolver = ConnectionResolver::new(ConnectionConfig::default());
        let err = futures_block(resolver.resolve()).unwrap_err();
        assert!(matches!(err, LogError::Config(_)));
    }

    struct StaticDiscovery;

    #[async_trait]
    impl Discovery for StaticDiscovery {
        async fn resolve_one(&self, key: &str) -> Option<ConnectionConfig> {
            (key == "es").then(|| ConnectionConfig {
                protocol: Some("https".to_owned()),
                host: Some("es.internal".to_owned()),
                port: Some(9201),
                ..ConnectionConfig::default()
            })
        }
    }

    #[test]
    fn discovery_key_resolves_through_reference() {
        let mut resolver = ConnectionResolver::new(ConnectionConfig {
            discovery_key: Some("es".to_owned()),
            ..ConnectionConfig::default()
        });
        resolver.set_discovery(Arc::new(StaticDiscovery));
        let uri = futures_block(resolver.resolve()).unwrap();
        assert_eq!(uri, "https://es.internal:9201");
    }

    #[test]
    fn unknown_discovery_key_is_a_config_error() {
        let mut resolver = ConnectionResolver::new(ConnectionConfig {
            discovery_key: Some("missing".to_owned()),
            ..ConnectionConfig::default()
        });
        resolver.set_discovery(Arc::new(StaticDiscovery));
        assert!(futures_block(resolver.resolve()).is_err());
    }

    fn futures_block<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("test runtime")
            .block_on(fut)
    }
}
