/// Errors that can occur while configuring, opening or flushing a logger.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Missing or invalid configuration (e.g. no connection resolvable).
    #[error("configuration error: {0}")]
    Config(String),

    /// Client construction or transport-level failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Application-level error reported by the remote service.
    #[error("remote error {kind}: {reason}")]
    Remote {
        /// Error type reported in the response body.
        kind: String,
        /// Error reason reported in the response body.
        reason: String,
    },

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
