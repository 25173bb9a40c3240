use async_trait::async_trait;

use crate::error::LogError;
use crate::level::LogLevel;
use crate::message::ErrorDescription;

/// Public seam implemented by every log backend.
///
/// Appending is synchronous so application threads never await; delivery
/// happens in the background between `open` and `close`. Opening an open
/// logger and closing a closed one are no-ops.
#[async_trait]
pub trait Logger: Send + Sync {
    /// Append a message, subject to the backend's level filter.
    fn log(
        &self,
        level: LogLevel,
        correlation_id: Option<&str>,
        error: Option<ErrorDescription>,
        message: &str,
    );

    /// Current capture threshold.
    fn level(&self) -> LogLevel;

    /// Change the capture threshold.
    fn set_level(&self, level: LogLevel);

    /// Open the backend: resolve connections, allocate resources and start
    /// background delivery.
    async fn open(&self) -> Result<(), LogError>;

    /// Close the backend: attempt a final flush, then release resources.
    async fn close(&self) -> Result<(), LogError>;

    /// Whether the backend is currently open.
    fn is_open(&self) -> bool;

    /// Log an unrecoverable failure.
    fn fatal(&self, correlation_id: Option<&str>, error: Option<ErrorDescription>, message: &str) {
        self.log(LogLevel::Fatal, correlation_id, error, message);
    }

    /// Log a recoverable failure.
    fn error(&self, correlation_id: Option<&str>, error: Option<ErrorDescription>, message: &str) {
        self.log(LogLevel::Error, correlation_id, error, message);
    }

    /// Log a suspicious but non-fatal condition.
    fn warn(&self, correlation_id: Option<&str>, message: &str) {
        self.log(LogLevel::Warn, correlation_id, None, message);
    }

    /// Log a normal operational message.
    fn info(&self, correlation_id: Option<&str>, message: &str) {
        self.log(LogLevel::Info, correlation_id, None, message);
    }

    /// Log diagnostic detail.
    fn debug(&self, correlation_id: Option<&str>, message: &str) {
        self.log(LogLevel::Debug, correlation_id, None, message);
    }

    /// Log very fine-grained tracing detail.
    fn trace(&self, correlation_id: Option<&str>, message: &str) {
        self.log(LogLevel::Trace, correlation_id, None, message);
    }
}
