use async_trait::async_trait;

use crate::error::LogError;
use crate::message::LogMessage;

/// Batched persistence seam implemented by every log backend.
///
/// Implementations must be `Send + Sync` so a background flush task can
/// share them with application threads. Batches are best-effort: callers
/// drop a batch whose save failed.
#[async_trait]
pub trait LogWriter: Send + Sync {
    /// Persist an ordered batch of log messages.
    async fn save(&self, messages: &[LogMessage]) -> Result<(), LogError>;
}
