use std::sync::Mutex;

use async_trait::async_trait;

use logship_log::{LogError, LogMessage, LogWriter};

/// A [`LogWriter`] that records every saved batch, flattened in order.
///
/// Used to exercise buffering and flush plumbing without a real backend.
#[derive(Default)]
pub struct MemoryLogWriter {
    saved: Mutex<Vec<LogMessage>>,
    batches: Mutex<usize>,
}

impl MemoryLogWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages saved so far, in save order.
    pub fn saved(&self) -> Vec<LogMessage> {
        self.saved.lock().expect("memory writer poisoned").clone()
    }

    /// Number of `save` calls that carried a non-empty batch.
    pub fn batches(&self) -> usize {
        *self.batches.lock().expect("memory writer poisoned")
    }
}

#[async_trait]
impl LogWriter for MemoryLogWriter {
    async fn save(&self, messages: &[LogMessage]) -> Result<(), LogError> {
        if messages.is_empty() {
            return Ok(());
        }
        self.saved
            .lock()
            .expect("memory writer poisoned")
            .extend_from_slice(messages);
        *self.batches.lock().expect("memory writer poisoned") += 1;
        Ok(())
    }
}
