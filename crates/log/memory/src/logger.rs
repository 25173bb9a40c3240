use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use logship_log::{CachedLogger, ErrorDescription, LogError, LogLevel, LogMessage, Logger};

/// In-memory [`Logger`] that keeps accepted messages in an ordered store.
///
/// There is no delivery pipeline: `open`/`close` only toggle the open flag,
/// and `close` clears the store.
pub struct MemoryLogger {
    cached: CachedLogger,
    open: AtomicBool,
    store: Mutex<Vec<LogMessage>>,
}

impl MemoryLogger {
    /// Create a closed memory logger with the given threshold and source.
    pub fn new(level: LogLevel, source: Option<String>) -> Self {
        Self {
            cached: CachedLogger::new(level, source, usize::MAX),
            open: AtomicBool::new(false),
            store: Mutex::new(Vec::new()),
        }
    }

    /// All messages accepted so far, in order.
    pub fn messages(&self) -> Vec<LogMessage> {
        self.store.lock().expect("memory logger poisoned").clone()
    }

    /// Discard all stored messages.
    pub fn clear(&self) {
        self.store.lock().expect("memory logger poisoned").clear();
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info, None)
    }
}

#[async_trait]
impl Logger for MemoryLogger {
    fn log(
        &self,
        level: LogLevel,
        correlation_id: Option<&str>,
        error: Option<ErrorDescription>,
        message: &str,
    ) {
        // Route through the cached logger for filtering and composition,
        // then move the composed message straight into the store.
        self.cached.log(level, correlation_id, error, message);
        let batch = self.cached.cache().drain();
        if !batch.is_empty() {
            self.store
                .lock()
                .expect("memory logger poisoned")
                .extend(batch);
        }
    }

    fn level(&self) -> LogLevel {
        self.cached.level()
    }

    fn set_level(&self, level: LogLevel) {
        self.cached.set_level(level);
    }

    async fn open(&self) -> Result<(), LogError> {
        self.open.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&self) -> Result<(), LogError> {
        self.open.store(false, Ordering::SeqCst);
        self.clear();
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lifecycle_toggles_open_flag() {
        let logger = MemoryLogger::default();
        assert!(!logger.is_open());
        logger.open().await.unwrap();
        assert!(logger.is_open());
        logger.close().await.unwrap();
        assert!(!logger.is_open());
    }

    #[tokio::test]
    async fn stores_accepted_messages_and_filters() {
        let logger = MemoryLogger::new(LogLevel::Info, Some("svc".to_owned()));
        logger.info(Some("cid-1"), "kept");
        logger.debug(None, "dropped");

        let messages = logger.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].message, "kept");
        assert_eq!(messages[0].source.as_deref(), Some("svc"));
    }

    #[tokio::test]
    async fn close_clears_store() {
        let logger = MemoryLogger::default();
        logger.open().await.unwrap();
        logger.info(None, "pending");
        logger.close().await.unwrap();
        assert!(logger.messages().is_empty());
    }
}
