//! Message buffering shared by backends.
//!
//! The original design inherited a "cached logger" base class; here it is a
//! composed pair: [`MessageCache`] holds the pending batch and
//! [`CachedLogger`] applies level filtering and composes messages into it.

use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;

use crate::level::LogLevel;
use crate::message::{ErrorDescription, LogMessage};

/// Bounded, ordered buffer of pending log messages.
///
/// `append` reports when the buffer has reached capacity so the owner can
/// schedule an early flush. The cap is also enforced: past `max_size` the
/// oldest messages are dropped, so a logger whose flushes stall (or that
/// was never opened) cannot grow without bound.
pub struct MessageCache {
    messages: Mutex<Vec<LogMessage>>,
    max_size: usize,
}

impl MessageCache {
    /// Create a cache holding at most `max_size` messages.
    pub fn new(max_size: usize) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            max_size: max_size.max(1),
        }
    }

    /// Append a message, evicting the oldest entries past `max_size`;
    /// returns `true` when the cache is at capacity and should be flushed.
    pub fn append(&self, message: LogMessage) -> bool {
        let mut messages = self.messages.lock().expect("message cache poisoned");
        messages.push(message);
        if messages.len() > self.max_size {
            let excess = messages.len() - self.max_size;
            messages.drain(..excess);
        }
        messages.len() >= self.max_size
    }

    /// Take the whole pending batch, preserving insertion order.
    pub fn drain(&self) -> Vec<LogMessage> {
        let mut messages = self.messages.lock().expect("message cache poisoned");
        std::mem::take(&mut *messages)
    }

    /// Discard all pending messages.
    pub fn clear(&self) {
        self.messages.lock().expect("message cache poisoned").clear();
    }

    /// Number of pending messages.
    pub fn len(&self) -> usize {
        self.messages.lock().expect("message cache poisoned").len()
    }

    /// Whether the cache holds no pending messages.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Level filtering and message composition over a shared [`MessageCache`].
pub struct CachedLogger {
    level: RwLock<LogLevel>,
    source: RwLock<Option<String>>,
    cache: Arc<MessageCache>,
}

impl CachedLogger {
    /// Create a cached logger with the given capture threshold, source name
    /// and cache capacity hint.
    pub fn new(level: LogLevel, source: Option<String>, max_cache_size: usize) -> Self {
        Self {
            level: RwLock::new(level),
            source: RwLock::new(source),
            cache: Arc::new(MessageCache::new(max_cache_size)),
        }
    }

    /// The shared message cache, for the owning backend's flush path.
    pub fn cache(&self) -> Arc<MessageCache> {
        Arc::clone(&self.cache)
    }

    /// Current capture threshold.
    pub fn level(&self) -> LogLevel {
        *self.level.read().expect("level lock poisoned")
    }

    /// Change the capture threshold.
    pub fn set_level(&self, level: LogLevel) {
        *self.level.write().expect("level lock poisoned") = level;
    }

    /// Current source (context) name.
    pub fn source(&self) -> Option<String> {
        self.source.read().expect("source lock poisoned").clone()
    }

    /// Change the source (context) name.
    pub fn set_source(&self, source: Option<String>) {
        *self.source.write().expect("source lock poisoned") = source;
    }

    /// Compose and buffer a message, subject to the level filter.
    ///
    /// Returns `true` when the append filled the cache to capacity and the
    /// backend should flush soon; filtered messages always return `false`.
    pub fn log(
        &self,
        level: LogLevel,
        correlation_id: Option<&str>,
        error: Option<ErrorDescription>,
        message: &str,
    ) -> bool {
        if !self.level().captures(level) {
            return false;
        }

        self.cache.append(LogMessage {
            time: Utc::now(),
            source: self.source(),
            level,
            correlation_id: correlation_id.map(str::to_owned),
            error,
            message: message.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(text: &str) -> LogMessage {
        LogMessage {
            time: Utc::now(),
            source: None,
            level: LogLevel::Info,
            correlation_id: None,
            error: None,
            message: text.to_owned(),
        }
    }

    #[test]
    fn append_hints_flush_at_capacity() {
        let cache = MessageCache::new(2);
        assert!(!cache.append(msg("a")));
        assert!(cache.append(msg("b")));
        assert!(cache.append(msg("c")));
    }

    #[test]
    fn append_never_exceeds_max_size() {
        let cache = MessageCache::new(2);
        for i in 0..1000 {
            cache.append(msg(&format!("m{i}")));
        }
        assert_eq!(cache.len(), 2);

        // The newest messages survive, in order.
        let batch = cache.drain();
        assert_eq!(batch[0].message, "m998");
        assert_eq!(batch[1].message, "m999");
    }

    #[test]
    fn drain_preserves_order_and_empties() {
        let logger = CachedLogger::new(LogLevel::Trace, None, 100);
        logger.log(LogLevel::Info, None, None, "first");
        logger.log(LogLevel::Info, None, None, "second");

        let batch = logger.cache().drain();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].message, "first");
        assert_eq!(batch[1].message, "second");
        assert!(logger.cache().is_empty());
    }

    #[test]
    fn level_filter_drops_before_buffering() {
        let logger = CachedLogger::new(LogLevel::Warn, None, 100);
        logger.log(LogLevel::Debug, None, None, "dropped");
        logger.log(LogLevel::Error, None, None, "kept");

        let batch = logger.cache().drain();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].message, "kept");
    }

    #[test]
    fn composed_message_carries_source_and_correlation() {
        let logger = CachedLogger::new(LogLevel::Info, Some("billing".to_owned()), 100);
        logger.log(LogLevel::Info, Some("tx-9"), None, "charged");

        let batch = logger.cache().drain();
        assert_eq!(batch[0].source.as_deref(), Some("billing"));
        assert_eq!(batch[0].correlation_id.as_deref(), Some("tx-9"));
        assert_eq!(batch[0].level, LogLevel::Info);
    }

    #[test]
    fn set_level_applies_to_later_messages() {
        let logger = CachedLogger::new(LogLevel::Info, None, 100);
        logger.log(LogLevel::Debug, None, None, "dropped");
        logger.set_level(LogLevel::Debug);
        logger.log(LogLevel::Debug, None, None, "kept");
        assert_eq!(logger.cache().len(), 1);
    }
}
