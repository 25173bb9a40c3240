//! The Elasticsearch logger component: lifecycle, buffering and the
//! periodic bulk flush.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

use logship_log::{
    CachedLogger, ErrorDescription, LogError, LogLevel, LogMessage, LogWriter, Logger,
    MessageCache,
};

use crate::bulk;
use crate::client::{self, EsClient};
use crate::config::ElasticsearchLoggerConfig;
use crate::connect::{ConnectionResolver, Discovery};
use crate::index;

/// Logger that dumps execution logs to an Elasticsearch service.
///
/// Messages are buffered in memory and bulk-written on a periodic interval,
/// when the cache fills, and on close. With `daily` rotation the target
/// index is recomputed per flush and created on first use.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use logship_log::Logger;
/// use logship_log_elasticsearch::{ElasticsearchLogger, ElasticsearchLoggerConfig};
///
/// # async fn run() -> Result<(), logship_log::LogError> {
/// let logger = Arc::new(ElasticsearchLogger::new(
///     ElasticsearchLoggerConfig::new()
///         .with_connection("http", "localhost", 9200)
///         .with_daily(true),
/// ));
/// logger.open().await?;
/// logger.info(Some("123"), "everything is OK");
/// logger.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct ElasticsearchLogger {
    config: ElasticsearchLoggerConfig,
    resolver: ConnectionResolver,
    cached: CachedLogger,
    /// In-flight guard: only one flush runs at a time; ticks that find it
    /// held are skipped.
    flush_lock: Arc<tokio::sync::Mutex<()>>,
    state: Mutex<Option<OpenState>>,
    flush_tx: Mutex<Option<mpsc::Sender<()>>>,
}

/// Resources held while the logger is open.
struct OpenState {
    writer: Arc<ElasticsearchWriter>,
    shutdown_tx: mpsc::Sender<()>,
    _task: tokio::task::JoinHandle<()>,
}

impl ElasticsearchLogger {
    /// Create a closed logger from the given configuration.
    pub fn new(config: ElasticsearchLoggerConfig) -> Self {
        let cached = CachedLogger::new(config.level, config.source.clone(), config.max_cache_size);
        let resolver = ConnectionResolver::new(config.connection.clone());
        Self {
            config,
            resolver,
            cached,
            flush_lock: Arc::new(tokio::sync::Mutex::new(())),
            state: Mutex::new(None),
            flush_tx: Mutex::new(None),
        }
    }

    /// Register a discovery reference used to resolve the connection.
    /// Must be called before `open`.
    pub fn set_discovery(&mut self, discovery: Arc<dyn Discovery>) {
        self.resolver.set_discovery(discovery);
    }

    /// Change the source (context) name stamped on later messages.
    pub fn set_source(&self, source: Option<String>) {
        self.cached.set_source(source);
    }

    /// The index currently written to, while open.
    pub fn active_index(&self) -> Option<String> {
        let state = self.state.lock().expect("state lock poisoned");
        state.as_ref().map(|s| s.writer.active_index())
    }

    /// Flush the pending cache now.
    ///
    /// No-op while closed or when the cache is empty. Transport failures
    /// are logged and swallowed; an application-level error reported by the
    /// bulk response is returned.
    pub async fn dump(&self) -> Result<(), LogError> {
        let writer = {
            let state = self.state.lock().expect("state lock poisoned");
            state.as_ref().map(|s| Arc::clone(&s.writer))
        };
        let Some(writer) = writer else {
            return Ok(());
        };

        let _guard = self.flush_lock.lock().await;
        let batch = self.cached.cache().drain();
        if batch.is_empty() {
            return Ok(());
        }
        writer.save(&batch).await
    }
}

#[async_trait]
impl Logger for ElasticsearchLogger {
    fn log(
        &self,
        level: LogLevel,
        correlation_id: Option<&str>,
        error: Option<ErrorDescription>,
        message: &str,
    ) {
        let full = self.cached.log(level, correlation_id, error, message);
        if full {
            // Nudge the flush task; a pending nudge already covers us.
            let tx = self.flush_tx.lock().expect("flush channel poisoned");
            if let Some(tx) = tx.as_ref() {
                let _ = tx.try_send(());
            }
        }
    }

    fn level(&self) -> LogLevel {
        self.cached.level()
    }

    fn set_level(&self, level: LogLevel) {
        self.cached.set_level(level);
    }

    async fn open(&self) -> Result<(), LogError> {
        if self.is_open() {
            return Ok(());
        }

        let uri = self.resolver.resolve().await?;
        let client = EsClient::new(
            &uri,
            self.config.timeout_ms,
            self.config.reconnect_ms,
            self.config.max_retries,
        )?;

        let writer = Arc::new(ElasticsearchWriter {
            client,
            index: self.config.index.clone(),
            daily: self.config.daily,
            index_message: self.config.index_message,
            current_index: Mutex::new(None),
        });
        writer.ensure_index(true).await;

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let (flush_tx, mut flush_rx) = mpsc::channel::<()>(1);

        let cache = self.cached.cache();
        let task_writer = Arc::clone(&writer);
        let flush_lock = Arc::clone(&self.flush_lock);
        let period = Duration::from_millis(self.config.interval_ms.max(1));

        let task = tokio::spawn(async move {
            let mut timer = tokio::time::interval(period);
            // The first tick completes immediately; skip it so we don't
            // flush at startup.
            timer.tick().await;
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => break,
                    _ = timer.tick() => {}
                    _ = flush_rx.recv() => {}
                }
                flush(&cache, &task_writer, &flush_lock).await;
            }
            tracing::debug!("elasticsearch logger flush task stopped");
        });

        *self.flush_tx.lock().expect("flush channel poisoned") = Some(flush_tx);
        *self.state.lock().expect("state lock poisoned") = Some(OpenState {
            writer,
            shutdown_tx,
            _task: task,
        });

        tracing::debug!(uri = %uri, index = %self.config.index, "elasticsearch logger opened");
        Ok(())
    }

    async fn close(&self) -> Result<(), LogError> {
        let state = self.state.lock().expect("state lock poisoned").take();
        let Some(state) = state else {
            return Ok(());
        };
        *self.flush_tx.lock().expect("flush channel poisoned") = None;

        // Final flush attempt, behind the in-flight guard so it cannot
        // overlap a timer flush; teardown happens regardless of its outcome.
        let result = {
            let _guard = self.flush_lock.lock().await;
            let batch = self.cached.cache().drain();
            if batch.is_empty() {
                Ok(())
            } else {
                state.writer.save(&batch).await
            }
        };

        let _ = state.shutdown_tx.try_send(());
        drop(state);
        self.cached.cache().clear();

        tracing::debug!("elasticsearch logger closed");
        result
    }

    fn is_open(&self) -> bool {
        self.state.lock().expect("state lock poisoned").is_some()
    }
}

/// One guarded flush: drain the cache and save the batch, skipping entirely
/// when another flush is in flight.
async fn flush(
    cache: &MessageCache,
    writer: &ElasticsearchWriter,
    flush_lock: &tokio::sync::Mutex<()>,
) {
    let Ok(_guard) = flush_lock.try_lock() else {
        return;
    };
    let batch = cache.drain();
    if batch.is_empty() {
        return;
    }
    if let Err(e) = writer.save(&batch).await {
        tracing::error!(error = %e, count = batch.len(), "failed to flush log batch");
    }
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

/// Bulk writer bound to one resolved Elasticsearch endpoint.
struct ElasticsearchWriter {
    client: EsClient,
    index: String,
    daily: bool,
    index_message: bool,
    /// Last index the create-if-needed check ran for.
    current_index: Mutex<Option<String>>,
}

impl ElasticsearchWriter {
    fn active_index(&self) -> String {
        let current = self.current_index.lock().expect("index lock poisoned");
        current
            .clone()
            .unwrap_or_else(|| index::index_name(&self.index, self.daily, Utc::now()))
    }

    /// Create the current index if this writer hasn't already done so.
    ///
    /// Creation failures other than already-exists are logged and not
    /// propagated; the observed behavior of the component is to keep going
    /// and let the bulk write surface any real problem.
    async fn ensure_index(&self, force: bool) {
        let new_index = index::index_name(&self.index, self.daily, Utc::now());
        {
            let mut current = self.current_index.lock().expect("index lock poisoned");
            if !force && current.as_deref() == Some(new_index.as_str()) {
                return;
            }
            *current = Some(new_index.clone());
        }

        match self.client.index_exists(&new_index).await {
            Ok(true) => return,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(index = %new_index, error = %e, "index existence check failed");
                return;
            }
        }

        match self
            .client
            .create_index(&new_index, &index::mapping_body(self.index_message))
            .await
        {
            Ok(()) => tracing::debug!(index = %new_index, "elasticsearch index ensured"),
            Err(e) => {
                tracing::warn!(index = %new_index, error = %e, "failed to create index");
            }
        }
    }
}

#[async_trait]
impl LogWriter for ElasticsearchWriter {
    async fn save(&self, messages: &[LogMessage]) -> Result<(), LogError> {
        if messages.is_empty() {
            return Ok(());
        }

        self.ensure_index(false).await;
        let target = self.active_index();

        let body = bulk::bulk_body(&target, messages)?;
        let resp = match self.client.bulk(&target, body).await {
            Ok(resp) => resp,
            Err(e) => {
                // Transport failures are logged, not surfaced to callers.
                tracing::error!(error = %e, count = messages.len(), "failure indexing log batch");
                return Ok(());
            }
        };

        if resp.status().is_success() {
            tracing::debug!(count = messages.len(), index = %target, "log batch indexed");
            Ok(())
        } else {
            Err(client::remote_error(resp).await)
        }
    }
}
