//! The buffering and delivery engine behind the logging API.
//!
//! [`LoggerClient`] turns synchronous, fire-and-forget log calls into batched
//! background deliveries. Records accumulate in a FIFO queue; a flush is
//! attempted when the queue reaches the configured batch size, when the
//! recurring flush timer fires, when the process receives a shutdown signal,
//! or on an explicit [`LoggerClient::flush`] call.
//!
//! # Failure Containment
//!
//! Nothing in the public surface ever raises for delivery-related causes.
//! A flush attempt treats its drained snapshot as all-or-nothing: if any
//! record in it fails, the whole snapshot is requeued at the front of the
//! queue (bounded at twice the batch size) and retried by a later flush.
//! A snapshot that cannot be requeued within the bound is dropped with a
//! diagnostic. This can resend records whose siblings failed, so the
//! ingestion side may observe duplicates after a partial failure.
//!
//! # Lifecycle
//!
//! A client is either enabled or permanently disabled, decided once at
//! construction: missing required configuration logs a diagnostic and turns
//! every subsequent call into a no-op. [`LoggerClient::shutdown`] is
//! terminal; it stops the timer and signal hook and fires one best-effort
//! final flush.

use futures::future::join_all;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::flusher::Flusher;
use crate::queue::RecordQueue;
use crate::record::{ErrorDetail, Fields, LogLevel, LogRecord};

/// Client that buffers log records and ships them to the ingestion API.
///
/// Cheap to clone; clones share the same queue and configuration. Must be
/// constructed inside a tokio runtime, which hosts the background flush
/// timer and deliveries.
#[derive(Debug, Clone)]
pub struct LoggerClient {
    config: Arc<Config>,
    queue: Arc<Mutex<RecordQueue>>,
    flusher: Arc<Flusher>,
    /// Cancelled exactly once, by `shutdown()`; stops the timer and the
    /// signal hook and marks the instance inert.
    cancel_token: CancellationToken,
}

impl LoggerClient {
    /// Builds a client from the given configuration.
    ///
    /// Defaults are applied by [`Config::default`]. If `endpoint` or
    /// `api_key` is missing the client logs the configuration error and
    /// disables itself for its whole lifetime; construction itself never
    /// fails. An enabled client starts its recurring flush timer and a
    /// best-effort final flush on Ctrl-C.
    #[must_use]
    pub fn new(mut config: Config) -> Self {
        if let Err(e) = config.validate() {
            error!("LoggerClient: {e}, disabling log delivery");
            config.enabled = false;
        }

        let client = LoggerClient {
            queue: Arc::new(Mutex::new(RecordQueue::new(config.batch_size))),
            flusher: Arc::new(Flusher::new(config.endpoint.clone(), config.api_key.clone())),
            cancel_token: CancellationToken::new(),
            config: Arc::new(config),
        };

        if client.config.enabled {
            client.spawn_flush_timer();
            client.spawn_signal_hook();
        }

        client
    }

    /// Whether this instance accepts records.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled && !self.cancel_token.is_cancelled()
    }

    /// Queues a record at the given level.
    ///
    /// No-op when the client is disabled or shut down. Never blocks on
    /// network I/O: when the queue reaches the batch size the flush attempt
    /// is spawned onto the runtime, not awaited here.
    pub fn log(&self, level: LogLevel, message: impl Into<String>, data: Option<Fields>) {
        if !self.is_enabled() {
            return;
        }

        let record = LogRecord::new(
            level,
            message.into(),
            self.config.source.clone(),
            data.unwrap_or_default(),
        );

        let queued = {
            #[allow(clippy::expect_used)]
            let mut queue = self.queue.lock().expect("queue lock poisoned");
            queue.push(record)
        };

        if queued >= self.config.batch_size {
            let client = self.clone();
            tokio::spawn(async move { client.flush().await });
        }
    }

    /// Queues an info-level record.
    pub fn info(&self, message: impl Into<String>, data: Option<Fields>) {
        self.log(LogLevel::Info, message, data);
    }

    /// Queues a warn-level record.
    pub fn warn(&self, message: impl Into<String>, data: Option<Fields>) {
        self.log(LogLevel::Warn, message, data);
    }

    /// Queues a debug-level record.
    pub fn debug(&self, message: impl Into<String>, data: Option<Fields>) {
        self.log(LogLevel::Debug, message, data);
    }

    /// Queues an error-level record.
    ///
    /// Accepts a plain message or an [`ErrorDetail`] captured from an error
    /// value; a captured error's type name and source chain are merged into
    /// the record's `data` under `name` and `stack`.
    pub fn error(&self, detail: impl Into<ErrorDetail>, data: Option<Fields>) {
        let detail = detail.into();
        let mut data = data.unwrap_or_default();
        if let Some(name) = detail.name {
            data.insert("name".to_string(), serde_json::Value::String(name));
        }
        if let Some(stack) = detail.stack {
            data.insert("stack".to_string(), serde_json::Value::String(stack));
        }
        self.log(LogLevel::Error, detail.message, Some(data));
    }

    /// Delivers all currently queued records.
    ///
    /// Drains the queue in one atomic swap, dispatches one delivery per
    /// record concurrently and waits for all of them to settle. Records
    /// logged while the snapshot is in flight accumulate in the fresh queue
    /// and are untouched by this attempt, so concurrent flushes never
    /// double-send. Failures are contained: the snapshot is requeued within
    /// the bound or dropped with a diagnostic, and this method returns
    /// normally either way.
    pub async fn flush(&self) {
        if !self.config.enabled {
            return;
        }

        let snapshot = {
            #[allow(clippy::expect_used)]
            let mut queue = self.queue.lock().expect("queue lock poisoned");
            queue.drain()
        };

        if snapshot.is_empty() {
            return;
        }

        let deliveries = snapshot.iter().map(|record| self.flusher.send(record));
        let results = join_all(deliveries).await;

        let failed = results.iter().filter(|result| result.is_err()).count();
        if failed == 0 {
            debug!("Delivered {} log records", snapshot.len());
            return;
        }

        if let Some(Err(e)) = results.iter().find(|result| result.is_err()) {
            error!(
                "Failed to deliver {failed} of {} log records: {e}",
                snapshot.len()
            );
        }

        // All-or-nothing: requeue the entire snapshot ahead of newer records
        let snapshot_len = snapshot.len();
        let requeued = {
            #[allow(clippy::expect_used)]
            let mut queue = self.queue.lock().expect("queue lock poisoned");
            queue.requeue(snapshot)
        };

        if !requeued {
            warn!(
                "Dropping {snapshot_len} failed log records: requeue would exceed twice the batch size"
            );
        }
    }

    /// Releases background resources.
    ///
    /// Stops the recurring flush timer and the shutdown signal hook, then
    /// fires one final flush without awaiting it. The instance is inert
    /// afterwards: further `log()` calls are no-ops and deliveries already
    /// dispatched are not aborted.
    pub fn shutdown(&self) {
        if self.cancel_token.is_cancelled() {
            return;
        }
        self.cancel_token.cancel();

        if self.config.enabled {
            let client = self.clone();
            tokio::spawn(async move { client.flush().await });
        }
    }

    /// Copy of the currently queued records, oldest first.
    ///
    /// The returned records are a snapshot for diagnostic and test use;
    /// mutating them has no effect on the internal queue.
    #[must_use]
    pub fn queued_records(&self) -> Vec<LogRecord> {
        #[allow(clippy::expect_used)]
        let queue = self.queue.lock().expect("queue lock poisoned");
        queue.snapshot()
    }

    fn spawn_flush_timer(&self) {
        let client = self.clone();
        let token = self.cancel_token.clone();
        let period = self.config.flush_interval;

        tokio::spawn(async move {
            // First tick lands one full period after construction
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);
            loop {
                tokio::select! {
                    _ = ticker.tick() => client.flush().await,
                    () = token.cancelled() => break,
                }
            }
            debug!("LoggerClient: flush timer stopped");
        });
    }

    fn spawn_signal_hook(&self) {
        let client = self.clone();
        let token = self.cancel_token.clone();

        tokio::spawn(async move {
            tokio::select! {
                signal = tokio::signal::ctrl_c() => {
                    if signal.is_ok() {
                        // Best-effort: the outcome is not observable anywhere
                        client.flush().await;
                    }
                }
                () = token.cancelled() => {}
            }
        });
    }
}
