use std::sync::Arc;
use tokio::sync::mpsc;

use crate::{
    db::AnalyticsStore,
    error::AppResult,
    models::{Movie, NewSearchRecord, SearchRecord},
};

/// Message for asynchronous analytics writes
struct SearchEvent {
    term: String,
    top_result: Movie,
}

/// Records which terms users search for and reads back the most popular ones
#[derive(Clone)]
pub struct AnalyticsRecorder {
    store: Arc<dyn AnalyticsStore>,
    poster_base_url: Arc<str>,
    write_tx: mpsc::UnboundedSender<SearchEvent>,
}

/// Handle for gracefully shutting down the analytics writer
pub struct RecorderHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: tokio::task::JoinHandle<()>,
}

impl RecorderHandle {
    /// Initiates a graceful shutdown of the analytics writer
    ///
    /// Sends a shutdown signal to the writer task and waits for it to flush
    /// all queued writes to the store.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        tracing::info!("Analytics writer shutdown signal sent");
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Analytics writer task join error");
        }
    }
}

impl AnalyticsRecorder {
    /// Creates a new recorder with a background write task
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(store: Arc<dyn AnalyticsStore>, poster_base_url: &str) -> (Self, RecorderHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let recorder = Self {
            store,
            poster_base_url: Arc::from(poster_base_url),
            write_tx,
        };

        let worker = recorder.clone();
        let task = tokio::spawn(async move {
            worker.writer_task(write_rx, shutdown_rx).await;
        });

        (recorder, RecorderHandle { shutdown_tx, task })
    }

    /// Background task that processes queued search events
    ///
    /// On shutdown signal, drains whatever is already queued before exiting.
    /// Dropping the handle without calling `shutdown` leaves the writer running.
    async fn writer_task(
        self,
        mut write_rx: mpsc::UnboundedReceiver<SearchEvent>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!(store = self.store.name(), "Analytics writer task started");

        loop {
            tokio::select! {
                Some(event) = write_rx.recv() => {
                    self.record_search(&event.term, &event.top_result).await;
                }
                Some(()) = shutdown_rx.recv() => {
                    tracing::info!("Analytics writer shutting down, flushing queued writes");

                    while let Ok(event) = write_rx.try_recv() {
                        self.record_search(&event.term, &event.top_result).await;
                    }

                    tracing::info!("Analytics writer task stopped");
                    break;
                }
            }
        }
    }

    /// Increments the record for `term`, creating it on first occurrence
    ///
    /// Best-effort: store failures are logged and discarded.
    pub async fn record_search(&self, term: &str, top_result: &Movie) {
        match self.upsert(term, top_result).await {
            Ok(count) => tracing::debug!(term = %term, count, "Search recorded"),
            Err(e) => tracing::error!(error = %e, term = %term, "Failed to record search"),
        }
    }

    /// Queues a search for the background writer and returns immediately
    pub fn record_in_background(&self, term: &str, top_result: &Movie) {
        let event = SearchEvent {
            term: term.to_string(),
            top_result: top_result.clone(),
        };

        if let Err(e) = self.write_tx.send(event) {
            tracing::error!(error = %e, "Failed to queue search event");
        }
    }

    /// Most searched terms, highest count first
    pub async fn trending(&self, limit: usize) -> AppResult<Vec<SearchRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.store.top_by_count(limit).await
    }

    async fn upsert(&self, term: &str, top_result: &Movie) -> AppResult<u64> {
        if let Some(existing) = self.store.find_by_term(term).await? {
            return self.store.increment(&existing).await;
        }

        let poster_url = top_result
            .poster_url(&self.poster_base_url)
            .unwrap_or_default();
        let created = self
            .store
            .create(NewSearchRecord::first(term, top_result.id, poster_url))
            .await?;
        Ok(created.count)
    }
}
