// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Writer: routes records between the handler, the store and the sender
//!
//! The writer consumes the inbound channel one record at a time. Data
//! records are forwarded to the sender first and then queued for the
//! persistence worker; both hand-offs complete before the next inbound
//! record is taken, so forwarding order and on-disk order both match
//! arrival order. Full channels block the writer, which in turn blocks
//! the handler.

use crate::error::WriterError;
use crate::persist::{PersistSummary, PersistWorker};
use crate::state::WriterState;
use spool_core::{Record, RecordKind, Settings, STORE_BUFFER_SIZE};
use spool_storage::{FileStore, LogStore, StoreError};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::Instrument;

/// Opens the store for a run
pub type StoreOpener<S> = Box<dyn FnOnce(&Path) -> Result<S, StoreError> + Send>;

/// Writer tuning
#[derive(Debug, Clone)]
pub struct WriterConfig {
    /// Capacity of the persistence request channel
    pub store_buffer: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            store_buffer: STORE_BUFFER_SIZE,
        }
    }
}

/// Counters reported when a writer run completes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterSummary {
    /// Records taken from the inbound channel
    pub received: u64,
    /// Records handed to the sender
    pub forwarded: u64,
    /// Records that passed the forwarding rule but found the sender gone
    pub unforwarded: u64,
    /// Records queued for persistence (equals the last sequence number)
    pub queued: u64,
    /// Records dropped for having no payload
    pub dropped_malformed: u64,
    /// Persistence worker outcome; `None` when no store was opened
    pub persist: Option<PersistSummary>,
}

/// Durability-and-forwarding stage of a run's record pipeline
pub struct Writer<S: LogStore = FileStore> {
    settings: Arc<Settings>,
    config: WriterConfig,
    fwd_tx: mpsc::Sender<Record>,
    open_store: StoreOpener<S>,
    state: watch::Sender<WriterState>,
}

impl Writer<FileStore> {
    /// Create a writer persisting to `settings.sync_file`
    pub fn new(settings: Arc<Settings>, fwd_tx: mpsc::Sender<Record>) -> Self {
        Self::with_store(settings, fwd_tx, FileStore::open)
    }
}

impl<S: LogStore> Writer<S> {
    /// Create a writer with a custom store opener
    pub fn with_store<F>(settings: Arc<Settings>, fwd_tx: mpsc::Sender<Record>, open: F) -> Self
    where
        F: FnOnce(&Path) -> Result<S, StoreError> + Send + 'static,
    {
        let (state, _) = watch::channel(WriterState::Starting);
        Self {
            settings,
            config: WriterConfig::default(),
            fwd_tx,
            open_store: Box::new(open),
            state,
        }
    }

    pub fn with_config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Watch the writer's lifecycle state
    pub fn subscribe(&self) -> watch::Receiver<WriterState> {
        self.state.subscribe()
    }

    /// Run until `inbound` is closed and all queued work has drained.
    ///
    /// Fails only if the store cannot be opened, in which case no inbound
    /// record is consumed, or if the persistence worker panics.
    pub async fn run(self, inbound: mpsc::Receiver<Record>) -> Result<WriterSummary, WriterError> {
        let span = tracing::info_span!("writer", run_id = %self.settings.run_id());
        self.run_inner(inbound).instrument(span).await
    }

    async fn run_inner(
        self,
        mut inbound: mpsc::Receiver<Record>,
    ) -> Result<WriterSummary, WriterError> {
        let Writer {
            settings,
            config,
            fwd_tx,
            open_store,
            state,
        } = self;

        tracing::info!("writer: started");

        let persist = match start_store(&settings, &config, open_store) {
            Ok(persist) => persist,
            Err(e) => {
                tracing::error!(error = %e, "writer: error creating store");
                state.send_replace(WriterState::Closed);
                return Err(e);
            }
        };

        let mut router = Router {
            settings,
            fwd_tx: Some(fwd_tx),
            persist,
            record_num: 0,
            summary: WriterSummary::default(),
        };

        state.send_replace(WriterState::Running);
        while let Some(record) = inbound.recv().await {
            router.handle_record(record).await;
        }

        state.send_replace(WriterState::Draining);
        let result = router.close().await;
        state.send_replace(WriterState::Closed);
        tracing::info!("writer: closed");
        result
    }
}

/// Open the store and launch its worker, unless this run is a replay
fn start_store<S: LogStore>(
    settings: &Settings,
    config: &WriterConfig,
    open_store: StoreOpener<S>,
) -> Result<Option<PersistWorker>, WriterError> {
    if settings.x_sync {
        // Syncing an offline run: its log already exists
        tracing::debug!("writer: not creating store while syncing");
        return Ok(None);
    }

    let path = settings.sync_file().ok_or(WriterError::MissingSyncFile)?;
    let store = open_store(path).map_err(WriterError::StoreOpen)?;
    tracing::debug!(path = %path.display(), "writer: store opened");

    Ok(Some(PersistWorker::spawn(store, config.store_buffer.max(1))))
}

/// Per-run routing state, owned by the single writer task
struct Router {
    settings: Arc<Settings>,
    fwd_tx: Option<mpsc::Sender<Record>>,
    persist: Option<PersistWorker>,
    record_num: u64,
    summary: WriterSummary,
}

impl Router {
    async fn handle_record(&mut self, mut record: Record) {
        tracing::debug!(
            record_type = record.type_name(),
            uuid = %record.uuid,
            "writer: got a record"
        );
        self.summary.received += 1;

        match record.kind() {
            RecordKind::Request => self.forward(record).await,
            RecordKind::Unset => {
                tracing::error!(
                    uuid = %record.uuid,
                    control = ?record.control,
                    "writer: dropping record with no record type"
                );
                self.summary.dropped_malformed += 1;
            }
            RecordKind::Data => {
                let forward = self.should_forward(&record);
                let persist = self.persist.is_some() && !record.control.local;

                if persist {
                    // Numbered before forwarding so both copies agree
                    self.record_num += 1;
                    record.num = self.record_num;
                } else {
                    // Only persisted records carry a sequence number
                    record.num = 0;
                }

                match (forward, persist) {
                    (true, true) => {
                        self.forward(record.clone()).await;
                        self.store(record).await;
                    }
                    (true, false) => self.forward(record).await,
                    (false, true) => self.store(record).await,
                    (false, false) => {}
                }
            }
        }
    }

    fn should_forward(&self, record: &Record) -> bool {
        !self.settings.x_offline || record.control.always_send
    }

    async fn forward(&mut self, record: Record) {
        let Some(tx) = &self.fwd_tx else {
            self.summary.unforwarded += 1;
            return;
        };

        if tx.send(record).await.is_ok() {
            self.summary.forwarded += 1;
        } else {
            tracing::warn!("writer: sender is gone, no longer forwarding records");
            self.fwd_tx = None;
            self.summary.unforwarded += 1;
        }
    }

    async fn store(&mut self, record: Record) {
        let Some(persist) = &self.persist else {
            return;
        };

        let num = record.num;
        if persist.queue(record).await.is_ok() {
            self.summary.queued += 1;
        } else {
            tracing::error!(num, "writer: persistence worker stopped, record not stored");
        }
    }

    /// Close the forwarding channel, then drain and close the store
    async fn close(mut self) -> Result<WriterSummary, WriterError> {
        drop(self.fwd_tx.take());

        if let Some(persist) = self.persist.take() {
            let outcome = persist.finish().await.map_err(|e| {
                tracing::error!(error = %e, "writer: persistence worker failed");
                WriterError::Worker(e)
            })?;
            self.summary.persist = Some(outcome);
        }

        Ok(self.summary)
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
