// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream assembly: a writer wired between handler and sender channels

use crate::error::WriterError;
use crate::state::WriterState;
use crate::writer::{Writer, WriterConfig, WriterSummary};
use spool_core::{Record, Settings, BUFFER_SIZE};
use spool_storage::{FileStore, LogStore, StoreError};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// A running writer and the channel ends around it.
///
/// Dropping `inbound` (and every clone of it) starts the writer's drain;
/// `forwarded` yields `None` once the writer has closed it.
pub struct Stream {
    /// Handler side: records to route
    pub inbound: mpsc::Sender<Record>,
    /// Sender side: records to transmit
    pub forwarded: mpsc::Receiver<Record>,
    /// Writer lifecycle
    pub state: watch::Receiver<WriterState>,
    /// Completes after drain
    pub handle: JoinHandle<Result<WriterSummary, WriterError>>,
}

impl Stream {
    /// Start a writer persisting to `settings.sync_file`
    pub fn start(settings: Settings, config: WriterConfig) -> Self {
        Self::start_with(settings, config, FileStore::open)
    }

    /// Start a writer with a custom store opener
    pub fn start_with<S, F>(settings: Settings, config: WriterConfig, open: F) -> Self
    where
        S: LogStore,
        F: FnOnce(&Path) -> Result<S, StoreError> + Send + 'static,
    {
        let (inbound, inbound_rx) = mpsc::channel(BUFFER_SIZE);
        let (fwd_tx, forwarded) = mpsc::channel(BUFFER_SIZE);

        let writer = Writer::with_store(Arc::new(settings), fwd_tx, open).with_config(config);
        let state = writer.subscribe();
        let handle = tokio::spawn(writer.run(inbound_rx));

        Self {
            inbound,
            forwarded,
            state,
            handle,
        }
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
