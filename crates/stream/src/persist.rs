// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background persistence worker
//!
//! The worker owns the store for its whole life. It drains a bounded
//! request channel, writing one frame per record in queue order, and
//! closes the store once the channel is closed.

use spool_core::Record;
use spool_storage::LogStore;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;
use tokio::task::JoinHandle;

/// Outcome of a persistence worker run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistSummary {
    /// Records written to the store
    pub written: u64,
    /// Records skipped after an encode or write failure
    pub failed: u64,
    /// Whether closing the store failed
    pub close_failed: bool,
}

/// Handle to a running persistence worker
pub(crate) struct PersistWorker {
    tx: mpsc::Sender<Record>,
    task: JoinHandle<PersistSummary>,
}

impl PersistWorker {
    /// Start a worker that takes ownership of `store`
    pub(crate) fn spawn<S: LogStore>(store: S, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        let span = tracing::Span::current();
        let task = tokio::task::spawn_blocking(move || {
            let _guard = span.enter();
            drain(store, rx)
        });
        Self { tx, task }
    }

    /// Hand a record to the worker, waiting while the channel is full
    pub(crate) async fn queue(&self, record: Record) -> Result<(), SendError<Record>> {
        self.tx.send(record).await
    }

    /// Close the request channel and wait for the worker to finish
    pub(crate) async fn finish(self) -> Result<PersistSummary, tokio::task::JoinError> {
        drop(self.tx);
        self.task.await
    }
}

fn drain<S: LogStore>(mut store: S, mut rx: mpsc::Receiver<Record>) -> PersistSummary {
    let mut summary = PersistSummary::default();

    while let Some(record) = rx.blocking_recv() {
        let data = match record.encode() {
            Ok(data) => data,
            Err(e) => {
                tracing::error!(num = record.num, error = %e, "writer: error marshalling record");
                summary.failed += 1;
                continue;
            }
        };

        match store.write(&data) {
            Ok(()) => summary.written += 1,
            Err(e) => {
                tracing::error!(num = record.num, error = %e, "writer: error storing record");
                summary.failed += 1;
            }
        }
    }

    if let Err(e) = store.close() {
        tracing::error!(error = %e, "writer: error closing store");
        summary.close_failed = true;
    }

    summary
}

#[cfg(test)]
#[path = "persist_tests.rs"]
mod tests;
