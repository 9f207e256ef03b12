// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the writer

use spool_storage::StoreError;
use thiserror::Error;
use tokio::task::JoinError;

/// Errors that end a writer run.
///
/// Per-record failures never surface here; they are logged and skipped.
#[derive(Debug, Error)]
pub enum WriterError {
    #[error("no sync_file configured for the store")]
    MissingSyncFile,
    #[error("error creating store: {0}")]
    StoreOpen(#[source] StoreError),
    #[error("persistence worker failed: {0}")]
    Worker(#[source] JoinError),
}
