// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Append-only record store
//!
//! A store is a single-writer sequential file: a header written once at
//! open, then one frame per `write` call, in call order. It makes no
//! buffering or batching decisions; queueing belongs to the caller.

use crate::frame::{encode_frame, FrameError};
use crate::header::StoreHeader;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store at {path} is held by another writer")]
    Locked {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write store header: {0}")]
    Header(#[source] io::Error),
    #[error("failed to append frame: {0}")]
    Write(#[source] io::Error),
    #[error("store is unusable: partial frame could not be rolled back ({rollback})")]
    RollbackFailed {
        #[source]
        source: io::Error,
        rollback: io::Error,
    },
    #[error("store is unusable after an earlier failed rollback")]
    Unusable,
    #[error("failed to encode frame: {0}")]
    Frame(#[from] FrameError),
    #[error("failed to close store: {0}")]
    Close(#[source] io::Error),
}

/// Sequential sink for serialized records.
///
/// Implementations are owned by exactly one task for their whole life.
/// `close` consumes the store, so it runs at most once.
pub trait LogStore: Send + 'static {
    /// Append one serialized record as a frame
    fn write(&mut self, data: &[u8]) -> Result<(), StoreError>;

    /// Flush and release the backing resource
    fn close(self) -> Result<(), StoreError>
    where
        Self: Sized;
}

/// File-backed store holding an exclusive advisory lock on its path
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    file: File,
    frames_written: u64,
    bytes_written: u64,
    unusable: bool,
}

impl FileStore {
    /// Create (or truncate) the store at `path` and write the header.
    ///
    /// Parent directories are created as needed. Fails if another writer
    /// holds the lock on the same path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let open_err = |source: io::Error| StoreError::Open {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(open_err)?;
        }

        // Not truncated until the lock is ours, so a live store is never clobbered
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)
            .map_err(open_err)?;

        FileExt::try_lock_exclusive(&file).map_err(|source| StoreError::Locked {
            path: path.to_path_buf(),
            source,
        })?;

        file.set_len(0).map_err(StoreError::Header)?;
        let header = StoreHeader::new().to_bytes();
        file.write_all(&header).map_err(StoreError::Header)?;

        tracing::debug!(path = %path.display(), "store opened");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            frames_written: 0,
            bytes_written: header.len() as u64,
            unusable: false,
        })
    }

    /// Get the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames appended since open
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Bytes written since open, header included
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl LogStore for FileStore {
    fn write(&mut self, data: &[u8]) -> Result<(), StoreError> {
        if self.unusable {
            return Err(StoreError::Unusable);
        }

        let frame = encode_frame(data)?;
        if let Err(e) = append_frame(&mut self.file, &frame, self.bytes_written) {
            if matches!(e, StoreError::RollbackFailed { .. }) {
                tracing::error!(path = %self.path.display(), error = %e, "store rollback failed");
                self.unusable = true;
            }
            return Err(e);
        }
        self.frames_written += 1;
        self.bytes_written += frame.len() as u64;
        Ok(())
    }

    fn close(mut self) -> Result<(), StoreError> {
        self.file.flush().map_err(StoreError::Close)?;
        self.file.sync_all().map_err(StoreError::Close)?;
        FileExt::unlock(&self.file).map_err(StoreError::Close)?;
        tracing::debug!(
            path = %self.path.display(),
            frames = self.frames_written,
            bytes = self.bytes_written,
            "store closed"
        );
        Ok(())
    }
}

/// Backing file operations needed to append frames and undo partial ones
trait Sink: Write + Seek {
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl Sink for File {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Append `frame` at offset `end`.
///
/// A write that fails partway is cut back to `end` so the next frame
/// starts on a frame boundary.
fn append_frame<S: Sink>(sink: &mut S, frame: &[u8], end: u64) -> Result<(), StoreError> {
    // One write_all per frame keeps frames contiguous
    let Err(source) = sink.write_all(frame) else {
        return Ok(());
    };

    let rollback = sink
        .truncate(end)
        .and_then(|()| sink.seek(SeekFrom::Start(end)).map(|_| ()));
    match rollback {
        Ok(()) => Err(StoreError::Write(source)),
        Err(rollback) => Err(StoreError::RollbackFailed { source, rollback }),
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
