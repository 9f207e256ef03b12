// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Store reader for replay and sync tools
//!
//! Reads the header once, then iterates frames in file order. Iteration
//! stops after the first corrupted or truncated frame.

use crate::frame::{read_frame, FrameError};
use crate::header::{HeaderError, StoreHeader};
use spool_core::Record;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when reading a store
#[derive(Debug, Error)]
pub enum StoreReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid header: {0}")]
    Header(#[from] HeaderError),
    #[error("bad frame {index}: {source}")]
    Frame {
        index: u64,
        #[source]
        source: FrameError,
    },
    #[error("undecodable record in frame {index}: {source}")]
    Decode {
        index: u64,
        #[source]
        source: serde_json::Error,
    },
}

/// Reader over a store file
pub struct StoreReader {
    path: PathBuf,
    header: StoreHeader,
}

impl StoreReader {
    /// Open a store and validate its header
    pub fn open(path: &Path) -> Result<Self, StoreReadError> {
        let mut file = File::open(path)?;
        let header = StoreHeader::read_from(&mut file)?;
        Ok(Self {
            path: path.to_path_buf(),
            header,
        })
    }

    pub fn header(&self) -> StoreHeader {
        self.header
    }

    /// Get the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterate raw frame payloads in file order
    pub fn frames(&self) -> Result<FrameIter, StoreReadError> {
        let mut reader = BufReader::new(File::open(&self.path)?);
        StoreHeader::read_from(&mut reader)?;
        Ok(FrameIter {
            reader,
            index: 0,
            done: false,
        })
    }

    /// Iterate decoded records in file order
    pub fn records(&self) -> Result<RecordIter, StoreReadError> {
        Ok(RecordIter {
            frames: self.frames()?,
        })
    }

    /// Scan the whole store and report what is readable
    pub fn validate(&self) -> Result<StoreValidation, StoreReadError> {
        let mut valid_frames = 0u64;
        let mut last_num = None;
        let mut corruption = None;

        for record in self.records()? {
            match record {
                Ok(record) => {
                    valid_frames += 1;
                    last_num = Some(record.num);
                }
                Err(StoreReadError::Frame { index, source }) => {
                    corruption = Some(StoreCorruption {
                        frame: index,
                        reason: source.to_string(),
                    });
                    break;
                }
                Err(StoreReadError::Decode { index, source }) => {
                    corruption = Some(StoreCorruption {
                        frame: index,
                        reason: format!("undecodable record: {}", source),
                    });
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        Ok(StoreValidation {
            header: self.header,
            valid_frames,
            last_num,
            corruption,
        })
    }
}

/// Iterator over frame payloads
pub struct FrameIter {
    reader: BufReader<File>,
    index: u64,
    done: bool,
}

impl Iterator for FrameIter {
    type Item = Result<Vec<u8>, StoreReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let index = self.index;
        match read_frame(&mut self.reader) {
            Ok(Some(payload)) => {
                self.index += 1;
                Some(Ok(payload))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(source) => {
                self.done = true;
                Some(Err(StoreReadError::Frame { index, source }))
            }
        }
    }
}

/// Iterator over decoded records
pub struct RecordIter {
    frames: FrameIter,
}

impl Iterator for RecordIter {
    type Item = Result<Record, StoreReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.frames.index;
        let payload = match self.frames.next()? {
            Ok(payload) => payload,
            Err(e) => return Some(Err(e)),
        };

        Some(Record::decode(&payload).map_err(|source| StoreReadError::Decode { index, source }))
    }
}

/// Validation result for a store file
#[derive(Debug)]
pub struct StoreValidation {
    pub header: StoreHeader,
    pub valid_frames: u64,
    pub last_num: Option<u64>,
    pub corruption: Option<StoreCorruption>,
}

/// Information about the first unreadable frame
#[derive(Debug)]
pub struct StoreCorruption {
    pub frame: u64,
    pub reason: String,
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
