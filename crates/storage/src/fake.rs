// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::store::{LogStore, StoreError};
use spool_core::Record;
use std::collections::HashSet;
use std::io;
use std::sync::{Arc, Mutex};

/// Recorded store call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Write { len: usize },
    Close,
}

#[derive(Default)]
struct FakeStoreState {
    frames: Vec<Vec<u8>>,
    calls: Vec<StoreCall>,
    fail_writes: HashSet<usize>,
    fail_close: bool,
    closed: bool,
}

/// In-memory store; clones share state so tests can inspect what the
/// owning task wrote.
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Arc<Mutex<FakeStoreState>>,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the `n`th write call (0-based) fail
    pub fn fail_write(&self, n: usize) {
        self.lock().fail_writes.insert(n);
    }

    /// Make `close` fail
    pub fn fail_close(&self) {
        self.lock().fail_close = true;
    }

    /// Frames successfully written
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.lock().frames.clone()
    }

    /// Successfully written frames decoded as records
    pub fn records(&self) -> Vec<Record> {
        self.frames()
            .iter()
            .filter_map(|f| Record::decode(f).ok())
            .collect()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeStoreState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl LogStore for FakeStore {
    fn write(&mut self, data: &[u8]) -> Result<(), StoreError> {
        let mut state = self.lock();
        let call_index = state
            .calls
            .iter()
            .filter(|c| matches!(c, StoreCall::Write { .. }))
            .count();
        state.calls.push(StoreCall::Write { len: data.len() });

        if state.fail_writes.contains(&call_index) {
            return Err(StoreError::Write(io::Error::other("injected write failure")));
        }
        state.frames.push(data.to_vec());
        Ok(())
    }

    fn close(self) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Close);
        state.closed = true;

        if state.fail_close {
            return Err(StoreError::Close(io::Error::other("injected close failure")));
        }
        Ok(())
    }
}
