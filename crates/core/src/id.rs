// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run identifier generation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Length of generated run identifiers
pub const RUN_ID_LEN: usize = 8;

/// Generates run identifiers
pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// Short lowercase identifiers cut from a v4 UUID
#[derive(Clone, Default)]
pub struct ShortIdGen;

impl IdGen for ShortIdGen {
    fn next(&self) -> String {
        let mut id = uuid::Uuid::new_v4().simple().to_string();
        id.truncate(RUN_ID_LEN);
        id
    }
}

/// Sequential ID generator for testing
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: String,
    counter: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for SequentialIdGen {
    fn default() -> Self {
        Self::new("run")
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}-{}", self.prefix, n)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
