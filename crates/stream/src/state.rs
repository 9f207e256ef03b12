// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Writer lifecycle states

use std::fmt;

/// Lifecycle of a writer run.
///
/// `Starting → Running → Draining → Closed`; a fatal start-up error goes
/// straight from `Starting` to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterState {
    /// Opening the store and launching the persistence worker
    Starting,
    /// Consuming inbound records
    Running,
    /// Inbound closed; waiting for queued writes to finish
    Draining,
    /// All resources released
    Closed,
}

impl WriterState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, WriterState::Closed)
    }
}

impl fmt::Display for WriterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WriterState::Starting => "starting",
            WriterState::Running => "running",
            WriterState::Draining => "draining",
            WriterState::Closed => "closed",
        };
        f.write_str(name)
    }
}
