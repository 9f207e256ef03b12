// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! spool-core: Record model and settings for the spool pipeline
//!
//! This crate provides:
//! - The `Record` sum type and its control flags
//! - Read-only run `Settings` with TOML and environment loading
//! - Channel capacities shared by the pipeline stages

pub mod id;
pub mod limits;
pub mod record;
pub mod settings;

pub use id::{IdGen, SequentialIdGen, ShortIdGen};
pub use limits::{BUFFER_SIZE, STORE_BUFFER_SIZE};
pub use record::{
    AlertRecord, ArtifactRecord, ConfigRecord, Control, ExitRecord, FileItem, FilePolicy,
    FilesRecord, HistoryRecord, Item, MetricRecord, OutputRecord, OutputStream, Record,
    RecordKind, RecordType, Request, RunRecord, StatsRecord, SummaryRecord,
};
pub use settings::{Settings, SettingsError};
