// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Append-only log store for persisted records
//!
//! ```text
//! Record bytes → FileStore::write → frame → disk
//!                                            ↓
//!                          StoreReader → frames → records
//! ```

#[cfg(any(test, feature = "test-support"))]
mod fake;
pub mod frame;
pub mod header;
pub mod reader;
pub mod store;

pub use frame::{encode_frame, read_frame, FrameError};
pub use header::{HeaderError, StoreHeader};
pub use reader::{
    FrameIter, RecordIter, StoreCorruption, StoreReadError, StoreReader, StoreValidation,
};
pub use store::{FileStore, LogStore, StoreError};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeStore, StoreCall};
