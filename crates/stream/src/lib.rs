// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Record writer for the spool pipeline
//!
//! ```text
//! handler → inbound → Writer ─┬→ persistence worker → store → disk
//!                             └→ forwarded → sender
//! ```

mod error;
mod persist;
mod state;
mod stream;
mod writer;

pub use error::WriterError;
pub use persist::PersistSummary;
pub use state::WriterState;
pub use stream::Stream;
pub use writer::{StoreOpener, Writer, WriterConfig, WriterSummary};
