// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Channel capacities for the record pipeline.
//!
//! Every channel between pipeline stages is bounded so a slow consumer
//! throttles its producer instead of growing a queue.

/// Baseline capacity for the handler and sender channels
pub const BUFFER_SIZE: usize = 32;

/// Capacity of the persistence request channel
pub const STORE_BUFFER_SIZE: usize = BUFFER_SIZE * 8;
