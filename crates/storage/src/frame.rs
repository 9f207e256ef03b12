// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record framing with checksum verification
//!
//! Each frame is a little-endian u32 payload length, a little-endian u32
//! CRC32 of the payload, then the payload bytes. A frame cut short by a
//! crash is reported as truncated; a flipped bit as a checksum mismatch.

use std::io::{self, Read};
use thiserror::Error;

/// Bytes preceding every payload
pub const FRAME_HEADER_LEN: usize = 8;

/// Largest payload a single frame may carry
pub const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Errors from encoding or decoding frames
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("frame payload of {len} bytes exceeds the 64 MiB limit")]
    TooLarge { len: usize },
    #[error("frame truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { stored: u32, computed: u32 },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Build the on-disk frame for a payload
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, FrameError> {
    if payload.len() > MAX_FRAME_LEN {
        return Err(FrameError::TooLarge { len: payload.len() });
    }

    let mut frame = Vec::with_capacity(FRAME_HEADER_LEN + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(&crc32fast::hash(payload).to_le_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

/// Read the next frame's payload.
///
/// Returns `Ok(None)` at a clean end of stream (no partial frame header).
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>, FrameError> {
    let mut header = [0u8; FRAME_HEADER_LEN];
    let got = read_full(reader, &mut header)?;
    if got == 0 {
        return Ok(None);
    }
    if got < FRAME_HEADER_LEN {
        return Err(FrameError::Truncated {
            expected: FRAME_HEADER_LEN,
            actual: got,
        });
    }

    let len = u32::from_le_bytes([header[0], header[1], header[2], header[3]]) as usize;
    let stored = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if len > MAX_FRAME_LEN {
        return Err(FrameError::TooLarge { len });
    }

    let mut payload = vec![0u8; len];
    let got = read_full(reader, &mut payload)?;
    if got < len {
        return Err(FrameError::Truncated {
            expected: len,
            actual: got,
        });
    }

    let computed = crc32fast::hash(&payload);
    if computed != stored {
        return Err(FrameError::ChecksumMismatch { stored, computed });
    }

    Ok(Some(payload))
}

/// Fill `buf` as far as the stream allows, returning the bytes read
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
