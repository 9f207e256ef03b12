// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed preamble written once at the start of every store file
//!
//! Layout (7 bytes): 4-byte ident, little-endian u16 magic, u8 version.

use std::io::{self, Read};
use thiserror::Error;

pub const HEADER_IDENT: [u8; 4] = *b":SPL";
pub const HEADER_MAGIC: u16 = 0xBEE1;
pub const HEADER_VERSION: u8 = 1;
pub const HEADER_LEN: usize = 7;

/// Errors from parsing a store header
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("header truncated: got {0} of 7 bytes")]
    Truncated(usize),
    #[error("not a spool store (ident {0:?})")]
    BadIdent([u8; 4]),
    #[error("bad header magic {0:#06x}")]
    BadMagic(u16),
    #[error("unsupported store version {0}")]
    UnsupportedVersion(u8),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Store file header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreHeader {
    pub ident: [u8; 4],
    pub magic: u16,
    pub version: u8,
}

impl Default for StoreHeader {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreHeader {
    /// Header for the current format version
    pub fn new() -> Self {
        Self {
            ident: HEADER_IDENT,
            magic: HEADER_MAGIC,
            version: HEADER_VERSION,
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut buf = [0u8; HEADER_LEN];
        buf[..4].copy_from_slice(&self.ident);
        buf[4..6].copy_from_slice(&self.magic.to_le_bytes());
        buf[6] = self.version;
        buf
    }

    /// Parse and validate a header
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < HEADER_LEN {
            return Err(HeaderError::Truncated(bytes.len()));
        }

        let mut ident = [0u8; 4];
        ident.copy_from_slice(&bytes[..4]);
        if ident != HEADER_IDENT {
            return Err(HeaderError::BadIdent(ident));
        }

        let magic = u16::from_le_bytes([bytes[4], bytes[5]]);
        if magic != HEADER_MAGIC {
            return Err(HeaderError::BadMagic(magic));
        }

        let version = bytes[6];
        if version != HEADER_VERSION {
            return Err(HeaderError::UnsupportedVersion(version));
        }

        Ok(Self {
            ident,
            magic,
            version,
        })
    }

    /// Read and validate a header from the start of a stream
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, HeaderError> {
        let mut buf = [0u8; HEADER_LEN];
        let mut filled = 0;
        while filled < HEADER_LEN {
            match reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Self::from_bytes(&buf[..filled])
    }
}

#[cfg(test)]
#[path = "header_tests.rs"]
mod tests;
