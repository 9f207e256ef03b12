// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `spool verify <file>` - Check a store for truncation or corruption

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use spool_storage::{StoreReader, StoreValidation};
use std::fmt;
use std::path::PathBuf;

#[derive(Args)]
pub struct VerifyArgs {
    /// Store file written by `spool run`
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct VerifyReport {
    path: String,
    version: u8,
    frames: u64,
    last_num: Option<u64>,
    corruption: Option<Corruption>,
}

#[derive(Debug, Serialize)]
struct Corruption {
    frame: u64,
    reason: String,
}

impl VerifyReport {
    fn new(path: &str, validation: StoreValidation) -> Self {
        Self {
            path: path.to_string(),
            version: validation.header.version,
            frames: validation.valid_frames,
            last_num: validation.last_num,
            corruption: validation.corruption.map(|c| Corruption {
                frame: c.frame,
                reason: c.reason,
            }),
        }
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.path)?;
        writeln!(f, "  version:  {}", self.version)?;
        writeln!(f, "  frames:   {}", self.frames)?;
        match self.last_num {
            Some(num) => writeln!(f, "  last num: {}", num)?,
            None => writeln!(f, "  last num: -")?,
        }
        match &self.corruption {
            Some(c) => writeln!(f, "  corrupt at frame {}: {}", c.frame, c.reason),
            None => writeln!(f, "  ok"),
        }
    }
}

pub fn verify(args: VerifyArgs) -> Result<()> {
    let path = args.file.display().to_string();
    let validation = StoreReader::open(&args.file)
        .and_then(|reader| reader.validate())
        .with_context(|| format!("failed to read {}", path))?;

    let report = VerifyReport::new(&path, validation);
    output::print(&report, args.format);

    if let Some(c) = &report.corruption {
        anyhow::bail!("{} is corrupt at frame {}", path, c.frame);
    }
    Ok(())
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
