// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `spool dump <file>` - Print persisted records as JSON lines

use crate::output::write_json_line;
use anyhow::{Context, Result};
use clap::Args;
use spool_storage::StoreReader;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args)]
pub struct DumpArgs {
    /// Store file written by `spool run`
    pub file: PathBuf,
}

pub fn dump(args: DumpArgs) -> Result<()> {
    let reader = StoreReader::open(&args.file)
        .with_context(|| format!("failed to open {}", args.file.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for record in reader.records()? {
        let record = record.with_context(|| format!("failed to read {}", args.file.display()))?;
        write_json_line(&mut out, &record)?;
    }
    out.flush()?;
    Ok(())
}
