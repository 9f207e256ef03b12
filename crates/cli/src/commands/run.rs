// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `spool run` - Route newline-delimited JSON records through a writer
//!
//! Records read from stdin play the handler's part; forwarded records are
//! printed to stdout as JSON lines in place of a network sender.

use anyhow::{Context, Result};
use clap::Args;
use spool_core::{Record, Settings, ShortIdGen};
use spool_stream::{Stream, WriterConfig, WriterSummary};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

#[derive(Args)]
pub struct RunArgs {
    /// Settings file (TOML)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Path of the durable record log
    #[arg(long)]
    pub sync_file: Option<PathBuf>,

    /// Forward only records marked always_send
    #[arg(long)]
    pub offline: bool,

    /// Replay an existing log: no store is created
    #[arg(long)]
    pub sync: bool,

    /// Run identifier (generated when absent)
    #[arg(long)]
    pub run_id: Option<String>,

    /// Capacity of the persistence queue
    #[arg(long)]
    pub store_buffer: Option<usize>,
}

impl RunArgs {
    fn settings(&self) -> Result<Settings> {
        self.settings_with_env(|var| std::env::var(var).ok())
    }

    /// Settings file, then environment, then flags
    fn settings_with_env<F>(&self, lookup: F) -> Result<Settings>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match &self.settings {
            Some(path) => Settings::load(path)
                .with_context(|| format!("failed to load settings from {}", path.display()))?,
            None => Settings::default(),
        };
        let mut settings = base.apply_env_from(lookup)?;

        if let Some(path) = &self.sync_file {
            settings.sync_file = Some(path.clone());
        }
        if let Some(run_id) = &self.run_id {
            settings.run_id = Some(run_id.clone());
        }
        settings.x_offline |= self.offline;
        settings.x_sync |= self.sync;

        Ok(settings.ensure_run_id(&ShortIdGen))
    }

    fn config(&self) -> WriterConfig {
        let mut config = WriterConfig::default();
        if let Some(store_buffer) = self.store_buffer {
            config.store_buffer = store_buffer;
        }
        config
    }
}

/// Counters for the stdin side of a run
#[derive(Debug, Default)]
struct FeedStats {
    lines: u64,
    skipped: u64,
}

pub async fn run(args: RunArgs) -> Result<()> {
    let settings = args.settings()?;
    let run_id = settings.run_id().to_string();
    tracing::info!(run_id = %run_id, "starting run");

    let Stream {
        inbound,
        forwarded,
        handle,
        ..
    } = Stream::start(settings, args.config());

    let printer = tokio::spawn(print_forwarded(forwarded));
    let stats = feed(inbound).await?;

    let result = handle.await.context("writer task failed")?;
    if let Err(e) = printer.await.context("output task failed")? {
        tracing::warn!(error = %e, "failed to print forwarded records");
    }

    let summary = result.with_context(|| format!("run {} failed", run_id))?;
    eprint!("{}", render_summary(&run_id, &stats, &summary));
    Ok(())
}

/// Read stdin until EOF, interrupt, or the writer going away
async fn feed(inbound: mpsc::Sender<Record>) -> Result<FeedStats> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stats = FeedStats::default();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = inbound.closed() => break,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, draining writer");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };
        stats.lines += 1;
        if line.trim().is_empty() {
            continue;
        }

        match Record::decode(line.as_bytes()) {
            Ok(record) => {
                if inbound.send(record).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(line = stats.lines, error = %e, "skipping unparseable record");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

async fn print_forwarded(mut forwarded: mpsc::Receiver<Record>) -> Result<u64> {
    let mut stdout = tokio::io::stdout();
    let mut count = 0;

    while let Some(record) = forwarded.recv().await {
        let mut line = record.encode()?;
        line.push(b'\n');
        stdout.write_all(&line).await?;
        count += 1;
    }

    stdout.flush().await?;
    Ok(count)
}

fn render_summary(run_id: &str, stats: &FeedStats, summary: &WriterSummary) -> String {
    let mut out = format!("run {}\n", run_id);
    out.push_str(&format!("  received:    {}\n", summary.received));
    out.push_str(&format!("  forwarded:   {}\n", summary.forwarded));
    if summary.unforwarded > 0 {
        out.push_str(&format!("  unforwarded: {}\n", summary.unforwarded));
    }
    out.push_str(&format!("  dropped:     {}\n", summary.dropped_malformed));
    if stats.skipped > 0 {
        out.push_str(&format!("  unparseable: {}\n", stats.skipped));
    }
    match &summary.persist {
        Some(persist) => {
            out.push_str(&format!("  stored:      {}\n", persist.written));
            if persist.failed > 0 {
                out.push_str(&format!("  failed:      {}\n", persist.failed));
            }
            if persist.close_failed {
                out.push_str("  store close failed\n");
            }
        }
        None => out.push_str("  stored:      - (no store)\n"),
    }
    out
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
