// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! spool - durable record log for run telemetry

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{dump, run, verify};

/// Environment variable holding the log filter
const LOG_ENV: &str = "SPOOL_LOG";

#[derive(Parser)]
#[command(
    name = "spool",
    version,
    about = "Spool - write, forward and inspect run telemetry records"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route records from stdin through a writer
    Run(run::RunArgs),
    /// Print the records of a store file
    Dump(dump::DumpArgs),
    /// Check a store file for truncation or corruption
    Verify(verify::VerifyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run::run(args).await,
        Commands::Dump(args) => dump::dump(args),
        Commands::Verify(args) => verify::verify(args),
    }
}

/// Log to stderr so stdout stays machine-readable
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
