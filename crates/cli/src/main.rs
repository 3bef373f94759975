// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! keel-wal - inspect, verify and repair keel write-ahead logs

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{dump, repair, verify};
use keel_wal::ReplayConfig;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "keel-wal",
    version,
    about = "Inspect, verify and repair keel write-ahead logs"
)]
struct Cli {
    /// TOML file with replay settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Sector size used to detect torn writes (overrides the config file)
    #[arg(long, global = true)]
    sector_size: Option<u64>,

    /// Log decoder activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every record in the log
    Dump(dump::DumpArgs),
    /// Decode the whole log and report how it ends
    Verify(verify::VerifyArgs),
    /// Truncate a torn tail off the newest segment
    Repair(repair::RepairArgs),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => ReplayConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ReplayConfig::default(),
    };
    if let Some(sector_size) = cli.sector_size {
        anyhow::ensure!(sector_size > 0, "--sector-size must be positive");
        config.sector_size = sector_size;
    }
    tracing::debug!(?config, "replay config");

    let tail = match cli.command {
        Commands::Dump(args) => dump::dump(args, &config)?,
        Commands::Verify(args) => verify::verify(args, &config)?,
        Commands::Repair(args) => repair::repair(args, &config)?,
    };
    Ok(commands::exit_code(tail))
}

/// Logs go to stderr so stdout stays parseable
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
