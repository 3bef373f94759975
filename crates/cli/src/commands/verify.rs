// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `keel-wal verify` - decode the whole log and report how it ends

use crate::commands::open_segments;
use crate::output::{self, OutputFormat, VerifySummary};
use anyhow::Result;
use clap::Args;
use keel_wal::{replay, ReplayConfig, TailStatus};
use std::path::PathBuf;

#[derive(Args)]
pub struct VerifyArgs {
    /// Output format for the summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Segment files, oldest first
    #[arg(required = true)]
    pub segments: Vec<PathBuf>,
}

pub fn verify(args: VerifyArgs, config: &ReplayConfig) -> Result<TailStatus> {
    let files = open_segments(&args.segments)?;
    let outcome = replay(files.iter(), config)?;
    output::print(&VerifySummary::from(&outcome), args.format);
    Ok(outcome.tail)
}
