// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `keel-wal repair` - cut a torn tail off the newest segment

use anyhow::Result;
use clap::Args;
use keel_wal::{repair_tail, replay_files, ReplayConfig, TailStatus};
use std::path::PathBuf;

#[derive(Args)]
pub struct RepairArgs {
    /// Suffix for the file that keeps the removed bytes
    #[arg(long)]
    pub suffix: Option<String>,

    /// Segment files, oldest first
    #[arg(required = true)]
    pub segments: Vec<PathBuf>,
}

/// A repaired log exits cleanly; only fatal corruption fails
pub fn repair(args: RepairArgs, config: &ReplayConfig) -> Result<TailStatus> {
    let mut config = config.clone();
    if let Some(suffix) = args.suffix {
        config.broken_suffix = suffix;
    }
    // truncation happens below so the removed byte count can be reported
    config.repair_torn_tail = false;

    let outcome = replay_files(&args.segments, &config)?;
    let (TailStatus::Torn { offset }, Some(tail)) = (outcome.tail, args.segments.last()) else {
        println!("log is clean, nothing to repair");
        return Ok(TailStatus::Clean);
    };

    let removed = repair_tail(tail, offset, &config)?;
    println!(
        "truncated {} at offset {} ({} bytes moved to {}{})",
        tail.display(),
        offset,
        removed,
        tail.display(),
        config.broken_suffix
    );
    Ok(TailStatus::Clean)
}
