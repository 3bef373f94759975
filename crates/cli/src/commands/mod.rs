// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

pub mod dump;
pub mod repair;
pub mod verify;

use anyhow::{Context, Result};
use keel_wal::TailStatus;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status when the log ends in a torn write
const EXIT_TORN: u8 = 2;

/// Fatal errors leave `main` as `Err`, which exits with 1
pub fn exit_code(tail: TailStatus) -> ExitCode {
    match tail {
        TailStatus::Clean => ExitCode::SUCCESS,
        TailStatus::Torn { .. } => ExitCode::from(EXIT_TORN),
    }
}

pub fn open_segments(paths: &[PathBuf]) -> Result<Vec<File>> {
    paths
        .iter()
        .map(|path| File::open(path).with_context(|| format!("failed to open {}", path.display())))
        .collect()
}
