// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `keel-wal dump` - print every record in the log

use crate::commands::open_segments;
use crate::output::{self, OutputFormat, RecordView};
use anyhow::Result;
use clap::Args;
use keel_wal::{DecodeError, Decoder, ReplayConfig, TailStatus};
use std::path::PathBuf;

#[derive(Args)]
pub struct DumpArgs {
    /// Show record data as \xNN escapes
    #[arg(long)]
    pub hex: bool,

    /// Output format; json prints one object per record
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Segment files, oldest first
    #[arg(required = true)]
    pub segments: Vec<PathBuf>,
}

pub fn dump(args: DumpArgs, config: &ReplayConfig) -> Result<TailStatus> {
    let files = open_segments(&args.segments)?;
    let decoder = Decoder::with_config(files.iter(), config);

    for result in decoder.records() {
        match result {
            Ok(rec) => output::print(&RecordView::new(&rec, args.hex), args.format),
            Err(DecodeError::PossiblyTorn) => {
                let offset = decoder.last_offset();
                eprintln!("torn write after offset {}", offset);
                return Ok(TailStatus::Torn { offset });
            }
            Err(DecodeError::EndOfLog) => break,
            Err(DecodeError::Fatal(e)) => return Err(e.into()),
        }
    }
    Ok(TailStatus::Clean)
}
