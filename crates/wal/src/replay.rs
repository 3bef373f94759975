// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replay sessions and torn-tail repair
//!
//! A replay drains a [`Decoder`] and rebuilds the consensus view of the log:
//! cluster metadata, the latest hard state, and the entry list with later
//! entries overwriting any earlier ones at the same or higher index.

use crate::config::ReplayConfig;
use crate::decoder::Decoder;
use crate::error::{DecodeError, FatalError};
use crate::record::{unmarshal_entry, unmarshal_state, Entry, HardState, Record, RecordType, SchemaError};
use crate::segment::SegmentReader;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("wal: conflicting metadata found")]
    MetadataConflict,
    #[error("wal: unexpected record type {0}")]
    UnknownRecordType(i64),
    #[error("wal: entry index {got} skips past expected index {expected}")]
    IndexGap { expected: u64, got: u64 },
    #[error(transparent)]
    Decode(#[from] FatalError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// How the log ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailStatus {
    /// Every segment was read to its end
    Clean,
    /// The newest segment ends in an unfinished write starting at `offset`
    Torn { offset: u64 },
}

/// State rebuilt from a full pass over the log
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayOutcome {
    pub metadata: Option<Vec<u8>>,
    pub hard_state: HardState,
    pub entries: Vec<Entry>,
    /// Records decoded, control records included
    pub records: u64,
    /// Append position within the newest segment
    pub last_offset: u64,
    /// Chain value to seed the next encoder with
    pub last_crc: u32,
    pub tail: TailStatus,
}

/// Replay a log from readers given in creation order
pub fn replay<R: SegmentReader>(
    readers: impl IntoIterator<Item = R>,
    config: &ReplayConfig,
) -> Result<ReplayOutcome, ReplayError> {
    let decoder = Decoder::with_config(readers, config);
    replay_from(&decoder)
}

/// Drain an existing decoder, e.g. one reseeded to start partway through
pub fn replay_from<R: SegmentReader>(decoder: &Decoder<R>) -> Result<ReplayOutcome, ReplayError> {
    let mut metadata: Option<Vec<u8>> = None;
    let mut hard_state = HardState::default();
    let mut entries: Vec<Entry> = Vec::new();
    let mut records = 0u64;
    let mut rec = Record::default();

    let tail = loop {
        match decoder.decode_into(&mut rec) {
            Ok(()) => {}
            Err(DecodeError::EndOfLog) => break TailStatus::Clean,
            Err(DecodeError::PossiblyTorn) => {
                break TailStatus::Torn {
                    offset: decoder.last_offset(),
                }
            }
            Err(DecodeError::Fatal(e)) => return Err(e.into()),
        }
        records += 1;

        match rec.record_type() {
            Some(RecordType::Entry) => append_entry(&mut entries, unmarshal_entry(&rec.data)?)?,
            Some(RecordType::State) => hard_state = unmarshal_state(&rec.data)?,
            Some(RecordType::Metadata) => {
                if metadata.as_ref().is_some_and(|m| *m != rec.data) {
                    return Err(ReplayError::MetadataConflict);
                }
                metadata = Some(std::mem::take(&mut rec.data));
            }
            Some(RecordType::Crc) | Some(RecordType::Snapshot) => {}
            None => return Err(ReplayError::UnknownRecordType(rec.r#type)),
        }
    };

    let outcome = ReplayOutcome {
        metadata,
        hard_state,
        entries,
        records,
        last_offset: decoder.last_offset(),
        last_crc: decoder.last_crc(),
        tail,
    };
    tracing::debug!(
        records = outcome.records,
        entries = outcome.entries.len(),
        last_offset = outcome.last_offset,
        tail = ?outcome.tail,
        "wal replay finished"
    );
    Ok(outcome)
}

/// Append `entry`, keeping `entries` sorted and contiguous by index
///
/// A rewritten index replaces everything from that index on.
fn append_entry(entries: &mut Vec<Entry>, entry: Entry) -> Result<(), ReplayError> {
    if let Some(last) = entries.last() {
        let expected = last.index + 1;
        if entry.index > expected {
            return Err(ReplayError::IndexGap {
                expected,
                got: entry.index,
            });
        }
        if entry.index < expected {
            let pos = entries.partition_point(|e| e.index < entry.index);
            entries.truncate(pos);
        }
    }
    entries.push(entry);
    Ok(())
}

/// Replay segment files, repairing a torn tail when the config asks for it
///
/// A torn tail is always in the last path, so that is the file truncated.
pub fn replay_files(paths: &[PathBuf], config: &ReplayConfig) -> Result<ReplayOutcome, ReplayError> {
    let files = paths
        .iter()
        .map(File::open)
        .collect::<Result<Vec<_>, _>>()?;
    let outcome = replay(files.iter(), config)?;

    if let (TailStatus::Torn { offset }, true, Some(tail_path)) =
        (outcome.tail, config.repair_torn_tail, paths.last())
    {
        drop(files);
        repair_tail(tail_path, offset, config)?;
    }
    Ok(outcome)
}

/// Cut a segment back to `offset`, keeping the removed bytes aside
///
/// The removed tail is copied to `<path><broken_suffix>` before truncation.
/// Returns the number of bytes removed.
pub fn repair_tail(path: &Path, offset: u64, config: &ReplayConfig) -> Result<u64, ReplayError> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    let len = file.metadata()?.len();
    if offset >= len {
        return Ok(0);
    }

    let broken_path = broken_path(path, &config.broken_suffix);
    let mut broken = File::create(&broken_path)?;
    file.seek(SeekFrom::Start(offset))?;
    io::copy(&mut (&mut file).take(len - offset), &mut broken)?;
    broken.sync_all()?;

    file.set_len(offset)?;
    file.sync_all()?;

    tracing::info!(
        path = %path.display(),
        broken = %broken_path.display(),
        offset,
        removed = len - offset,
        "truncated torn wal tail"
    );
    Ok(len - offset)
}

fn broken_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
