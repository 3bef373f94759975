// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decode error taxonomy
//!
//! Every failed decode is classified exactly once:
//!
//! - [`DecodeError::EndOfLog`]: all segments exhausted, replay complete
//! - [`DecodeError::PossiblyTorn`]: the tail of the newest segment holds a
//!   write that never finished; truncate at the last valid offset
//! - [`DecodeError::Fatal`]: corruption, an impossible record length, or an
//!   I/O failure; replay must abort

use std::io;
use thiserror::Error;

/// Outcome of a decode call that did not produce a record
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("wal: end of log")]
    EndOfLog,
    #[error("wal: unexpected end of log, possibly a torn write")]
    PossiblyTorn,
    #[error(transparent)]
    Fatal(#[from] FatalError),
}

impl DecodeError {
    pub fn is_end_of_log(&self) -> bool {
        matches!(self, Self::EndOfLog)
    }

    pub fn is_possibly_torn(&self) -> bool {
        matches!(self, Self::PossiblyTorn)
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}

impl From<Corruption> for DecodeError {
    fn from(corruption: Corruption) -> Self {
        Self::Fatal(FatalError::Corrupt(corruption))
    }
}

/// Non-recoverable decode failures
#[derive(Debug, Error)]
pub enum FatalError {
    /// The header declared more bytes than the segment can still hold.
    /// Never reclassified as torn: the header itself is suspect.
    #[error(
        "wal: max entry size limit exceeded, recBytes: {rec_bytes}, fileSize({file_size}) - offset({offset}) - padBytes({pad_bytes}) = entryLimit({limit})"
    )]
    SizeLimitExceeded {
        rec_bytes: u64,
        file_size: u64,
        offset: u64,
        pad_bytes: u64,
        limit: i64,
    },
    #[error("wal: corrupt record: {0}")]
    Corrupt(#[from] Corruption),
    #[error("wal: io error: {0}")]
    Io(#[from] io::Error),
    /// A previous call already failed; the decoder must not be reused
    #[error("wal: decoder already failed")]
    Poisoned,
}

/// Ways a record can fail validation
#[derive(Debug, Error)]
pub enum Corruption {
    #[error("failed to unmarshal record: {0}")]
    Unmarshal(#[from] prost::DecodeError),
    #[error("crc mismatch: record declares {expected:#010x}, chain computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
    /// A segment other than the newest ended partway through a frame
    #[error("segment truncated inside a frame at offset {offset}")]
    Truncated { offset: u64 },
}
