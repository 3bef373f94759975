// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! keel-wal: write-ahead log decoding for the keel key-value store
//!
//! The log is an ordered set of segment files. Each segment holds a run of
//! frames, and each frame is an 8-byte length header, a protobuf [`Record`],
//! and 0-7 bytes of padding. The [`Decoder`] reads the segments as one logical
//! stream, threads a CRC-32C chain across every record, and classifies a
//! failed read as either a torn tail write or genuine corruption.
//!
//! ## Layout
//!
//! ```text
//! segment 0 ─┐
//! segment 1 ─┼─ SegmentStream → frame header → Record → CrcChain → Decoder
//! segment N ─┘                                               ↓
//!                                              replay → ReplayOutcome
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod checksum;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod record;
pub mod replay;
pub mod segment;
pub mod torn;

#[cfg(test)]
mod test_support;

pub use checksum::CrcChain;
pub use config::{ConfigError, ReplayConfig};
pub use decoder::{Decoder, Records};
pub use encoder::Encoder;
pub use error::{Corruption, DecodeError, FatalError};
pub use frame::{decode_frame_size, encode_frame_size, pack_frame_size, FRAME_SIZE_BYTES};
pub use record::{
    unmarshal_entry, unmarshal_state, Entry, EntryType, HardState, Record, RecordType, SchemaError,
};
pub use replay::{repair_tail, replay, replay_files, replay_from, ReplayError, ReplayOutcome, TailStatus};
pub use segment::SegmentReader;
pub use torn::{is_torn_entry, MIN_SECTOR_SIZE};
