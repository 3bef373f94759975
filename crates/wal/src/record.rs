// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Record schema stored inside each WAL frame
//!
//! Records and the consensus structures they carry are protobuf messages, so
//! logs written by other implementations of the same format decode unchanged.

use crate::error::Corruption;
use prost::Message;
use thiserror::Error;

/// Kind of payload carried by a [`Record`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Opaque cluster metadata, written once at the head of the log
    Metadata = 1,
    /// A serialized consensus [`Entry`]
    Entry = 2,
    /// A serialized [`HardState`]
    State = 3,
    /// Control marker carrying the checksum that seeds the chain
    Crc = 4,
    /// Snapshot marker
    Snapshot = 5,
}

impl RecordType {
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Metadata),
            2 => Some(Self::Entry),
            3 => Some(Self::State),
            4 => Some(Self::Crc),
            5 => Some(Self::Snapshot),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Metadata => "metadata",
            Self::Entry => "entry",
            Self::State => "state",
            Self::Crc => "crc",
            Self::Snapshot => "snapshot",
        }
    }
}

/// A single decoded WAL record
#[derive(Clone, PartialEq, Message)]
pub struct Record {
    #[prost(int64, tag = "1")]
    pub r#type: i64,
    /// Value of the checksum chain after this record's data was folded in
    #[prost(uint32, tag = "2")]
    pub crc: u32,
    #[prost(bytes = "vec", tag = "3")]
    pub data: Vec<u8>,
}

impl Record {
    /// Create a record of the given type; `crc` is filled in by the encoder
    pub fn new(record_type: RecordType, data: Vec<u8>) -> Self {
        Self {
            r#type: record_type as i64,
            crc: 0,
            data,
        }
    }

    /// Create a checksum control record carrying `crc`
    pub fn crc_marker(crc: u32) -> Self {
        Self {
            r#type: RecordType::Crc as i64,
            crc,
            data: Vec::new(),
        }
    }

    pub fn record_type(&self) -> Option<RecordType> {
        RecordType::from_i64(self.r#type)
    }

    /// Whether this is a checksum control record, exempt from payload validation
    pub fn is_crc(&self) -> bool {
        self.r#type == RecordType::Crc as i64
    }

    /// Check the declared checksum against the running chain value
    pub fn validate(&self, crc: u32) -> Result<(), Corruption> {
        if self.crc == crc {
            return Ok(());
        }
        Err(Corruption::ChecksumMismatch {
            expected: self.crc,
            actual: crc,
        })
    }
}

/// Consensus entry type
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum EntryType {
    Normal = 0,
    ConfChange = 1,
    ConfChangeV2 = 2,
}

/// A consensus log entry, carried as the data of an [`RecordType::Entry`] record
#[derive(Clone, PartialEq, Message)]
pub struct Entry {
    #[prost(uint64, tag = "2")]
    pub term: u64,
    #[prost(uint64, tag = "3")]
    pub index: u64,
    #[prost(enumeration = "EntryType", tag = "1")]
    pub entry_type: i32,
    #[prost(bytes = "vec", tag = "4")]
    pub data: Vec<u8>,
}

/// Persisted consensus state, carried by [`RecordType::State`] records
#[derive(Clone, Copy, PartialEq, Eq, Message)]
pub struct HardState {
    #[prost(uint64, tag = "1")]
    pub term: u64,
    #[prost(uint64, tag = "2")]
    pub vote: u64,
    #[prost(uint64, tag = "3")]
    pub commit: u64,
}

impl HardState {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Failure to rebuild a consensus structure from validated record data
///
/// The record already passed its checksum, so a schema mismatch here is always
/// corruption and never a torn write.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("wal: failed to unmarshal {kind}: {source}")]
    Unmarshal {
        kind: &'static str,
        #[source]
        source: prost::DecodeError,
    },
}

/// Rebuild a consensus entry from an entry record's data
pub fn unmarshal_entry(data: &[u8]) -> Result<Entry, SchemaError> {
    Entry::decode(data).map_err(|source| SchemaError::Unmarshal {
        kind: "entry",
        source,
    })
}

/// Rebuild the persisted hard state from a state record's data
pub fn unmarshal_state(data: &[u8]) -> Result<HardState, SchemaError> {
    HardState::decode(data).map_err(|source| SchemaError::Unmarshal {
        kind: "hard state",
        source,
    })
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
