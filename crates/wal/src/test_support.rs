// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builders for in-memory logs used across the unit tests

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::encoder::Encoder;
use crate::record::{Entry, EntryType, HardState, Record, RecordType};
use prost::Message;
use std::io::Cursor;

pub(crate) fn entry(index: u64, term: u64, data: &[u8]) -> Entry {
    Entry {
        term,
        index,
        entry_type: EntryType::Normal as i32,
        data: data.to_vec(),
    }
}

pub(crate) fn entry_record(index: u64, term: u64, data: &[u8]) -> Record {
    Record::new(RecordType::Entry, entry(index, term, data).encode_to_vec())
}

pub(crate) fn state_record(term: u64, vote: u64, commit: u64) -> Record {
    let state = HardState { term, vote, commit };
    Record::new(RecordType::State, state.encode_to_vec())
}

/// Encode `records` into one segment; returns the bytes and the final chain value
pub(crate) fn encode_segment(records: &[Record], prev_crc: u32) -> (Vec<u8>, u32) {
    let mut encoder = Encoder::new(Vec::new(), prev_crc);
    for rec in records {
        let mut rec = rec.clone();
        encoder.encode(&mut rec).unwrap();
    }
    let crc = encoder.last_crc();
    (encoder.into_inner().unwrap(), crc)
}

/// Frame length of `rec` once encoded, including header and padding
pub(crate) fn frame_len(rec: &Record) -> u64 {
    let (bytes, _) = encode_segment(std::slice::from_ref(rec), 0);
    bytes.len() as u64
}

pub(crate) fn cursor(bytes: Vec<u8>) -> Cursor<Vec<u8>> {
    Cursor::new(bytes)
}
