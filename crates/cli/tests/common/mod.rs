// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Segment fixtures shared by the CLI tests

use keel_wal::{Encoder, Entry, EntryType, HardState, Record, RecordType};
use prost::Message;
use std::fs;
use std::path::{Path, PathBuf};

pub fn entry_record(index: u64, term: u64, data: &[u8]) -> Record {
    let entry = Entry {
        term,
        index,
        entry_type: EntryType::Normal as i32,
        data: data.to_vec(),
    };
    Record::new(RecordType::Entry, entry.encode_to_vec())
}

pub fn state_record(term: u64, vote: u64, commit: u64) -> Record {
    let state = HardState { term, vote, commit };
    Record::new(RecordType::State, state.encode_to_vec())
}

/// Encode a segment that starts with a crc marker; returns the bytes and chain value
pub fn encode_segment(records: Vec<Record>, prev_crc: u32) -> (Vec<u8>, u32) {
    let mut encoder = Encoder::new(Vec::new(), prev_crc);
    encoder.encode_crc().unwrap();
    for mut rec in records {
        encoder.encode(&mut rec).unwrap();
    }
    let crc = encoder.last_crc();
    (encoder.into_inner().unwrap(), crc)
}

/// Single clean segment with three entries
pub fn write_clean_log(dir: &Path) -> PathBuf {
    let (bytes, _) = encode_segment(
        vec![
            Record::new(RecordType::Metadata, b"cluster".to_vec()),
            entry_record(1, 1, b"foo"),
            entry_record(2, 1, b"bar"),
            state_record(1, 1, 2),
            entry_record(3, 2, b"baz"),
        ],
        0,
    );
    let path = dir.join("0000000000000000-0000000000000000.wal");
    fs::write(&path, bytes).unwrap();
    path
}

/// Segment whose last write only partly reached the disk; returns the path and
/// the offset the valid prefix ends at
pub fn write_torn_log(dir: &Path) -> (PathBuf, u64) {
    let (mut bytes, crc) = encode_segment(vec![entry_record(1, 1, b"foo")], 0);
    let valid = bytes.len() as u64;

    let mut encoder = Encoder::new(Vec::new(), crc);
    encoder.encode(&mut entry_record(2, 1, &[b'x'; 2000])).unwrap();
    bytes.extend_from_slice(&encoder.into_inner().unwrap());
    let len = bytes.len();
    bytes[len - 1000..].fill(0);

    let path = dir.join("0000000000000000-0000000000000000.wal");
    fs::write(&path, bytes).unwrap();
    (path, valid)
}

/// Segment whose last record was overwritten with garbage
pub fn write_corrupt_log(dir: &Path) -> PathBuf {
    let (mut bytes, _) = encode_segment(vec![entry_record(1, 1, &[b'x'; 2000])], 0);
    let len = bytes.len();
    bytes[len - 1000..].fill(0xab);

    let path = dir.join("0000000000000000-0000000000000000.wal");
    fs::write(&path, bytes).unwrap();
    path
}
