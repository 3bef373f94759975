// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::entry;

#[test]
fn record_types_map_to_wire_values() {
    for ty in [
        RecordType::Metadata,
        RecordType::Entry,
        RecordType::State,
        RecordType::Crc,
        RecordType::Snapshot,
    ] {
        assert_eq!(RecordType::from_i64(ty as i64), Some(ty));
    }
    assert_eq!(RecordType::from_i64(0), None);
    assert_eq!(RecordType::from_i64(99), None);
}

#[test]
fn crc_marker_is_control_record() {
    let rec = Record::crc_marker(0xabcd);
    assert!(rec.is_crc());
    assert_eq!(rec.crc, 0xabcd);
    assert!(rec.data.is_empty());
    assert!(!Record::new(RecordType::Entry, vec![1]).is_crc());
}

#[test]
fn validate_accepts_matching_crc() {
    let mut rec = Record::new(RecordType::State, vec![1, 2, 3]);
    rec.crc = 77;
    assert!(rec.validate(77).is_ok());
}

#[test]
fn validate_reports_both_values_on_mismatch() {
    let mut rec = Record::new(RecordType::State, vec![1, 2, 3]);
    rec.crc = 77;
    match rec.validate(78) {
        Err(Corruption::ChecksumMismatch { expected, actual }) => {
            assert_eq!(expected, 77);
            assert_eq!(actual, 78);
        }
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn record_wire_format_is_stable() {
    let rec = Record {
        r#type: RecordType::Entry as i64,
        crc: 1,
        data: vec![0xaa],
    };
    assert_eq!(rec.encode_to_vec(), vec![0x08, 0x02, 0x10, 0x01, 0x1a, 0x01, 0xaa]);
}

#[test]
fn entry_roundtrips_through_record_data() {
    let original = entry(7, 3, b"put foo=bar");
    let decoded = unmarshal_entry(&original.encode_to_vec()).unwrap();
    assert_eq!(decoded, original);
    assert_eq!(EntryType::try_from(decoded.entry_type).ok(), Some(EntryType::Normal));
}

#[test]
fn hard_state_roundtrips_through_record_data() {
    let original = HardState {
        term: 4,
        vote: 2,
        commit: 19,
    };
    let decoded = unmarshal_state(&original.encode_to_vec()).unwrap();
    assert_eq!(decoded, original);
    assert!(!decoded.is_empty());
    assert!(HardState::default().is_empty());
}

#[test]
fn unmarshal_garbage_is_schema_error() {
    let err = unmarshal_entry(&[0xff; 12]).unwrap_err();
    assert!(err.to_string().contains("entry"));

    let err = unmarshal_state(&[0xff; 12]).unwrap_err();
    assert!(err.to_string().contains("hard state"));
}
