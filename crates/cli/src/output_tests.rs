// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use keel_wal::{Entry, EntryType, HardState};
use prost::Message;
use yare::parameterized;

fn entry_record(index: u64, term: u64, data: &[u8]) -> Record {
    let entry = Entry {
        term,
        index,
        entry_type: EntryType::Normal as i32,
        data: data.to_vec(),
    };
    let mut rec = Record::new(RecordType::Entry, entry.encode_to_vec());
    rec.crc = 0xdead_beef;
    rec
}

#[parameterized(
    empty = { b"", "" },
    ascii = { b"foo", "\\x66\\x6f\\x6f" },
    binary = { &[0x00, 0xff, 0x0a], "\\x00\\xff\\x0a" },
)]
fn hex_escape_renders_each_byte(data: &[u8], expected: &str) {
    assert_eq!(hex_escape(data), expected);
}

#[test]
fn entry_view_shows_term_and_index() {
    let view = RecordView::new(&entry_record(7, 3, b"put"), false);
    assert_eq!(view.kind, "entry");
    assert_eq!(view.term, Some(3));
    assert_eq!(view.index, Some(7));
    assert!(view.data.is_none());
    assert!(view.to_string().ends_with("term=3 index=7"));
    assert!(view.to_string().contains("crc=deadbeef"));
}

#[test]
fn hex_view_shows_entry_payload() {
    let view = RecordView::new(&entry_record(1, 1, b"ab"), true);
    assert_eq!(view.data.as_deref(), Some("\\x61\\x62"));
}

#[test]
fn state_view_has_no_entry_fields() {
    let state = HardState {
        term: 1,
        vote: 2,
        commit: 3,
    };
    let rec = Record::new(RecordType::State, state.encode_to_vec());
    let view = RecordView::new(&rec, false);
    assert_eq!(view.kind, "state");
    assert_eq!(view.term, None);

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["type"], "state");
    assert!(json.get("term").is_none());
}

#[test]
fn unknown_type_is_named_by_number() {
    let rec = Record {
        r#type: 99,
        crc: 0,
        data: Vec::new(),
    };
    assert_eq!(RecordView::new(&rec, false).kind, "unknown(99)");
}

#[test]
fn torn_summary_reports_offset() {
    let outcome = ReplayOutcome {
        metadata: None,
        hard_state: HardState::default(),
        entries: Vec::new(),
        records: 4,
        last_offset: 96,
        last_crc: 0x1234,
        tail: TailStatus::Torn { offset: 96 },
    };
    let summary = VerifySummary::from(&outcome);
    assert_eq!(summary.status, "torn");
    assert!(summary.to_string().ends_with("status:      torn at offset 96"));

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["torn_offset"], 96);
    assert_eq!(json["last_crc"], 0x1234);
}

#[parameterized(
    text = { "text", OutputFormat::Text },
    json = { "json", OutputFormat::Json },
)]
fn format_parses_from_flag_value(value: &str, expected: OutputFormat) {
    assert_eq!(OutputFormat::from_str(value, false), Ok(expected));
}
