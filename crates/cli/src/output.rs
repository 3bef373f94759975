// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for CLI commands

use clap::ValueEnum;
use keel_wal::{unmarshal_entry, Record, RecordType, ReplayOutcome, TailStatus};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(value) {
                println!("{}", json);
            }
        }
    }
}

/// Render bytes as `\xNN` escapes
pub fn hex_escape(data: &[u8]) -> String {
    use fmt::Write;

    let mut out = String::with_capacity(data.len() * 4);
    for byte in data {
        let _ = write!(out, "\\x{:02x}", byte);
    }
    out
}

#[derive(Debug, Serialize)]
pub struct RecordView {
    #[serde(rename = "type")]
    pub kind: String,
    pub crc: u32,
    pub len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl RecordView {
    /// Entry records show their term and index; with `hex` the entry payload
    /// is shown instead of the raw record bytes
    pub fn new(rec: &Record, hex: bool) -> Self {
        let kind = match rec.record_type() {
            Some(ty) => ty.name().to_string(),
            None => format!("unknown({})", rec.r#type),
        };
        let entry = match rec.record_type() {
            Some(RecordType::Entry) => unmarshal_entry(&rec.data).ok(),
            _ => None,
        };
        let data = hex.then(|| match &entry {
            Some(entry) => hex_escape(&entry.data),
            None => hex_escape(&rec.data),
        });

        Self {
            kind,
            crc: rec.crc,
            len: rec.data.len(),
            term: entry.as_ref().map(|e| e.term),
            index: entry.as_ref().map(|e| e.index),
            data,
        }
    }
}

impl fmt::Display for RecordView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} crc={:08x} len={}", self.kind, self.crc, self.len)?;
        if let (Some(term), Some(index)) = (self.term, self.index) {
            write!(f, " term={} index={}", term, index)?;
        }
        if let Some(data) = &self.data {
            write!(f, " data={}", data)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct VerifySummary {
    pub records: u64,
    pub entries: usize,
    pub last_index: Option<u64>,
    pub last_offset: u64,
    pub last_crc: u32,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub torn_offset: Option<u64>,
}

impl From<&ReplayOutcome> for VerifySummary {
    fn from(outcome: &ReplayOutcome) -> Self {
        let (status, torn_offset) = match outcome.tail {
            TailStatus::Clean => ("clean", None),
            TailStatus::Torn { offset } => ("torn", Some(offset)),
        };
        Self {
            records: outcome.records,
            entries: outcome.entries.len(),
            last_index: outcome.entries.last().map(|e| e.index),
            last_offset: outcome.last_offset,
            last_crc: outcome.last_crc,
            status,
            torn_offset,
        }
    }
}

impl fmt::Display for VerifySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "records:     {}", self.records)?;
        writeln!(f, "entries:     {}", self.entries)?;
        if let Some(index) = self.last_index {
            writeln!(f, "last index:  {}", index)?;
        }
        writeln!(f, "last offset: {}", self.last_offset)?;
        writeln!(f, "last crc:    {:08x}", self.last_crc)?;
        match self.torn_offset {
            Some(offset) => write!(f, "status:      torn at offset {}", offset),
            None => write!(f, "status:      {}", self.status),
        }
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
