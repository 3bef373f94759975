// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frame header codec
//!
//! Every record is preceded by an 8-byte little-endian signed length field:
//!
//! ```text
//!  63  62..59  58..56   55 ........................ 0
//! ┌───┬──────┬────────┬──────────────────────────────┐
//! │pad│  --  │padBytes│           recBytes           │
//! └───┴──────┴────────┴──────────────────────────────┘
//! ```
//!
//! A header of zero marks the end of written data in a segment.

use std::io::{self, Read};

/// Size of the length header preceding every record
pub const FRAME_SIZE_BYTES: u64 = 8;

/// Frames are padded so the next header starts on this alignment
const FRAME_ALIGNMENT: u64 = 8;

const REC_BYTES_MASK: u64 = !(0xff_u64 << 56);

/// Split a length field into `(recBytes, padBytes)`
///
/// Any 64-bit value is structurally decodable; whether the sizes make sense is
/// judged against the segment being read.
pub fn decode_frame_size(len_field: i64) -> (u64, u64) {
    let raw = len_field as u64;
    let rec_bytes = raw & REC_BYTES_MASK;
    // a set sign bit flags non-zero padding
    let pad_bytes = if len_field < 0 { (raw >> 56) & 0x7 } else { 0 };
    (rec_bytes, pad_bytes)
}

/// Build the length field for an explicit `(recBytes, padBytes)` pair
///
/// `rec_bytes` must fit in 56 bits and `pad_bytes` in 3.
pub fn pack_frame_size(rec_bytes: u64, pad_bytes: u64) -> i64 {
    let mut len_field = rec_bytes & REC_BYTES_MASK;
    if pad_bytes != 0 {
        len_field |= (0x80 | (pad_bytes & 0x7)) << 56;
    }
    len_field as i64
}

/// Length field and padding for a record of `data_bytes`, padded to 8 bytes
pub fn encode_frame_size(data_bytes: u64) -> (i64, u64) {
    let pad_bytes = (FRAME_ALIGNMENT - data_bytes % FRAME_ALIGNMENT) % FRAME_ALIGNMENT;
    (pack_frame_size(data_bytes, pad_bytes), pad_bytes)
}

/// Result of reading one length field from a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Header {
    /// Clean end of stream before any header byte
    Eof,
    /// Stream ended partway through the header
    Partial(usize),
    Value(i64),
}

pub(crate) fn read_header<R: Read>(reader: &mut R) -> io::Result<Header> {
    let mut buf = [0u8; FRAME_SIZE_BYTES as usize];
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(match filled {
        0 => Header::Eof,
        n if n < buf.len() => Header::Partial(n),
        _ => Header::Value(i64::from_le_bytes(buf)),
    })
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
