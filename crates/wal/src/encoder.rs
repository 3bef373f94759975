// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Frame encoder, the inverse of the decoder
//!
//! Only produces frames: segment creation, rotation, preallocation and sync
//! policy belong to the caller.

use crate::checksum::CrcChain;
use crate::frame::{encode_frame_size, FRAME_SIZE_BYTES};
use crate::record::Record;
use prost::Message;
use std::io::{self, BufWriter, Write};

const PADDING: [u8; 8] = [0; 8];

/// Writes records as padded frames, threading the CRC chain through them
pub struct Encoder<W: Write> {
    writer: BufWriter<W>,
    crc: CrcChain,
}

impl<W: Write> Encoder<W> {
    /// Start encoding; `prev_crc` is the chain value the log ended with, or 0
    pub fn new(writer: W, prev_crc: u32) -> Self {
        Self {
            writer: BufWriter::new(writer),
            crc: CrcChain::new(prev_crc),
        }
    }

    /// Append one record and return the number of bytes it occupies
    ///
    /// Non-control records get their `crc` set from the chain. A checksum
    /// control record reseeds the chain with the value it carries.
    pub fn encode(&mut self, rec: &mut Record) -> io::Result<u64> {
        if rec.is_crc() {
            self.crc.reseed(rec.crc);
        } else {
            self.crc.write(&rec.data);
            rec.crc = self.crc.sum();
        }

        let data = rec.encode_to_vec();
        let (len_field, pad_bytes) = encode_frame_size(data.len() as u64);
        self.writer.write_all(&len_field.to_le_bytes())?;
        self.writer.write_all(&data)?;
        self.writer.write_all(&PADDING[..pad_bytes as usize])?;
        Ok(FRAME_SIZE_BYTES + data.len() as u64 + pad_bytes)
    }

    /// Append a control record carrying the current chain value
    ///
    /// Written at the head of every new segment so readers can start there.
    pub fn encode_crc(&mut self) -> io::Result<u64> {
        let mut rec = Record::crc_marker(self.crc.sum());
        self.encode(&mut rec)
    }

    pub fn last_crc(&self) -> u32 {
        self.crc.sum()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> io::Result<W> {
        self.writer.into_inner().map_err(|e| e.into_error())
    }
}

#[cfg(test)]
#[path = "encoder_tests.rs"]
mod tests;
