// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! WAL record decoder
//!
//! Reads frames from an ordered list of segments as a single stream:
//!
//! 1. read the 8-byte length header; a clean EOF or a zero header means the
//!    current segment is exhausted, so move to the next one
//! 2. reject lengths that cannot fit in the rest of the segment
//! 3. read payload plus padding and unmarshal the [`Record`]
//! 4. fold the payload into the CRC chain and check the declared checksum
//!
//! Failures in steps 3 and 4 are checked for the torn-write pattern before
//! being reported as corruption.
//!
//! ## Locking
//!
//! Each decode call runs under one mutex so concurrent callers cannot race on
//! the offset, the chain or the segment list. That is all it provides. Callers
//! on several threads still share one sequential stream, and which thread
//! gets which record is unspecified. Interleaved decoding is not supported;
//! serialize externally when record assignment matters.

use crate::checksum::CrcChain;
use crate::config::ReplayConfig;
use crate::error::{Corruption, DecodeError, FatalError};
use crate::frame::{decode_frame_size, read_header, Header, FRAME_SIZE_BYTES};
use crate::record::Record;
use crate::segment::{SegmentReader, SegmentStream};
use crate::torn;
use prost::Message;
use std::io::{self, Read};
use std::sync::{Mutex, MutexGuard};

/// Decoder over one replay session's segments
///
/// Segments must be supplied in creation order. After a torn or fatal result
/// the decoder is spent: later calls repeat the classification without
/// reading any further.
pub struct Decoder<R> {
    state: Mutex<DecoderState<R>>,
}

struct DecoderState<R> {
    segments: SegmentStream<R>,
    crc: CrcChain,
    sector_size: u64,
    failure: Option<Failure>,
}

#[derive(Debug, Clone, Copy)]
enum Failure {
    Torn,
    Fatal,
}

impl<R: SegmentReader> Decoder<R> {
    pub fn new(readers: impl IntoIterator<Item = R>) -> Self {
        Self::with_config(readers, &ReplayConfig::default())
    }

    pub fn with_config(readers: impl IntoIterator<Item = R>, config: &ReplayConfig) -> Self {
        Self {
            state: Mutex::new(DecoderState {
                segments: SegmentStream::new(readers),
                crc: CrcChain::default(),
                sector_size: config.sector_size.max(1),
                failure: None,
            }),
        }
    }

    /// Decode the next record
    pub fn decode(&self) -> Result<Record, DecodeError> {
        let mut rec = Record::default();
        self.decode_into(&mut rec)?;
        Ok(rec)
    }

    /// Decode the next record into `rec`, which is reset first
    pub fn decode_into(&self, rec: &mut Record) -> Result<(), DecodeError> {
        rec.clear();
        self.lock().decode(rec)
    }

    /// Iterate records until the end of the log or the first failure
    pub fn records(&self) -> Records<'_, R> {
        Records {
            decoder: self,
            done: false,
        }
    }

    /// Offset within the current segment just past the last valid record
    ///
    /// This is where appending may safely resume, or where a torn tail
    /// should be truncated.
    pub fn last_offset(&self) -> u64 {
        self.lock().segments.last_valid_offset()
    }

    /// Current chain value, used to seed the encoder of the next file
    pub fn last_crc(&self) -> u32 {
        self.lock().crc.sum()
    }

    /// Reseed the chain, for sessions that start partway through the log
    pub fn update_crc(&self, prev_crc: u32) {
        self.lock().crc.reseed(prev_crc);
    }

    /// Segments not yet exhausted, including the current one
    pub fn remaining_segments(&self) -> usize {
        self.lock().segments.remaining()
    }

    fn lock(&self) -> MutexGuard<'_, DecoderState<R>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<R: SegmentReader> DecoderState<R> {
    fn decode(&mut self, rec: &mut Record) -> Result<(), DecodeError> {
        if let Some(failure) = self.failure {
            return Err(match failure {
                Failure::Torn => DecodeError::PossiblyTorn,
                Failure::Fatal => FatalError::Poisoned.into(),
            });
        }

        let result = self.decode_record(rec);
        match &result {
            Err(DecodeError::PossiblyTorn) => self.failure = Some(Failure::Torn),
            Err(DecodeError::Fatal(_)) => self.failure = Some(Failure::Fatal),
            _ => {}
        }
        result
    }

    fn decode_record(&mut self, rec: &mut Record) -> Result<(), DecodeError> {
        let (len_field, file_size) = loop {
            let Some(segment) = self.segments.current() else {
                return Err(DecodeError::EndOfLog);
            };
            match read_header(segment.reader()).map_err(FatalError::Io)? {
                // end of file, or preallocated space that was never written
                Header::Eof | Header::Value(0) => {
                    if !self.segments.advance() {
                        return Err(DecodeError::EndOfLog);
                    }
                    tracing::debug!(
                        remaining = self.segments.remaining(),
                        "wal segment exhausted, advancing"
                    );
                }
                Header::Partial(read) => {
                    tracing::debug!(read, "wal segment ends inside a frame header");
                    return Err(self.truncated());
                }
                Header::Value(len_field) => break (len_field, segment.size().map_err(FatalError::Io)?),
            }
        };

        let (rec_bytes, pad_bytes) = decode_frame_size(len_field);
        let offset = self.segments.last_valid_offset();
        // the record must fit in what is left of the segment
        let limit = file_size as i64 - offset as i64 - pad_bytes as i64;
        if rec_bytes as i64 > limit {
            return Err(FatalError::SizeLimitExceeded {
                rec_bytes,
                file_size,
                offset,
                pad_bytes,
                limit,
            }
            .into());
        }

        let frame_bytes = rec_bytes + pad_bytes;
        let len = usize::try_from(frame_bytes).map_err(|_| {
            FatalError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "wal: frame larger than addressable memory",
            ))
        })?;
        let mut data = vec![0u8; len];
        let Some(segment) = self.segments.current() else {
            return Err(DecodeError::EndOfLog);
        };
        if let Err(e) = segment.reader().read_exact(&mut data) {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                return Err(self.truncated());
            }
            return Err(FatalError::Io(e).into());
        }

        *rec = match Record::decode(&data[..len - pad_bytes as usize]) {
            Ok(decoded) => decoded,
            Err(e) => return Err(self.classify(&data, e.into())),
        };

        if rec.is_crc() {
            // a control record must continue the chain it interrupts
            let current = self.crc.sum();
            if current != 0 && rec.crc != current {
                return Err(Corruption::ChecksumMismatch {
                    expected: rec.crc,
                    actual: current,
                }
                .into());
            }
            self.crc.reseed(rec.crc);
        } else {
            self.crc.write(&rec.data);
            if let Err(corruption) = rec.validate(self.crc.sum()) {
                return Err(self.classify(&data, corruption));
            }
        }

        self.segments.commit(FRAME_SIZE_BYTES + frame_bytes);
        Ok(())
    }

    /// Classify a stream that ended partway through a frame
    fn truncated(&self) -> DecodeError {
        if self.segments.remaining() == 1 {
            return DecodeError::PossiblyTorn;
        }
        Corruption::Truncated {
            offset: self.segments.last_valid_offset(),
        }
        .into()
    }

    fn classify(&self, data: &[u8], corruption: Corruption) -> DecodeError {
        if self.is_torn_entry(data) {
            tracing::warn!(
                offset = self.segments.last_valid_offset(),
                error = %corruption,
                "wal tail looks like a torn write"
            );
            return DecodeError::PossiblyTorn;
        }
        corruption.into()
    }

    fn is_torn_entry(&self, data: &[u8]) -> bool {
        // only the newest, still-open segment can hold an unfinished write
        if self.segments.remaining() != 1 {
            return false;
        }
        let file_offset = self.segments.last_valid_offset() + FRAME_SIZE_BYTES;
        torn::is_torn_entry(data, file_offset, self.sector_size)
    }
}

/// Iterator returned by [`Decoder::records`]
///
/// Ends at the end of the log, or right after yielding the first error.
pub struct Records<'a, R> {
    decoder: &'a Decoder<R>,
    done: bool,
}

impl<R: SegmentReader> Iterator for Records<'_, R> {
    type Item = Result<Record, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.decoder.decode() {
            Ok(rec) => Some(Ok(rec)),
            Err(DecodeError::EndOfLog) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
#[path = "decoder_tests.rs"]
mod tests;
