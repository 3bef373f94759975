// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Ordered segment readers consumed as one logical byte stream

use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};

/// A readable log segment whose total size is known
///
/// Implemented for owned and borrowed files, so a caller can keep its file
/// handles and close them after the replay session, and for in-memory cursors.
pub trait SegmentReader: Read {
    /// Total size of the segment in bytes
    fn size(&self) -> io::Result<u64>;
}

impl SegmentReader for File {
    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

impl SegmentReader for &File {
    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

impl<T: AsRef<[u8]>> SegmentReader for Cursor<T> {
    fn size(&self) -> io::Result<u64> {
        Ok(self.get_ref().as_ref().len() as u64)
    }
}

/// One buffered segment with its size looked up on first use
pub(crate) struct Segment<R> {
    reader: BufReader<R>,
    size: Option<u64>,
}

impl<R: SegmentReader> Segment<R> {
    fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            size: None,
        }
    }

    pub(crate) fn size(&mut self) -> io::Result<u64> {
        match self.size {
            Some(size) => Ok(size),
            None => {
                let size = self.reader.get_ref().size()?;
                self.size = Some(size);
                Ok(size)
            }
        }
    }

    pub(crate) fn reader(&mut self) -> &mut BufReader<R> {
        &mut self.reader
    }
}

/// Segments in creation order, consumed from the front
///
/// Tracks the offset just past the last fully validated frame within the
/// current segment.
pub(crate) struct SegmentStream<R> {
    segments: VecDeque<Segment<R>>,
    last_valid_offset: u64,
}

impl<R: SegmentReader> SegmentStream<R> {
    pub(crate) fn new(readers: impl IntoIterator<Item = R>) -> Self {
        Self {
            segments: readers.into_iter().map(Segment::new).collect(),
            last_valid_offset: 0,
        }
    }

    pub(crate) fn current(&mut self) -> Option<&mut Segment<R>> {
        self.segments.front_mut()
    }

    /// Drop the exhausted front segment
    ///
    /// Returns false once no segments remain. The offset is only reset when a
    /// new segment becomes current, so after the last segment it still points
    /// at the append position of the newest file.
    pub(crate) fn advance(&mut self) -> bool {
        self.segments.pop_front();
        if self.segments.is_empty() {
            return false;
        }
        self.last_valid_offset = 0;
        true
    }

    pub(crate) fn remaining(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn last_valid_offset(&self) -> u64 {
        self.last_valid_offset
    }

    /// Record a fully validated frame of `frame_len` bytes
    pub(crate) fn commit(&mut self, frame_len: u64) {
        self.last_valid_offset += frame_len;
    }
}

#[cfg(test)]
#[path = "segment_tests.rs"]
mod tests;
