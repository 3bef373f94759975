// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Torn-write heuristic
//!
//! Storage writes whole sectors atomically. A record whose write was issued but
//! never completed before a crash therefore leaves at least one sector of
//! zeros, while bit rot or a logic bug leaves non-zero garbage.

/// Smallest sector size assumed to be written atomically
pub const MIN_SECTOR_SIZE: u64 = 512;

/// Whether `data`, starting at absolute `file_offset`, looks like a torn write
///
/// The bytes are split on sector boundaries of the underlying file, so the
/// first and last chunks may be shorter than a sector. Any chunk made of
/// nothing but zeros is the mark of an unfinished write.
pub fn is_torn_entry(data: &[u8], file_offset: u64, sector_size: u64) -> bool {
    SectorChunks::new(data, file_offset, sector_size).any(|chunk| chunk.iter().all(|&b| b == 0))
}

/// Iterator over `data` split on absolute sector boundaries
struct SectorChunks<'a> {
    rest: &'a [u8],
    file_offset: u64,
    sector_size: u64,
}

impl<'a> SectorChunks<'a> {
    fn new(data: &'a [u8], file_offset: u64, sector_size: u64) -> Self {
        Self {
            rest: data,
            file_offset,
            sector_size: sector_size.max(1),
        }
    }
}

impl<'a> Iterator for SectorChunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let to_boundary = self.sector_size - self.file_offset % self.sector_size;
        let len = usize::try_from(to_boundary)
            .unwrap_or(usize::MAX)
            .min(self.rest.len());
        let (chunk, rest) = self.rest.split_at(len);
        self.rest = rest;
        self.file_offset += len as u64;
        Some(chunk)
    }
}

#[cfg(test)]
#[path = "torn_tests.rs"]
mod tests;
