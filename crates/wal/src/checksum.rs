// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running CRC-32C chain across records and segments

/// Append-only CRC-32C accumulator
///
/// The value after writing `a` then `b` equals the checksum of `a ++ b`, and a
/// chain reseeded with a previously recorded value continues exactly where the
/// original chain left off. That lets a reader opened partway through the log
/// validate everything after a checksum control record without rereading the
/// older segments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrcChain {
    value: u32,
}

impl CrcChain {
    /// Start a chain from a previously recorded checksum
    pub fn new(seed: u32) -> Self {
        Self { value: seed }
    }

    /// Fold payload bytes into the chain
    pub fn write(&mut self, bytes: &[u8]) {
        self.value = crc32c::crc32c_append(self.value, bytes);
    }

    pub fn sum(&self) -> u32 {
        self.value
    }

    /// Replace the accumulator with one continuing from `seed`
    pub fn reseed(&mut self, seed: u32) {
        *self = Self::new(seed);
    }
}

#[cfg(test)]
#[path = "checksum_tests.rs"]
mod tests;
