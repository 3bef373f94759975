// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Replay configuration
//!
//! Passed explicitly to every decoder and replay session; there is no
//! process-wide default that tests or concurrent sessions could race on.

use crate::torn::MIN_SECTOR_SIZE;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("sector_size must be greater than zero")]
    InvalidSectorSize,
}

/// Settings for decoding and recovering a log
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Chunk size used by the torn-write heuristic
    pub sector_size: u64,
    /// Truncate a torn tail during [`crate::replay_files`]
    pub repair_torn_tail: bool,
    /// Suffix of the file that keeps bytes cut off by a repair
    pub broken_suffix: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            sector_size: MIN_SECTOR_SIZE,
            repair_torn_tail: false,
            broken_suffix: ".broken".to_string(),
        }
    }
}

impl ReplayConfig {
    /// Load from a TOML file; missing keys keep their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        if config.sector_size == 0 {
            return Err(ConfigError::InvalidSectorSize);
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
