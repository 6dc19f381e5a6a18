use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::error::GameError;

/// Smallest supported board side length
pub const MIN_BOARD_SIZE: usize = 5;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: usize,
    /// Number of body segments behind the head at the start
    pub initial_body_length: usize,
    /// Seed for apple placement; a fresh entropy seed is used when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 10,
            initial_body_length: 3,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Smallest even board the autoplayer handles
    pub fn small() -> Self {
        Self {
            board_size: 6,
            initial_body_length: 2,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Longest starting body that fits left of the centre head
    pub fn max_initial_body_length(&self) -> usize {
        self.board_size.saturating_sub(1) / 2
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.board_size < MIN_BOARD_SIZE {
            return Err(GameError::BoardTooSmall {
                size: self.board_size,
                min: MIN_BOARD_SIZE,
            });
        }

        let max = self.max_initial_body_length();
        if self.initial_body_length == 0 || self.initial_body_length > max {
            return Err(GameError::BodyLengthOutOfRange {
                length: self.initial_body_length,
                max,
                size: self.board_size,
            });
        }

        Ok(())
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse game config")
    }

    /// Load a configuration from a TOML file; missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml_str(&source).with_context(|| format!("Invalid config file {:?}", path))
    }
}
