//! Game tunables, loadable from a JSON file.
//!
//! Every field has a serde default so older or partial files keep working.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::puzzle_engine::error::{PuzzleError, Result};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Hints a player may consume per session.
    #[serde(default = "default_max_hints")]
    pub max_hints: u8,
    /// Window for coalescing rapid character edits (ms).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Shortest accepted sentence, in characters (daily challenges exempt).
    #[serde(default = "default_min_sentence_len")]
    pub min_sentence_len: usize,
    /// Longest accepted sentence, in characters (daily challenges exempt).
    #[serde(default = "default_max_sentence_len")]
    pub max_sentence_len: usize,
    /// Words per block in shuffle mode; each block's first syllable is given.
    #[serde(default = "default_shuffle_hint_block")]
    pub shuffle_hint_block: usize,
}

fn default_max_hints() -> u8 {
    3
}

fn default_debounce_ms() -> u64 {
    100
}

fn default_min_sentence_len() -> usize {
    10
}

fn default_max_sentence_len() -> usize {
    50
}

fn default_shuffle_hint_block() -> usize {
    3
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            max_hints: default_max_hints(),
            debounce_ms: default_debounce_ms(),
            min_sentence_len: default_min_sentence_len(),
            max_sentence_len: default_max_sentence_len(),
            shuffle_hint_block: default_shuffle_hint_block(),
        }
    }
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_hints(mut self, max_hints: u8) -> Self {
        self.max_hints = max_hints;
        self
    }

    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    pub fn with_sentence_len(mut self, min: usize, max: usize) -> Self {
        self.min_sentence_len = min;
        self.max_sentence_len = max;
        self
    }

    pub fn with_shuffle_hint_block(mut self, words: usize) -> Self {
        self.shuffle_hint_block = words;
        self
    }
}

/// Read a config file, reporting I/O and parse failures.
pub fn load_config_from(path: &Path) -> Result<GameConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| PuzzleError::Config(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&content)
        .map_err(|e| PuzzleError::Config(format!("{}: {}", path.display(), e)))
}

/// Read a config file, falling back to defaults if it is missing or broken.
pub fn load_config(path: &Path) -> GameConfig {
    match load_config_from(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("using default config: {}", e);
            GameConfig::default()
        }
    }
}
