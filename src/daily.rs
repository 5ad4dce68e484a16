//! Daily-challenge records.
//!
//! The provider is external; this module only gives its record a type and
//! turns it into an ordinary puzzle request. Daily sentences skip the length
//! rule at validation.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::puzzle_engine::{error::Result, models::{GameMode, PuzzleRequest}};
use crate::validate::{validate_sentence, SentenceOrigin};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
    pub sentence: String,
    pub mode: GameMode,
    /// Human-readable mode label, e.g. "초성 퀴즈".
    pub mode_display_name: String,
    /// Attribution for the sentence (book, proverb, author).
    pub source: String,
    /// Provider-defined category, e.g. "proverb" or "quote".
    #[serde(rename = "type")]
    pub kind: String,
}

impl DailyChallenge {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Validate the sentence (length rule waived) and build a request.
    pub fn to_request(&self, config: &GameConfig, rng_seed: Option<u64>) -> Result<PuzzleRequest> {
        let sentence = validate_sentence(&self.sentence, SentenceOrigin::Daily, config)?;
        Ok(PuzzleRequest { sentence, mode: self.mode, rng_seed })
    }
}
