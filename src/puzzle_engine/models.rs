use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::puzzle_engine::error::PuzzleError;

// ---------------------------------------------------------------------------
// Modes and stages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Guess dictionary clue words; each solved clue reveals one syllable.
    Word,
    /// Rebuild the sentence from its initial consonants.
    Consonant,
    /// Rebuild the sentence from its shuffled syllables.
    Shuffle,
}

impl GameMode {
    /// Wire name used in share links and daily-challenge records.
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Word      => "word",
            GameMode::Consonant => "consonant",
            GameMode::Shuffle   => "shuffle",
        }
    }

    /// Two-letter prefix of generated puzzle IDs.
    pub fn id_prefix(self) -> &'static str {
        match self {
            GameMode::Word      => "WD",
            GameMode::Consonant => "CS",
            GameMode::Shuffle   => "SH",
        }
    }

    /// True for the modes the player solves by editing single positions.
    pub fn is_character_mode(self) -> bool {
        matches!(self, GameMode::Consonant | GameMode::Shuffle)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameMode::Word      => "단어 퀴즈",
            GameMode::Consonant => "초성 퀴즈",
            GameMode::Shuffle   => "글자 섞기",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for GameMode {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "word"      => Ok(GameMode::Word),
            "consonant" => Ok(GameMode::Consonant),
            "shuffle"   => Ok(GameMode::Shuffle),
            other => Err(PuzzleError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    #[default]
    Input,
    Quiz,
    Result,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Input  => write!(f, "input"),
            Stage::Quiz   => write!(f, "quiz"),
            Stage::Result => write!(f, "result"),
        }
    }
}

/// Per-position verdict shown while the player types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    #[default]
    Neutral,
    Correct,
    Incorrect,
}

// ---------------------------------------------------------------------------
// Puzzle data
// ---------------------------------------------------------------------------

/// A dictionary word whose correct guess reveals every claimed occurrence of
/// `target_char` in the sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClueWord {
    pub target_char: char,
    pub clue_word: String,
    pub meaning: String,
    /// Sentence positions claimed by this clue, ascending.
    pub positions: Vec<usize>,
    pub solved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_input: Option<String>,
}

/// Mode-specific part of a generated puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PuzzleBoard {
    Word {
        clues: Vec<ClueWord>,
        /// Non-space positions no clue claims; shown from the start.
        auto_revealed: Vec<usize>,
    },
    Consonant {
        consonants: String,
    },
    Shuffle {
        shuffled: String,
        /// First syllable of every word block, pre-revealed and never editable.
        standing_hints: Vec<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleRequest {
    pub sentence: String,
    pub mode: GameMode,
    pub rng_seed: Option<u64>,
}

impl PuzzleRequest {
    /// Request with entropy seeding.
    pub fn new(sentence: impl Into<String>, mode: GameMode) -> Self {
        PuzzleRequest { sentence: sentence.into(), mode, rng_seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    /// `<mode prefix>-<8 hex digits>`, e.g. `"CS-1A2B3C4D"`.
    pub puzzle_id: String,
    pub mode: GameMode,
    pub sentence: String,
    pub board: PuzzleBoard,
}

impl Puzzle {
    pub fn sentence_chars(&self) -> Vec<char> {
        self.sentence.chars().collect()
    }

    /// Clue words of a word-mode puzzle; empty for the other modes.
    pub fn clues(&self) -> &[ClueWord] {
        match &self.board {
            PuzzleBoard::Word { clues, .. } => clues,
            _ => &[],
        }
    }

    pub(crate) fn clues_mut(&mut self) -> Option<&mut Vec<ClueWord>> {
        match &mut self.board {
            PuzzleBoard::Word { clues, .. } => Some(clues),
            _ => None,
        }
    }

    /// The text shown to the player before any reveal.
    pub fn problem_text(&self) -> String {
        match &self.board {
            PuzzleBoard::Word { clues, .. } => clues
                .iter()
                .map(|c| c.meaning.as_str())
                .collect::<Vec<_>>()
                .join(" / "),
            PuzzleBoard::Consonant { consonants } => consonants.clone(),
            PuzzleBoard::Shuffle { shuffled, .. } => shuffled.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Hints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "index", rename_all = "lowercase")]
pub enum HintId {
    /// Index into the clue list (word mode).
    Clue(usize),
    /// Sentence position (consonant / shuffle modes).
    Character(usize),
}

impl fmt::Display for HintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintId::Clue(i)      => write!(f, "word-{}", i),
            HintId::Character(i) => write!(f, "char-{}", i),
        }
    }
}

impl FromStr for HintId {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || PuzzleError::InvalidHintId(s.to_string());
        let (kind, index) = s.trim().split_once('-').ok_or_else(bad)?;
        let index: usize = index.parse().map_err(|_| bad())?;
        match kind {
            "word" => Ok(HintId::Clue(index)),
            "char" => Ok(HintId::Character(index)),
            _ => Err(bad()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintCandidate {
    pub id: HintId,
    pub display_text: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintOutcome {
    pub id: HintId,
    pub answer: String,
    pub hints_remaining: u8,
    pub completed: bool,
}

// ---------------------------------------------------------------------------
// Player actions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClueOutcome {
    Correct { completed: bool },
    Incorrect,
    AlreadySolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOutcome {
    /// The edit landed; carries the position's new feedback.
    Applied(Feedback),
    /// The position is already correct (or a standing hint) and was left as is.
    Locked,
    /// The edit completed the sentence; the session is now in `Stage::Result`.
    Completed,
}

/// One pending edit of a single sentence position. `None` clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharEdit {
    pub position: usize,
    pub value: Option<char>,
}

/// Result of applying a debounced batch of edits. Counts are per distinct
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub applied: usize,
    pub locked: usize,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GuessOutcome {
    Solved,
    /// Not an exact match; `similarity` is the 0–100 closeness score.
    Retry { similarity: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_id_round_trips_through_display() {
        for id in [HintId::Clue(0), HintId::Clue(12), HintId::Character(7)] {
            assert_eq!(id.to_string().parse::<HintId>().unwrap(), id);
        }
        assert_eq!(HintId::Character(3).to_string(), "char-3");
    }

    #[test]
    fn hint_id_rejects_garbage() {
        assert!("char".parse::<HintId>().is_err());
        assert!("char-x".parse::<HintId>().is_err());
        assert!("clue-1".parse::<HintId>().is_err());
    }

    #[test]
    fn game_mode_parses_wire_names() {
        assert_eq!("word".parse::<GameMode>().unwrap(), GameMode::Word);
        assert_eq!(" shuffle ".parse::<GameMode>().unwrap(), GameMode::Shuffle);
        assert!("letters".parse::<GameMode>().is_err());
        assert_eq!(
            serde_json::to_string(&GameMode::Consonant).unwrap(),
            "\"consonant\""
        );
    }
}
