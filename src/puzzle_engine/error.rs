use thiserror::Error;

use crate::puzzle_engine::models::{GameMode, HintId, Stage};

pub type Result<T> = std::result::Result<T, PuzzleError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PuzzleError {
    /// Input sentence rejected at the boundary.
    #[error("invalid sentence: {0}")]
    InvalidSentence(String),

    /// Word mode found no dictionary word for any syllable.
    #[error("no clue words could be generated for this sentence")]
    NoClues,

    #[error("hint budget exhausted ({used}/{max} used)")]
    HintBudgetExhausted { used: u8, max: u8 },

    #[error("malformed share link: {0}")]
    MalformedShareLink(String),

    #[error("operation needs stage {expected}, session is in {actual}")]
    WrongStage { expected: Stage, actual: Stage },

    #[error("operation not available in {} mode", .mode.as_str())]
    WrongMode { mode: GameMode },

    #[error("unknown game mode: {0}")]
    UnknownMode(String),

    #[error("clue index {0} out of range")]
    ClueOutOfRange(usize),

    #[error("position {0} out of range")]
    PositionOutOfRange(usize),

    #[error("hint {0} is not available")]
    UnknownHint(HintId),

    #[error("invalid hint id: {0}")]
    InvalidHintId(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// A saved session whose parts disagree with each other.
    #[error("corrupt session: {0}")]
    CorruptSession(String),

    #[error("puzzle already solved")]
    SessionComplete,

    #[error("config error: {0}")]
    Config(String),
}
