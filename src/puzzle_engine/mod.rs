//! Core puzzle engine: sentence transforms, clue selection, scoring, and the
//! session state machine.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: modes, stages, clues, boards, hint ids, outcomes |
//! | `hangul`     | Syllable classification and initial-consonant decomposition |
//! | `transform`  | Consonant / shuffle renderings, word-mode clue cover, Fisher-Yates |
//! | `dictionary` | Word → meaning table, containment lookup, letter-cover quiz |
//! | `similarity` | Levenshtein + Jaccard closeness score (0–100) |
//! | `helpers`    | Answer normalisation and per-position feedback |
//! | `session`    | `input → quiz → result` state machine owning all mutable state |
//! | `debounce`   | Coalesces rapid per-position edits into one batch |
//! | `generator`  | Single entry point `generate_puzzle()`, dispatches on mode |
//! | `error`      | `PuzzleError` and the crate `Result` alias |

pub mod debounce;
pub mod dictionary;
pub mod error;
pub mod generator;
pub mod hangul;
pub mod helpers;
pub mod models;
pub mod session;
pub mod similarity;
pub mod transform;

// Re-export the public API surface so callers can use
// `puzzle_engine::generate_puzzle` without reaching into sub-modules.
pub use debounce::EditDebouncer;
pub use dictionary::{build_letter_quiz, DictEntry, Dictionary, LetterClue, LetterQuiz};
pub use error::{PuzzleError, Result};
pub use generator::{generate_puzzle, generate_puzzle_with_config, generate_puzzle_with_rng};
pub use models::{
    BatchOutcome, CharEdit, ClueOutcome, ClueWord, EditOutcome, Feedback, GameMode,
    GuessOutcome, HintCandidate, HintId, HintOutcome, Puzzle, PuzzleBoard, PuzzleRequest, Stage,
};
pub use session::Session;
pub use similarity::similarity;
