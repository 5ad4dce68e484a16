//! # chaeum
//!
//! Puzzle engine for 채움, a Korean sentence-guessing game.
//!
//! A player supplies a short Korean sentence; the engine turns it into one of
//! three puzzles and then tracks the player's reconstruction of the sentence
//! until it is complete.
//!
//! ## How it works
//!
//! 1. Clean and check the raw input with [`validate_sentence`].
//! 2. Build a [`PuzzleRequest`] with the sentence, a [`GameMode`], and an
//!    optional RNG seed, then call [`generate_puzzle`] with a [`Dictionary`].
//!    - **word**: every distinct syllable gets a dictionary clue word; guessing
//!      the clue reveals every occurrence of that syllable.
//!    - **consonant**: the sentence is shown as initial consonants only.
//!    - **shuffle**: the syllables are shuffled; the first syllable of every
//!      three-word block stays in place as a hint.
//! 3. Feed the [`Puzzle`] to a [`Session`] and forward player actions to it.
//!    The session owns reveal state, live feedback, and the hint budget, and
//!    moves to [`Stage::Result`] once the sentence is complete.
//!
//! ## Key features
//!
//! - **Deterministic**: `rng_seed: Some(u64)` reproduces the same puzzle,
//!   including clue choices and shuffle order.
//! - **Serialisable**: puzzles and sessions are plain serde records.
//! - **Share links**: [`share`] encodes a sentence and mode into a URL
//!   parameter compatible with existing links.
//!
//! ## Quick start
//!
//! ```rust
//! use chaeum::{
//!     generate_puzzle, validate_sentence, Dictionary, EditOutcome, GameConfig,
//!     GameMode, PuzzleRequest, SentenceOrigin, Session, Stage,
//! };
//!
//! let config = GameConfig::default();
//! let sentence = validate_sentence("오늘 날씨가 좋아서 공원에 갔다!", SentenceOrigin::Custom, &config).unwrap();
//!
//! let dictionary = Dictionary::starter().unwrap();
//! let puzzle = generate_puzzle(
//!     PuzzleRequest::new(sentence.clone(), GameMode::Consonant).with_seed(42),
//!     &dictionary,
//! )
//! .unwrap();
//! println!("{}: {}", puzzle.puzzle_id, puzzle.problem_text());
//!
//! let mut session = Session::new(config);
//! session.start(puzzle).unwrap();
//! for (i, c) in sentence.chars().enumerate().filter(|&(_, c)| c != ' ') {
//!     let outcome = session.set_character(i, Some(c)).unwrap();
//!     if outcome == EditOutcome::Completed {
//!         break;
//!     }
//! }
//! assert_eq!(session.stage(), Stage::Result);
//! ```

pub mod config;
pub mod daily;
pub mod puzzle_engine;
pub mod share;
pub mod validate;

// Convenience re-exports so callers can use `chaeum::generate_puzzle`
// directly without reaching into `puzzle_engine::`.
pub use config::GameConfig;
pub use daily::DailyChallenge;
pub use puzzle_engine::{
    build_letter_quiz, generate_puzzle, generate_puzzle_with_config, generate_puzzle_with_rng,
    similarity, BatchOutcome, CharEdit, ClueOutcome, ClueWord, DictEntry, Dictionary,
    EditDebouncer, EditOutcome, Feedback, GameMode, GuessOutcome, HintCandidate, HintId,
    HintOutcome, LetterClue, LetterQuiz, Puzzle, PuzzleBoard, PuzzleError, PuzzleRequest,
    Result, Session, Stage,
};
pub use share::SharedPuzzle;
pub use validate::{validate_sentence, SentenceOrigin};
