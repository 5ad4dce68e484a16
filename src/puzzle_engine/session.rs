//! One puzzle session: `input → quiz → result`, with `reset` back to `input`.
//!
//! The session owns every piece of mutable game state (reveal slots, live
//! feedback, clue solved flags, the hint budget). Each public operation
//! either fails without touching state or applies all of its changes before
//! returning.
//!
//! ## Reveal state
//!
//! One slot per sentence character: `None` is unrevealed, `Some(c)` is what is
//! currently shown. Space positions hold `Some(' ')` unless the player typed
//! something into them.
//!
//! ## Locking
//!
//! In the character modes a position whose feedback is `Correct` ignores
//! edits. `unlock` reopens it until it is correct again. Shuffle-mode standing
//! hints and hint-revealed positions are pinned and never reopen.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::puzzle_engine::{
    error::{PuzzleError, Result},
    helpers::{feedback_for, normalize_clue_answer, normalize_guess},
    models::{
        BatchOutcome, CharEdit, ClueOutcome, ClueWord, EditOutcome, Feedback, GameMode,
        GuessOutcome, HintCandidate, HintId, HintOutcome, Puzzle, PuzzleBoard, Stage,
    },
    similarity::similarity,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionRecord")]
pub struct Session {
    config: GameConfig,
    stage: Stage,
    puzzle: Option<Puzzle>,
    sentence: Vec<char>,
    reveal: Vec<Option<char>>,
    feedback: Vec<Feedback>,
    /// Never editable: standing hints and hint-revealed positions.
    pinned: BTreeSet<usize>,
    /// Correct positions the player reopened for editing.
    unlocked: BTreeSet<usize>,
    hints_used: u8,
    attempts: u32,
}

/// Deserialised shape of a [`Session`], checked before it becomes one.
#[derive(Deserialize)]
struct SessionRecord {
    config: GameConfig,
    stage: Stage,
    puzzle: Option<Puzzle>,
    sentence: Vec<char>,
    reveal: Vec<Option<char>>,
    feedback: Vec<Feedback>,
    pinned: BTreeSet<usize>,
    unlocked: BTreeSet<usize>,
    hints_used: u8,
    attempts: u32,
}

impl TryFrom<SessionRecord> for Session {
    type Error = PuzzleError;

    fn try_from(r: SessionRecord) -> Result<Self> {
        let len = r.sentence.len();
        if r.reveal.len() != len || r.feedback.len() != len {
            return Err(PuzzleError::CorruptSession(format!(
                "sentence has {} slots but reveal has {} and feedback {}",
                len,
                r.reveal.len(),
                r.feedback.len()
            )));
        }
        if let Some(&p) = r.pinned.iter().chain(&r.unlocked).find(|&&p| p >= len) {
            return Err(PuzzleError::CorruptSession(format!("position {p} past sentence end")));
        }
        if let Some(puzzle) = &r.puzzle {
            if puzzle.sentence_chars() != r.sentence {
                return Err(PuzzleError::CorruptSession("sentence does not match puzzle".into()));
            }
            if puzzle.clues().iter().flat_map(|c| &c.positions).any(|&p| p >= len) {
                return Err(PuzzleError::CorruptSession("clue position past sentence end".into()));
            }
        }
        Ok(Session {
            config: r.config,
            stage: r.stage,
            puzzle: r.puzzle,
            sentence: r.sentence,
            reveal: r.reveal,
            feedback: r.feedback,
            pinned: r.pinned,
            unlocked: r.unlocked,
            hints_used: r.hints_used,
            attempts: r.attempts,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(GameConfig::default())
    }
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Session {
            config,
            stage: Stage::Input,
            puzzle: None,
            sentence: Vec::new(),
            reveal: Vec::new(),
            feedback: Vec::new(),
            pinned: BTreeSet::new(),
            unlocked: BTreeSet::new(),
            hints_used: 0,
            attempts: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn puzzle(&self) -> Option<&Puzzle> {
        self.puzzle.as_ref()
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.puzzle.as_ref().map(|p| p.mode)
    }

    pub fn reveal_state(&self) -> &[Option<char>] {
        &self.reveal
    }

    pub fn live_feedback(&self) -> &[Feedback] {
        &self.feedback
    }

    pub fn clues(&self) -> &[ClueWord] {
        self.puzzle.as_ref().map(|p| p.clues()).unwrap_or(&[])
    }

    pub fn hints_used(&self) -> u8 {
        self.hints_used
    }

    pub fn hints_remaining(&self) -> u8 {
        self.config.max_hints.saturating_sub(self.hints_used)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_pinned(&self, position: usize) -> bool {
        self.pinned.contains(&position)
    }

    pub fn is_unlocked(&self, position: usize) -> bool {
        self.unlocked.contains(&position)
    }

    /// Revealed characters joined in order; unrevealed slots contribute nothing.
    pub fn revealed_sentence(&self) -> String {
        self.reveal.iter().flatten().collect()
    }

    /// 0–100. Word mode counts solved clues; the character modes score the
    /// revealed text against the sentence.
    pub fn progress(&self) -> f64 {
        match self.stage {
            Stage::Input => return 0.0,
            Stage::Result => return 100.0,
            Stage::Quiz => {}
        }
        match self.mode() {
            Some(GameMode::Word) => {
                let clues = self.clues();
                if clues.is_empty() {
                    return 0.0;
                }
                let solved = clues.iter().filter(|c| c.solved).count();
                solved as f64 / clues.len() as f64 * 100.0
            }
            Some(_) => {
                let sentence: String = self.sentence.iter().collect();
                similarity(&self.revealed_sentence(), &sentence).min(100.0)
            }
            None => 0.0,
        }
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Enter `quiz` with a freshly generated puzzle.
    pub fn start(&mut self, puzzle: Puzzle) -> Result<()> {
        self.expect_stage(Stage::Input)?;

        let sentence: Vec<char> = puzzle.sentence_chars();
        let mut reveal: Vec<Option<char>> =
            sentence.iter().map(|&c| if c == ' ' { Some(' ') } else { None }).collect();
        let mut feedback = vec![Feedback::Neutral; sentence.len()];
        let mut pinned = BTreeSet::new();

        let mut give = |i: usize| {
            if let Some(&c) = sentence.get(i) {
                if c != ' ' {
                    reveal[i] = Some(c);
                    feedback[i] = Feedback::Correct;
                    pinned.insert(i);
                }
            }
        };

        match &puzzle.board {
            PuzzleBoard::Word { clues, .. } => {
                let claimed: BTreeSet<usize> = clues
                    .iter()
                    .filter(|c| !c.solved)
                    .flat_map(|c| c.positions.iter().copied())
                    .collect();
                (0..sentence.len()).filter(|i| !claimed.contains(i)).for_each(&mut give);
            }
            PuzzleBoard::Consonant { .. } => {}
            PuzzleBoard::Shuffle { standing_hints, .. } => {
                standing_hints.iter().copied().for_each(&mut give);
            }
        }

        log::info!("puzzle {} started ({} mode)", puzzle.puzzle_id, puzzle.mode.as_str());
        self.sentence = sentence;
        self.reveal = reveal;
        self.feedback = feedback;
        self.pinned = pinned;
        self.unlocked.clear();
        self.hints_used = 0;
        self.attempts = 0;
        self.puzzle = Some(puzzle);
        self.stage = Stage::Quiz;
        self.check_completion();
        Ok(())
    }

    /// Discard everything and return to `input`.
    pub fn reset(&mut self) {
        if let Some(p) = &self.puzzle {
            log::info!("puzzle {} reset", p.puzzle_id);
        }
        *self = Session::new(self.config.clone());
    }

    /// Guess the clue word at `clue_index` (word mode).
    pub fn submit_clue_answer(&mut self, clue_index: usize, guess: &str) -> Result<ClueOutcome> {
        self.expect_stage(Stage::Quiz)?;
        self.expect_mode(|m| m == GameMode::Word)?;

        let clue = self
            .clues()
            .get(clue_index)
            .ok_or(PuzzleError::ClueOutOfRange(clue_index))?;
        if clue.solved {
            return Ok(ClueOutcome::AlreadySolved);
        }
        let expected = normalize_clue_answer(&clue.clue_word);

        self.attempts += 1;
        if normalize_clue_answer(guess) != expected {
            return Ok(ClueOutcome::Incorrect);
        }

        self.solve_clue(clue_index, guess.to_string());
        Ok(ClueOutcome::Correct { completed: self.check_completion() })
    }

    /// Set or clear one position (consonant / shuffle modes).
    pub fn set_character(&mut self, position: usize, value: Option<char>) -> Result<EditOutcome> {
        self.expect_stage(Stage::Quiz)?;
        self.expect_mode(GameMode::is_character_mode)?;
        self.expect_position(position)?;

        if self.is_locked(position) {
            return Ok(EditOutcome::Locked);
        }
        let verdict = self.write_cell(position, value);
        if self.check_completion() {
            Ok(EditOutcome::Completed)
        } else {
            Ok(EditOutcome::Applied(verdict))
        }
    }

    /// Apply a debounced batch, then check completion once.
    ///
    /// Later edits to the same position win; each position is lock-checked
    /// once, against its state before the batch.
    pub fn apply_edits(&mut self, edits: &[CharEdit]) -> Result<BatchOutcome> {
        self.expect_stage(Stage::Quiz)?;
        self.expect_mode(GameMode::is_character_mode)?;
        let mut latest: BTreeMap<usize, Option<char>> = BTreeMap::new();
        for edit in edits {
            self.expect_position(edit.position)?;
            latest.insert(edit.position, edit.value);
        }

        let mut outcome = BatchOutcome::default();
        for (position, value) in latest {
            if self.is_locked(position) {
                outcome.locked += 1;
            } else {
                self.write_cell(position, value);
                outcome.applied += 1;
            }
        }
        outcome.completed = self.check_completion();
        Ok(outcome)
    }

    /// Reopen a correct position for editing. Returns `false` if the position
    /// is pinned or not currently correct.
    pub fn unlock(&mut self, position: usize) -> Result<bool> {
        self.expect_stage(Stage::Quiz)?;
        self.expect_mode(GameMode::is_character_mode)?;
        self.expect_position(position)?;

        if self.pinned.contains(&position) || self.feedback[position] != Feedback::Correct {
            return Ok(false);
        }
        self.reveal[position] = None;
        self.feedback[position] = Feedback::Neutral;
        self.unlocked.insert(position);
        Ok(true)
    }

    /// Whole-sentence guess, compared ignoring spacing, `!?.,` and case.
    pub fn submit_guess(&mut self, guess: &str) -> Result<GuessOutcome> {
        self.expect_stage(Stage::Quiz)?;

        self.attempts += 1;
        let sentence: String = self.sentence.iter().collect();
        if normalize_guess(guess) != normalize_guess(&sentence) {
            return Ok(GuessOutcome::Retry { similarity: similarity(&sentence, guess) });
        }

        for clue_index in 0..self.clues().len() {
            if !self.clues()[clue_index].solved {
                self.solve_clue(clue_index, guess.to_string());
            }
        }
        for i in 0..self.sentence.len() {
            if self.sentence[i] != ' ' {
                self.reveal[i] = Some(self.sentence[i]);
                self.feedback[i] = Feedback::Correct;
            }
        }
        self.finish();
        Ok(GuessOutcome::Solved)
    }

    /// Unsolved items a hint could reveal right now.
    pub fn request_hint(&self) -> Result<Vec<HintCandidate>> {
        self.expect_hint_allowed()?;

        let candidates: Vec<HintCandidate> = match self.mode() {
            Some(GameMode::Word) => self
                .clues()
                .iter()
                .enumerate()
                .filter(|(_, c)| !c.solved)
                .map(|(i, c)| HintCandidate {
                    id: HintId::Clue(i),
                    display_text: format!("\"{}\" ({}글자)", c.meaning, c.clue_word.chars().count()),
                    answer: c.clue_word.clone(),
                })
                .collect(),
            _ => self
                .sentence
                .iter()
                .enumerate()
                .filter(|&(i, &c)| c != ' ' && self.feedback[i] != Feedback::Correct)
                .map(|(i, &c)| HintCandidate {
                    id: HintId::Character(i),
                    display_text: format!("{}번째 글자", i + 1),
                    answer: c.to_string(),
                })
                .collect(),
        };
        Ok(candidates)
    }

    /// Spend one hint on `id`. Irrevocable.
    pub fn apply_hint(&mut self, id: HintId) -> Result<HintOutcome> {
        let candidate = self
            .request_hint()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or(PuzzleError::UnknownHint(id))?;

        self.hints_used += 1;
        match id {
            HintId::Clue(i) => self.solve_clue(i, candidate.answer.clone()),
            HintId::Character(i) => {
                self.reveal[i] = Some(self.sentence[i]);
                self.feedback[i] = Feedback::Correct;
                self.unlocked.remove(&i);
                self.pinned.insert(i);
            }
        }
        log::debug!("hint {} applied ({}/{})", id, self.hints_used, self.config.max_hints);

        Ok(HintOutcome {
            id,
            answer: candidate.answer,
            hints_remaining: self.hints_remaining(),
            completed: self.check_completion(),
        })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn expect_stage(&self, expected: Stage) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(PuzzleError::WrongStage { expected, actual: self.stage })
        }
    }

    fn expect_mode(&self, allowed: impl Fn(GameMode) -> bool) -> Result<()> {
        match self.mode() {
            Some(mode) if allowed(mode) => Ok(()),
            Some(mode) => Err(PuzzleError::WrongMode { mode }),
            None => Err(PuzzleError::WrongStage { expected: Stage::Quiz, actual: self.stage }),
        }
    }

    fn expect_position(&self, position: usize) -> Result<()> {
        if position < self.sentence.len() {
            Ok(())
        } else {
            Err(PuzzleError::PositionOutOfRange(position))
        }
    }

    fn expect_hint_allowed(&self) -> Result<()> {
        match self.stage {
            Stage::Result => return Err(PuzzleError::SessionComplete),
            Stage::Input => {
                return Err(PuzzleError::WrongStage { expected: Stage::Quiz, actual: Stage::Input })
            }
            Stage::Quiz => {}
        }
        if self.hints_used >= self.config.max_hints {
            return Err(PuzzleError::HintBudgetExhausted {
                used: self.hints_used,
                max: self.config.max_hints,
            });
        }
        Ok(())
    }

    fn is_locked(&self, position: usize) -> bool {
        self.pinned.contains(&position)
            || (self.feedback[position] == Feedback::Correct && !self.unlocked.contains(&position))
    }

    /// Store the player's value and recompute that position's feedback.
    fn write_cell(&mut self, position: usize, value: Option<char>) -> Feedback {
        let expected = self.sentence[position];
        self.reveal[position] = match value {
            None if expected == ' ' => Some(' '),
            other => other,
        };
        let verdict = feedback_for(expected, value);
        self.feedback[position] = verdict;
        if verdict == Feedback::Correct {
            self.unlocked.remove(&position);
        }
        verdict
    }

    fn solve_clue(&mut self, clue_index: usize, input: String) {
        let Some(clues) = self.puzzle.as_mut().and_then(Puzzle::clues_mut) else {
            return;
        };
        let Some(clue) = clues.get_mut(clue_index) else {
            return;
        };
        clue.solved = true;
        clue.user_input = Some(input);
        let positions = clue.positions.clone();
        log::debug!("clue {} solved ('{}')", clue_index, clue.target_char);

        for i in positions {
            if let Some(&c) = self.sentence.get(i) {
                self.reveal[i] = Some(c);
                self.feedback[i] = Feedback::Correct;
            }
        }
    }

    fn is_complete(&self) -> bool {
        match self.mode() {
            Some(GameMode::Word) => self.clues().iter().all(|c| c.solved),
            Some(_) => self
                .sentence
                .iter()
                .zip(&self.feedback)
                .all(|(&c, &f)| c == ' ' || f == Feedback::Correct),
            None => false,
        }
    }

    /// Move to `result` if the puzzle is solved. Returns whether it did.
    fn check_completion(&mut self) -> bool {
        if self.stage == Stage::Quiz && self.is_complete() {
            self.finish();
            true
        } else {
            false
        }
    }

    fn finish(&mut self) {
        self.stage = Stage::Result;
        if let Some(p) = &self.puzzle {
            log::info!("puzzle {} solved after {} attempts", p.puzzle_id, self.attempts);
        }
    }
}
