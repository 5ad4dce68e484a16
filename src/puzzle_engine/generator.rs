use rand::{rngs::StdRng, Rng, SeedableRng};
use rand::RngCore;

use crate::config::GameConfig;
use crate::puzzle_engine::{
    dictionary::Dictionary,
    error::{PuzzleError, Result},
    models::{GameMode, Puzzle, PuzzleBoard, PuzzleRequest},
    transform::{
        generate_word_mode_clues, shuffle_standing_hints, to_consonant_sentence,
        to_shuffled_sentence, uncovered_positions,
    },
};

/// Generate a unique puzzle ID from mode + seed.
fn make_puzzle_id(mode: GameMode, rng: &mut impl RngCore) -> String {
    format!("{}-{:08X}", mode.id_prefix(), rng.next_u32())
}

/// Core dispatch with default tunables.
pub fn generate_puzzle(request: PuzzleRequest, dictionary: &Dictionary) -> Result<Puzzle> {
    generate_puzzle_with_config(request, dictionary, &GameConfig::default())
}

/// Core dispatch: seeds the RNG and routes to the mode's transformer.
pub fn generate_puzzle_with_config(
    request: PuzzleRequest,
    dictionary: &Dictionary,
    config: &GameConfig,
) -> Result<Puzzle> {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    generate_puzzle_with_rng(
        &request.sentence,
        request.mode,
        dictionary,
        &mut rng,
        config.shuffle_hint_block,
    )
}

/// Injectable-RNG form. `shuffle_block` is the number of words per
/// standing-hint block in shuffle mode.
pub fn generate_puzzle_with_rng<R: Rng>(
    sentence: &str,
    mode: GameMode,
    dictionary: &Dictionary,
    rng: &mut R,
    shuffle_block: usize,
) -> Result<Puzzle> {
    let puzzle_id = make_puzzle_id(mode, rng);

    let board = match mode {
        GameMode::Word => {
            let clues = generate_word_mode_clues(sentence, dictionary, rng);
            if clues.is_empty() {
                log::warn!("no clue words for {:?}", sentence);
                return Err(PuzzleError::NoClues);
            }
            let auto_revealed = uncovered_positions(sentence, &clues);
            PuzzleBoard::Word { clues, auto_revealed }
        }

        GameMode::Consonant => PuzzleBoard::Consonant {
            consonants: to_consonant_sentence(sentence),
        },

        GameMode::Shuffle => {
            let shuffled = to_shuffled_sentence(sentence, rng);
            log::debug!("shuffled {:?} -> {:?}", sentence, shuffled);
            PuzzleBoard::Shuffle {
                shuffled,
                standing_hints: shuffle_standing_hints(sentence, shuffle_block),
            }
        }
    };

    log::debug!("generated {}", puzzle_id);
    Ok(Puzzle { puzzle_id, mode, sentence: sentence.to_string(), board })
}
