use std::collections::HashSet;

use chaeum::puzzle_engine::hangul::is_initial_consonant;
use chaeum::puzzle_engine::transform::{
    generate_word_mode_clues, to_consonant_sentence, to_shuffled_sentence, uncovered_positions,
};
use chaeum::{
    generate_puzzle, similarity, Dictionary, EditOutcome, GameMode, HintId, PuzzleRequest, Session,
    Stage,
};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

/// Sentences of 1–5 words, each 1–4 complete syllables.
fn hangul_sentence() -> impl Strategy<Value = String> {
    let syllable = (0xAC00u32..=0xD7A3).prop_filter_map("syllable", char::from_u32);
    let word = proptest::collection::vec(syllable, 1..5).prop_map(|w| w.into_iter().collect::<String>());
    proptest::collection::vec(word, 1..6).prop_map(|words| words.join(" "))
}

fn space_positions(s: &str) -> Vec<usize> {
    s.chars().enumerate().filter(|&(_, c)| c == ' ').map(|(i, _)| i).collect()
}

fn sorted_letters(s: &str) -> Vec<char> {
    let mut v: Vec<char> = s.chars().filter(|&c| c != ' ').collect();
    v.sort_unstable();
    v
}

/// A dictionary built from adjacent syllable pairs of the sentence, so most
/// syllables have at least one covering word.
fn pair_dictionary(sentence: &str) -> Dictionary {
    let mut dict = Dictionary::new();
    for word in sentence.split(' ') {
        let chars: Vec<char> = word.chars().collect();
        for pair in chars.windows(2) {
            dict.insert(pair.iter().collect::<String>(), "뜻");
        }
    }
    dict
}

proptest! {
    #[test]
    fn consonant_sentence_keeps_space_skeleton(s in hangul_sentence()) {
        let c = to_consonant_sentence(&s);
        prop_assert_eq!(c.chars().count(), s.chars().count());
        prop_assert_eq!(space_positions(&c), space_positions(&s));
        prop_assert!(c.chars().filter(|&ch| ch != ' ').all(is_initial_consonant));
    }

    #[test]
    fn shuffle_is_a_permutation(s in hangul_sentence(), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let shuffled = to_shuffled_sentence(&s, &mut rng);
        prop_assert_eq!(shuffled.chars().count(), s.chars().count());
        prop_assert_eq!(space_positions(&shuffled), space_positions(&s));
        prop_assert_eq!(sorted_letters(&shuffled), sorted_letters(&s));
    }

    #[test]
    fn similarity_bounds(s in hangul_sentence(), t in hangul_sentence()) {
        prop_assert_eq!(similarity(&s, &s), 100.0);
        prop_assert_eq!(similarity(&s, ""), 0.0);
        let score = similarity(&s, &t);
        prop_assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn word_clues_partition_non_space_positions(s in hangul_sentence(), seed in any::<u64>()) {
        let dict = pair_dictionary(&s);
        let mut rng = StdRng::seed_from_u64(seed);
        let clues = generate_word_mode_clues(&s, &dict, &mut rng);

        let mut seen = HashSet::new();
        for clue in &clues {
            prop_assert!(!clue.positions.is_empty());
            prop_assert!(clue.clue_word.contains(clue.target_char));
            for &pos in &clue.positions {
                prop_assert!(seen.insert(pos));
            }
        }
        for pos in uncovered_positions(&s, &clues) {
            prop_assert!(seen.insert(pos));
        }
        let non_space: HashSet<usize> =
            s.chars().enumerate().filter(|&(_, c)| c != ' ').map(|(i, _)| i).collect();
        prop_assert_eq!(seen, non_space);
    }

    #[test]
    fn hints_past_budget_are_no_ops(s in hangul_sentence(), extra in 1usize..5) {
        let puzzle = generate_puzzle(
            PuzzleRequest::new(s.clone(), GameMode::Consonant).with_seed(1),
            &Dictionary::new(),
        ).unwrap();
        let mut session = Session::default();
        session.start(puzzle).unwrap();

        for _ in 0..3 + extra {
            match session.request_hint() {
                Ok(candidates) => {
                    session.apply_hint(candidates[0].id).unwrap();
                }
                Err(_) => break,
            }
        }
        prop_assert!(session.hints_used() <= 3);

        let reveal = session.reveal_state().to_vec();
        let used = session.hints_used();
        for _ in 0..extra {
            prop_assert!(session.request_hint().is_err());
            prop_assert!(session.apply_hint(HintId::Character(0)).is_err());
        }
        prop_assert_eq!(session.reveal_state(), reveal.as_slice());
        prop_assert_eq!(session.hints_used(), used);
    }

    #[test]
    fn typing_the_sentence_always_completes(s in hangul_sentence(), seed in any::<u64>()) {
        let puzzle = generate_puzzle(
            PuzzleRequest::new(s.clone(), GameMode::Shuffle).with_seed(seed),
            &Dictionary::new(),
        ).unwrap();
        let mut session = Session::default();
        session.start(puzzle).unwrap();

        let mut last = None;
        for (i, c) in s.chars().enumerate() {
            if session.stage() == Stage::Quiz && c != ' ' && !session.is_pinned(i) {
                last = Some(session.set_character(i, Some(c)).unwrap());
            }
        }
        prop_assert_eq!(session.stage(), Stage::Result);
        if let Some(outcome) = last {
            prop_assert_eq!(outcome, EditOutcome::Completed);
        }
        prop_assert_eq!(session.progress(), 100.0);
    }
}
