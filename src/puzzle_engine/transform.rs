//! Pure sentence → puzzle transformations.
//!
//! None of these functions touch session state. Randomness always comes from
//! the caller's `rng`, so a seeded `StdRng` reproduces the same puzzle.

use std::collections::HashSet;

use rand::Rng;

use crate::puzzle_engine::{
    dictionary::{find_words_containing, Dictionary},
    hangul::decompose_initial,
    models::ClueWord,
};

/// In-place Fisher-Yates shuffle.
pub fn fisher_yates<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Replace every syllable with its initial consonant.
///
/// Spaces are kept; any other character is dropped.
pub fn to_consonant_sentence(sentence: &str) -> String {
    sentence
        .chars()
        .filter_map(|c| if c == ' ' { Some(' ') } else { decompose_initial(c) })
        .collect()
}

/// Shuffle the non-space characters and put them back into the original
/// space skeleton. The result may equal the input.
pub fn to_shuffled_sentence<R: Rng>(sentence: &str, rng: &mut R) -> String {
    let mut letters: Vec<char> = sentence.chars().filter(|&c| c != ' ').collect();
    fisher_yates(&mut letters, rng);

    let mut shuffled = letters.into_iter();
    sentence
        .chars()
        .map(|c| if c == ' ' { ' ' } else { shuffled.next().unwrap_or(c) })
        .collect()
}

/// One clue per distinct non-space character, in first-occurrence order.
///
/// Each clue claims every occurrence of its character that no earlier clue
/// claimed. Characters without a dictionary word of 2+ syllables, or with
/// nothing left to claim, get no clue; their positions are auto-revealed.
pub fn generate_word_mode_clues<R: Rng>(
    sentence: &str,
    dictionary: &Dictionary,
    rng: &mut R,
) -> Vec<ClueWord> {
    let chars: Vec<char> = sentence.chars().collect();
    let mut seen = HashSet::new();
    let mut claimed: HashSet<usize> = HashSet::new();
    let mut clues = Vec::new();

    for &target in chars.iter().filter(|&&c| c != ' ') {
        if !seen.insert(target) {
            continue;
        }

        let candidates = find_words_containing(target, dictionary);
        if candidates.is_empty() {
            log::warn!("no dictionary word contains '{}'; revealing it", target);
            continue;
        }
        let entry = candidates[rng.gen_range(0..candidates.len())];

        let positions: Vec<usize> = chars
            .iter()
            .enumerate()
            .filter(|&(i, &c)| c == target && !claimed.contains(&i))
            .map(|(i, _)| i)
            .collect();
        if positions.is_empty() {
            continue;
        }
        claimed.extend(positions.iter().copied());

        log::debug!("clue for '{}': {} {:?}", target, entry.word, positions);
        clues.push(ClueWord {
            target_char: target,
            clue_word: entry.word.clone(),
            meaning: entry.meaning.clone(),
            positions,
            solved: false,
            user_input: None,
        });
    }

    clues
}

/// Non-space positions that no clue claims, ascending.
pub fn uncovered_positions(sentence: &str, clues: &[ClueWord]) -> Vec<usize> {
    let claimed: HashSet<usize> = clues.iter().flat_map(|c| c.positions.iter().copied()).collect();
    sentence
        .chars()
        .enumerate()
        .filter(|&(i, c)| c != ' ' && !claimed.contains(&i))
        .map(|(i, _)| i)
        .collect()
}

/// Position of the first character of every `block`-word group.
pub fn shuffle_standing_hints(sentence: &str, block: usize) -> Vec<usize> {
    if block == 0 {
        return Vec::new();
    }
    let mut hints = Vec::new();
    let mut offset = 0;
    for (i, word) in sentence.split(' ').enumerate() {
        if i % block == 0 && !word.is_empty() {
            hints.push(offset);
        }
        offset += word.chars().count() + 1;
    }
    hints
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spaces(s: &str) -> Vec<usize> {
        s.chars().enumerate().filter(|&(_, c)| c == ' ').map(|(i, _)| i).collect()
    }

    fn sorted_letters(s: &str) -> Vec<char> {
        let mut v: Vec<char> = s.chars().filter(|&c| c != ' ').collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn consonant_sentence_keeps_spaces() {
        assert_eq!(to_consonant_sentence("사과는 맛있다"), "ㅅㄱㄴ ㅁㅇㄷ");
        assert_eq!(to_consonant_sentence("나는 학교에 간다"), "ㄴㄴ ㅎㄱㅇ ㄱㄷ");
    }

    #[test]
    fn consonant_sentence_drops_other_characters() {
        assert_eq!(to_consonant_sentence("가a나!"), "ㄱㄴ");
        assert_eq!(to_consonant_sentence("   "), "   ");
        assert_eq!(to_consonant_sentence(""), "");
    }

    #[test]
    fn shuffle_preserves_skeleton_and_letters() {
        let sentence = "오늘 날씨가 정말 좋다";
        for seed in [1u64, 2, 3, 42] {
            let mut rng = StdRng::seed_from_u64(seed);
            let shuffled = to_shuffled_sentence(sentence, &mut rng);
            assert_eq!(shuffled.chars().count(), sentence.chars().count());
            assert_eq!(spaces(&shuffled), spaces(sentence));
            assert_eq!(sorted_letters(&shuffled), sorted_letters(sentence));
        }
    }

    #[test]
    fn shuffle_is_deterministic_with_seed() {
        let make = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            to_shuffled_sentence("하늘이 맑고 바람이 시원하다", &mut rng)
        };
        assert_eq!(make(7), make(7));
    }

    #[test]
    fn fisher_yates_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut items: Vec<u32> = (0..20).collect();
        fisher_yates(&mut items, &mut rng);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn repeated_character_gets_one_clue_with_all_positions() {
        let d = Dictionary::from_pairs([("가방", "들고 다니는 것"), ("나무", "식물"), ("다리", "건너는 것")]);
        let mut rng = StdRng::seed_from_u64(0);
        let clues = generate_word_mode_clues("가나가다", &d, &mut rng);

        assert_eq!(clues.len(), 3);
        assert_eq!(clues[0].target_char, '가');
        assert_eq!(clues[0].positions, vec![0, 2]);
        assert_eq!(clues[1].positions, vec![1]);
        assert_eq!(clues[2].positions, vec![3]);
        assert!(clues.iter().all(|c| !c.solved && c.clue_word.contains(c.target_char)));
    }

    #[test]
    fn uncoverable_characters_are_auto_revealed() {
        let d = Dictionary::from_pairs([("나무", "식물")]);
        let mut rng = StdRng::seed_from_u64(0);
        let clues = generate_word_mode_clues("가나 다나", &d, &mut rng);
        assert_eq!(clues.len(), 1);
        assert_eq!(clues[0].positions, vec![1, 4]);
        assert_eq!(uncovered_positions("가나 다나", &clues), vec![0, 3]);
    }

    #[test]
    fn empty_dictionary_yields_no_clues() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate_word_mode_clues("가나다라", &Dictionary::new(), &mut rng).is_empty());
    }

    #[test]
    fn standing_hints_mark_every_third_word() {
        // words start at 0, 3, 7, 10, 13
        let s = "나는 오늘도 밥을 먹고 잤다";
        assert_eq!(shuffle_standing_hints(s, 3), vec![0, 10]);
        assert_eq!(shuffle_standing_hints(s, 1), vec![0, 3, 7, 10, 13]);
        assert!(shuffle_standing_hints(s, 0).is_empty());
    }
}
