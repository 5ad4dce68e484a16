//! Word → meaning table and the lookups built on it.
//!
//! The dictionary is always passed in explicitly; nothing in the engine reads
//! a global table. Besides the substring lookup used by word mode, this module
//! holds the letter-cover quiz: pick dictionary words that can be spelled from
//! the sentence's own syllables, then pad the leftovers with mixed clues.

use std::collections::{HashMap, HashSet};

use rand::Rng;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::puzzle_engine::{
    error::{PuzzleError, Result},
    hangul::is_complete_hangul,
    helpers::normalize_clue_answer,
    transform::fisher_yates,
};

/// Starter table shipped with the crate (`data/dictionary.json`).
pub const STARTER_DICTIONARY_JSON: &str = include_str!("../../data/dictionary.json");

/// Longest dictionary word considered for a mixed clue.
const MIXED_MAX_WORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    pub word: String,
    pub meaning: String,
}

impl DictEntry {
    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.word.chars().count()
    }
}

/// Insertion-ordered word → meaning mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: Vec<DictEntry>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(word, meaning)` pairs. A repeated word keeps its first
    /// position and takes the later meaning.
    pub fn from_pairs<I, W, M>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (W, M)>,
        W: Into<String>,
        M: Into<String>,
    {
        let mut dict = Self::new();
        for (word, meaning) in pairs {
            dict.insert(word, meaning);
        }
        dict
    }

    /// Parse a JSON object of `"word": "meaning"` pairs, keeping file order.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let table: Map<String, Value> = serde_json::from_str(json)?;
        let mut dict = Self::new();
        for (word, meaning) in table {
            match meaning {
                Value::String(meaning) => dict.insert(word, meaning),
                other => {
                    return Err(serde_json::Error::custom(format!(
                        "meaning of '{word}' must be a string, got {other}"
                    )))
                }
            }
        }
        Ok(dict)
    }

    /// The table bundled with the crate.
    pub fn starter() -> serde_json::Result<Self> {
        Self::from_json_str(STARTER_DICTIONARY_JSON)
    }

    pub fn insert(&mut self, word: impl Into<String>, meaning: impl Into<String>) {
        let word = word.into();
        let meaning = meaning.into();
        match self.index.get(&word) {
            Some(&i) => self.entries[i].meaning = meaning,
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push(DictEntry { word, meaning });
            }
        }
    }

    /// Merge another table in; its meanings win on conflicts.
    pub fn merge(&mut self, other: Dictionary) {
        for entry in other.entries {
            self.insert(entry.word, entry.meaning);
        }
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.index.get(word).map(|&i| self.entries[i].meaning.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DictEntry> {
        self.entries.iter()
    }
}

/// Every entry of two or more characters that contains `ch`.
pub fn find_words_containing(ch: char, dictionary: &Dictionary) -> Vec<&DictEntry> {
    dictionary
        .iter()
        .filter(|e| e.word.contains(ch) && e.char_len() >= 2)
        .collect()
}

// ---------------------------------------------------------------------------
// Letter-cover quiz
// ---------------------------------------------------------------------------

/// One complete syllable taken from the sentence, with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceLetter {
    pub ch: char,
    pub position: usize,
}

/// Complete syllables of `sentence` in order; everything else is skipped.
pub fn extract_letters(sentence: &str) -> Vec<SentenceLetter> {
    sentence
        .chars()
        .enumerate()
        .filter(|&(_, ch)| is_complete_hangul(ch))
        .map(|(position, ch)| SentenceLetter { ch, position })
        .collect()
}

pub fn count_letters(chars: impl IntoIterator<Item = char>) -> HashMap<char, usize> {
    let mut counts = HashMap::new();
    for ch in chars {
        *counts.entry(ch).or_insert(0) += 1;
    }
    counts
}

/// True if every letter of `word` is available at least as many times as
/// the word uses it.
pub fn can_form_word(word: &str, available: &HashMap<char, usize>) -> bool {
    count_letters(word.chars())
        .iter()
        .all(|(ch, &needed)| available.get(ch).copied().unwrap_or(0) >= needed)
}

/// Dictionary words (2+ characters) spellable from `letters`, longest first.
pub fn find_formable_words<'a>(
    letters: &[SentenceLetter],
    dictionary: &'a Dictionary,
) -> Vec<&'a DictEntry> {
    let available = count_letters(letters.iter().map(|l| l.ch));
    let mut words: Vec<&DictEntry> = dictionary
        .iter()
        .filter(|e| e.char_len() >= 2 && can_form_word(&e.word, &available))
        .collect();
    words.sort_by(|a, b| b.char_len().cmp(&a.char_len()));
    words
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LetterSource {
    /// Taken from the sentence at `position`.
    Original { position: usize },
    /// Supplied by the dictionary word; shown to the player as-is.
    Filler,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSlot {
    pub ch: char,
    pub source: LetterSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterClueKind {
    /// Spelled entirely from sentence letters.
    Full,
    /// Sentence letters plus dictionary filler.
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterClue {
    pub word: String,
    pub meaning: String,
    pub kind: LetterClueKind,
    pub slots: Vec<LetterSlot>,
    pub solved: bool,
}

impl LetterClue {
    /// Sentence positions this clue reveals when solved.
    pub fn original_positions(&self) -> Vec<usize> {
        self.slots
            .iter()
            .filter_map(|s| match s.source {
                LetterSource::Original { position } => Some(position),
                LetterSource::Filler => None,
            })
            .collect()
    }

    /// Word with sentence letters blanked out (`_`) and filler shown.
    pub fn masked(&self) -> String {
        self.slots
            .iter()
            .map(|s| match s.source {
                LetterSource::Original { .. } => '_',
                LetterSource::Filler => s.ch,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterQuiz {
    pub clues: Vec<LetterClue>,
    /// Sentence letters no clue consumed; revealed immediately.
    pub reveal_now: Vec<SentenceLetter>,
}

impl LetterQuiz {
    /// Guess the word of clue `index`. A match marks the clue solved; an
    /// already solved clue answers `true` again without changing anything.
    pub fn submit(&mut self, index: usize, guess: &str) -> Result<bool> {
        let clue = self.clues.get_mut(index).ok_or(PuzzleError::ClueOutOfRange(index))?;
        if clue.solved {
            return Ok(true);
        }
        if normalize_clue_answer(guess) != normalize_clue_answer(&clue.word) {
            return Ok(false);
        }
        clue.solved = true;
        log::debug!("letter quiz: clue {} solved", clue.word);
        Ok(true)
    }

    /// Sentence positions shown so far: leftovers plus solved clues, sorted.
    pub fn revealed_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self
            .reveal_now
            .iter()
            .map(|l| l.position)
            .chain(self.clues.iter().filter(|c| c.solved).flat_map(|c| c.original_positions()))
            .collect();
        positions.sort_unstable();
        positions
    }

    pub fn is_complete(&self) -> bool {
        self.clues.iter().all(|c| c.solved)
    }
}

/// Greedily consume `word`'s letters from `pool`. Returns the slots and the
/// pool left over. Letters not found in the pool become filler.
fn take_letters(word: &str, pool: &[SentenceLetter]) -> (Vec<LetterSlot>, Vec<SentenceLetter>) {
    let mut remaining = pool.to_vec();
    let slots = word
        .chars()
        .map(|ch| match remaining.iter().position(|l| l.ch == ch) {
            Some(i) => {
                let letter = remaining.remove(i);
                LetterSlot { ch, source: LetterSource::Original { position: letter.position } }
            }
            None => LetterSlot { ch, source: LetterSource::Filler },
        })
        .collect();
    (slots, remaining)
}

fn originals_in(slots: &[LetterSlot]) -> usize {
    slots
        .iter()
        .filter(|s| matches!(s.source, LetterSource::Original { .. }))
        .count()
}

/// Build a letter-cover quiz for `sentence`.
///
/// Pass 1 takes the longest fully spellable words (ties in random order),
/// consuming sentence letters as it goes. Pass 2 repeatedly picks the mixed
/// clue that consumes the most remaining letters, preferring shorter words on
/// ties, until nothing more can be consumed or `remaining × dictionary size`
/// rounds have run. Leftover letters land in `reveal_now`.
pub fn build_letter_quiz<R: Rng>(
    sentence: &str,
    dictionary: &Dictionary,
    rng: &mut R,
) -> LetterQuiz {
    let mut pool = extract_letters(sentence);
    let mut clues = Vec::new();
    let mut used: HashSet<&str> = HashSet::new();

    let mut candidates = find_formable_words(&pool, dictionary);
    fisher_yates(&mut candidates, rng);
    candidates.sort_by(|a, b| b.char_len().cmp(&a.char_len()));

    for entry in candidates {
        if used.contains(entry.word.as_str()) {
            continue;
        }
        let (slots, remaining) = take_letters(&entry.word, &pool);
        if originals_in(&slots) != slots.len() {
            continue;
        }
        log::debug!("letter quiz: full clue {}", entry.word);
        clues.push(LetterClue {
            word: entry.word.clone(),
            meaning: entry.meaning.clone(),
            kind: LetterClueKind::Full,
            slots,
            solved: false,
        });
        used.insert(entry.word.as_str());
        pool = remaining;
    }

    let max_rounds = pool.len() * dictionary.len();
    let mut rounds = 0;
    while !pool.is_empty() && rounds < max_rounds {
        rounds += 1;

        let mut best: Option<(&DictEntry, Vec<LetterSlot>, Vec<SentenceLetter>, usize)> = None;
        for entry in dictionary.iter() {
            let len = entry.char_len();
            if !(2..=MIXED_MAX_WORD_LEN).contains(&len) || used.contains(entry.word.as_str()) {
                continue;
            }
            let (slots, remaining) = take_letters(&entry.word, &pool);
            let originals = originals_in(&slots);
            let filler = slots.len() - originals;
            if originals == 0 || originals * 2 < filler {
                continue;
            }
            let better = match &best {
                None => true,
                Some((b_entry, _, _, b_originals)) => {
                    originals > *b_originals
                        || (originals == *b_originals && len < b_entry.char_len())
                }
            };
            if better {
                best = Some((entry, slots, remaining, originals));
            }
        }

        let Some((entry, slots, remaining, _)) = best else {
            break;
        };
        log::debug!("letter quiz: mixed clue {}", entry.word);
        clues.push(LetterClue {
            word: entry.word.clone(),
            meaning: entry.meaning.clone(),
            kind: LetterClueKind::Mixed,
            slots,
            solved: false,
        });
        used.insert(entry.word.as_str());
        pool = remaining;
    }

    LetterQuiz { clues, reveal_now: pool }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dict(pairs: &[(&str, &str)]) -> Dictionary {
        Dictionary::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn insert_keeps_first_position_and_last_meaning() {
        let d = dict(&[("사과", "과일"), ("학교", "배우는 곳"), ("사과", "잘못을 빎")]);
        assert_eq!(d.len(), 2);
        assert_eq!(d.get("사과"), Some("잘못을 빎"));
        assert_eq!(d.iter().next().map(|e| e.word.as_str()), Some("사과"));
    }

    #[test]
    fn json_object_loads() {
        let d = Dictionary::from_json_str(r#"{"나무": "식물", "바다": "큰 물"}"#).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.get("바다"), Some("큰 물"));
        assert!(Dictionary::from_json_str("[1, 2]").is_err());
    }

    #[test]
    fn json_object_keeps_file_order() {
        let d = Dictionary::from_json_str(r#"{"학교": "a", "가방": "b", "나무": "c"}"#).unwrap();
        let words: Vec<&str> = d.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["학교", "가방", "나무"]);
        assert!(Dictionary::from_json_str(r#"{"학교": 3}"#).is_err());
    }

    #[test]
    fn starter_dictionary_parses() {
        let d = Dictionary::starter().unwrap();
        assert!(d.len() > 50);
        assert!(d.iter().all(|e| !e.word.is_empty() && !e.meaning.is_empty()));
    }

    #[test]
    fn merge_overrides_meanings() {
        let mut a = dict(&[("나무", "식물")]);
        a.merge(dict(&[("나무", "목재"), ("바다", "큰 물")]));
        assert_eq!(a.get("나무"), Some("목재"));
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn containing_filter_skips_single_syllables() {
        let d = dict(&[("가", "성씨"), ("가방", "물건을 넣는 것"), ("나라", "국가"), ("가나", "국가 이름")]);
        let words: Vec<&str> = find_words_containing('가', &d).iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["가방", "가나"]);
        assert!(find_words_containing('힣', &d).is_empty());
    }

    #[test]
    fn can_form_word_respects_counts() {
        let available = count_letters("가나다가".chars());
        assert!(can_form_word("가나", &available));
        assert!(can_form_word("가가", &available));
        assert!(!can_form_word("나나", &available));
        assert!(!can_form_word("라면", &available));
    }

    #[test]
    fn extract_letters_keeps_positions() {
        let letters = extract_letters("나는 학교!");
        let positions: Vec<usize> = letters.iter().map(|l| l.position).collect();
        assert_eq!(positions, vec![0, 1, 3, 4]);
    }

    #[test]
    fn formable_words_sorted_longest_first() {
        let d = dict(&[("학교", "배우는 곳"), ("나는학교", "장난"), ("교실", "방")]);
        let words: Vec<&str> = find_formable_words(&extract_letters("나는 학교"), &d)
            .iter()
            .map(|e| e.word.as_str())
            .collect();
        assert_eq!(words, vec!["나는학교", "학교"]);
    }

    #[test]
    fn letter_quiz_prefers_full_words_then_mixed() {
        // 학교 is spelled from the sentence; 나 + filler 라 forms 나라.
        let d = dict(&[("학교", "배우는 곳"), ("나라", "국가"), ("는개", "안개비")]);
        let mut rng = StdRng::seed_from_u64(1);
        let quiz = build_letter_quiz("나는 학교", &d, &mut rng);

        assert_eq!(quiz.clues[0].word, "학교");
        assert_eq!(quiz.clues[0].kind, LetterClueKind::Full);
        assert_eq!(quiz.clues[0].original_positions(), vec![3, 4]);

        let mixed: Vec<&LetterClue> =
            quiz.clues.iter().filter(|c| c.kind == LetterClueKind::Mixed).collect();
        assert_eq!(mixed.len(), 2);
        // tie on one original letter each; 나라 and 는개 are both two long,
        // dictionary order decides
        assert_eq!(mixed[0].word, "나라");
        assert_eq!(mixed[0].masked(), "_라");
        assert_eq!(mixed[1].word, "는개");
        assert!(quiz.reveal_now.is_empty());
    }

    #[test]
    fn letter_quiz_never_invents_sentence_letters() {
        let d = Dictionary::starter().unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let sentence = "오늘 날씨가 좋아서 공원에 갔다";
        let quiz = build_letter_quiz(sentence, &d, &mut rng);

        let mut seen = HashSet::new();
        let chars: Vec<char> = sentence.chars().collect();
        for clue in &quiz.clues {
            for slot in &clue.slots {
                if let LetterSource::Original { position } = slot.source {
                    assert_eq!(chars[position], slot.ch);
                    assert!(seen.insert(position), "position {position} used twice");
                }
            }
        }
        for letter in &quiz.reveal_now {
            assert!(seen.insert(letter.position));
        }
        assert_eq!(seen.len(), extract_letters(sentence).len());
    }

    #[test]
    fn letter_clues_are_solved_by_guessing_the_word() {
        let d = dict(&[("학교", "배우는 곳"), ("나라", "국가"), ("는개", "안개비")]);
        let mut rng = StdRng::seed_from_u64(1);
        let mut quiz = build_letter_quiz("나는 학교", &d, &mut rng);
        assert!(quiz.revealed_positions().is_empty());

        assert!(!quiz.submit(0, "학원").unwrap());
        assert!(!quiz.clues[0].solved);
        assert!(quiz.submit(0, " 학 교! ").unwrap());
        assert!(quiz.clues[0].solved);
        assert!(quiz.submit(0, "아무거나").unwrap());
        assert_eq!(quiz.revealed_positions(), vec![3, 4]);
        assert!(!quiz.is_complete());

        assert!(quiz.submit(1, "나라").unwrap());
        assert!(quiz.submit(2, "는개").unwrap());
        assert!(quiz.is_complete());
        assert_eq!(quiz.revealed_positions(), vec![0, 1, 3, 4]);
        assert_eq!(quiz.submit(3, "학교"), Err(PuzzleError::ClueOutOfRange(3)));
    }

    #[test]
    fn letter_quiz_with_empty_dictionary_reveals_everything() {
        let mut rng = StdRng::seed_from_u64(3);
        let quiz = build_letter_quiz("가나다 라마", &Dictionary::new(), &mut rng);
        assert!(quiz.clues.is_empty());
        assert_eq!(quiz.reveal_now.len(), 5);
    }
}
