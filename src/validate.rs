//! Sentence input boundary.
//!
//! Everything the engine receives has passed through [`validate_sentence`];
//! the engine itself assumes a clean sentence of complete syllables and
//! single spaces.

use crate::config::GameConfig;
use crate::puzzle_engine::{
    error::{PuzzleError, Result},
    hangul::{is_complete_hangul, is_consonant_jamo, is_vowel_jamo},
};

/// Punctuation removed before any other rule is checked.
const STRIPPED_PUNCTUATION: [char; 4] = ['.', '!', '?', ','];

/// Where a sentence came from. Daily challenges skip the length rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceOrigin {
    Custom,
    Daily,
}

/// Strip `.!?,`, collapse whitespace runs to one space, trim.
pub fn clean_sentence(input: &str) -> String {
    input
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Validate and clean a player-supplied sentence.
pub fn validate_sentence(input: &str, origin: SentenceOrigin, config: &GameConfig) -> Result<String> {
    let reject = |reason: &str| Err(PuzzleError::InvalidSentence(reason.to_string()));

    if input.trim().is_empty() {
        return reject("문장이 입력되지 않았습니다");
    }

    let cleaned = clean_sentence(input);
    let len = cleaned.chars().count();

    if origin == SentenceOrigin::Custom {
        if len > config.max_sentence_len {
            return reject(&format!("문장은 최대 {}자까지 입력 가능합니다", config.max_sentence_len));
        }
        if len < config.min_sentence_len {
            return reject(&format!("문장은 최소 {}자 이상 입력해야 합니다", config.min_sentence_len));
        }
    }

    let letters = || cleaned.chars().filter(|&c| c != ' ');
    if letters().all(is_consonant_jamo) || letters().all(is_vowel_jamo) {
        return reject("자음이나 모음만으로는 문제를 출제할 수 없습니다");
    }
    if !letters().all(is_complete_hangul) {
        return reject("완성된 한글과 공백만 사용할 수 있습니다");
    }
    if !letters().any(is_complete_hangul) {
        return reject("완성된 한글 글자가 하나 이상 필요합니다");
    }

    log::debug!("sentence accepted ({} chars)", len);
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(input: &str) -> Result<String> {
        validate_sentence(input, SentenceOrigin::Custom, &GameConfig::default())
    }

    fn is_invalid(r: Result<String>) -> bool {
        matches!(r, Err(PuzzleError::InvalidSentence(_)))
    }

    #[test]
    fn cleans_punctuation_and_spacing() {
        assert_eq!(custom("  오늘   날씨가, 좋아서 공원에 갔다!  ").unwrap(), "오늘 날씨가 좋아서 공원에 갔다");
        // exactly the floor after cleaning
        assert_eq!(custom("나는 학교에 간다요.").unwrap(), "나는 학교에 간다요");
        assert!(is_invalid(custom("나는 학교에 간다!")));
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(is_invalid(custom("")));
        assert!(is_invalid(custom("   ")));
        assert!(is_invalid(validate_sentence("...", SentenceOrigin::Daily, &GameConfig::default())));
    }

    #[test]
    fn length_rule_applies_to_custom_only() {
        assert!(is_invalid(custom("사과 맛")));
        assert!(is_invalid(custom(&"가".repeat(51))));
        assert_eq!(
            validate_sentence("사과 맛", SentenceOrigin::Daily, &GameConfig::default()).unwrap(),
            "사과 맛"
        );
        let relaxed = GameConfig::default().with_sentence_len(2, 80);
        assert!(validate_sentence("사과 맛", SentenceOrigin::Custom, &relaxed).is_ok());
    }

    #[test]
    fn rejects_foreign_characters() {
        assert!(is_invalid(custom("나는 학교에 3번 간다")));
        assert!(is_invalid(custom("나는 school에 간다요")));
        assert!(is_invalid(custom("나는 학교에 간닿ㅎ요")));
    }

    #[test]
    fn rejects_bare_jamo() {
        assert!(is_invalid(custom("ㄱㄴㄷㄹ ㅁㅂㅅㅇ ㅈㅊ")));
        assert!(is_invalid(custom("ㅏㅑㅓㅕ ㅗㅛㅜㅠ ㅡㅣ")));
    }
}
