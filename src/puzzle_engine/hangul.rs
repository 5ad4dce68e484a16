//! Hangul syllable classification and initial-consonant extraction.
//!
//! Complete syllables occupy U+AC00..=U+D7A3 and are laid out as
//! `base + (initial * 21 + medial) * 28 + final`, so the initial consonant
//! index is `(code - base) / 588`.

/// First complete syllable (가).
const SYLLABLE_BASE: u32 = 0xAC00;
/// Last complete syllable (힣).
const SYLLABLE_LAST: u32 = 0xD7A3;

/// Syllables sharing one initial consonant: 21 medials × 28 finals.
const SYLLABLES_PER_INITIAL: u32 = 21 * 28;

/// The 19 initial consonants as compatibility jamo, in syllable-table order.
#[rustfmt::skip]
pub const INITIAL_CONSONANTS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ',
    'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// True iff `c` is a complete Hangul syllable (가..=힣).
pub fn is_complete_hangul(c: char) -> bool {
    (SYLLABLE_BASE..=SYLLABLE_LAST).contains(&(c as u32))
}

/// Leading consonant jamo of a complete syllable; `None` for anything else.
pub fn decompose_initial(c: char) -> Option<char> {
    if !is_complete_hangul(c) {
        return None;
    }
    let index = (c as u32 - SYLLABLE_BASE) / SYLLABLES_PER_INITIAL;
    INITIAL_CONSONANTS.get(index as usize).copied()
}

/// True for a standalone consonant jamo (ㄱ..=ㅎ, compatibility block).
pub fn is_consonant_jamo(c: char) -> bool {
    ('\u{3131}'..='\u{314E}').contains(&c)
}

/// True for a standalone vowel jamo (ㅏ..=ㅣ, compatibility block).
pub fn is_vowel_jamo(c: char) -> bool {
    ('\u{314F}'..='\u{3163}').contains(&c)
}

/// True if `c` is one of the 19 initial consonants.
pub fn is_initial_consonant(c: char) -> bool {
    INITIAL_CONSONANTS.contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_of_plain_syllables() {
        assert_eq!(decompose_initial('가'), Some('ㄱ'));
        assert_eq!(decompose_initial('나'), Some('ㄴ'));
        assert_eq!(decompose_initial('한'), Some('ㅎ'));
        assert_eq!(decompose_initial('글'), Some('ㄱ'));
    }

    #[test]
    fn initial_of_table_edges() {
        assert_eq!(decompose_initial('가'), Some('ㄱ')); // U+AC00
        assert_eq!(decompose_initial('힣'), Some('ㅎ')); // U+D7A3
        assert_eq!(decompose_initial('까'), Some('ㄲ'));
        assert_eq!(decompose_initial('쌀'), Some('ㅆ'));
    }

    #[test]
    fn non_syllables_have_no_initial() {
        for c in ['a', '1', ' ', 'ㄱ', 'ㅏ', '!', '漢'] {
            assert_eq!(decompose_initial(c), None, "{c:?}");
            assert!(!is_complete_hangul(c), "{c:?}");
        }
    }

    #[test]
    fn jamo_classification() {
        assert!(is_consonant_jamo('ㄱ'));
        assert!(is_consonant_jamo('ㅎ'));
        assert!(!is_consonant_jamo('ㅏ'));
        assert!(is_vowel_jamo('ㅏ'));
        assert!(is_vowel_jamo('ㅣ'));
        assert!(!is_vowel_jamo('가'));
        // ㄳ is a consonant jamo but never an initial
        assert!(is_consonant_jamo('ㄳ'));
        assert!(!is_initial_consonant('ㄳ'));
    }
}
