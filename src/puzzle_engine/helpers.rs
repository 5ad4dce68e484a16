//! Answer normalisation and per-position feedback shared by the session.
//!
//! Clue answers and full-sentence guesses are compared after different
//! normalisations, matching what the player is allowed to type in each place.

use crate::puzzle_engine::{hangul::is_complete_hangul, models::Feedback};

/// Punctuation ignored in full-sentence guesses.
const GUESS_PUNCTUATION: [char; 4] = ['!', '?', '.', ','];

/// Normalise a clue-word answer: trim, lowercase, keep only ASCII
/// alphanumerics and complete syllables.
pub fn normalize_clue_answer(answer: &str) -> String {
    answer
        .trim()
        .to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || is_complete_hangul(c))
        .collect()
}

/// Normalise a full-sentence guess: drop whitespace and `!?.,`, lowercase.
pub fn normalize_guess(guess: &str) -> String {
    guess
        .chars()
        .filter(|c| !c.is_whitespace() && !GUESS_PUNCTUATION.contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// Verdict for one position given the expected character and what the
/// player has entered there.
pub fn feedback_for(expected: char, entered: Option<char>) -> Feedback {
    let entered = entered.filter(|c| !c.is_whitespace());
    match entered {
        None => Feedback::Neutral,
        Some(_) if expected == ' ' => Feedback::Incorrect,
        Some(c) if c == expected => Feedback::Correct,
        Some(_) => Feedback::Incorrect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clue_answer_strips_noise() {
        assert_eq!(normalize_clue_answer("  학교! "), "학교");
        assert_eq!(normalize_clue_answer("학 교"), "학교");
        assert_eq!(normalize_clue_answer("ㅎㄱ학교"), "학교");
        assert_eq!(normalize_clue_answer("TV방송"), "tv방송");
    }

    #[test]
    fn guess_ignores_spacing_and_punctuation() {
        assert_eq!(normalize_guess("나는 학교에 간다!"), "나는학교에간다");
        assert_eq!(normalize_guess("나는,학교에.간다?"), "나는학교에간다");
        assert_ne!(normalize_guess("나는 학교에 간다"), normalize_guess("나는 학교에 왔다"));
    }

    #[test]
    fn feedback_for_letters() {
        assert_eq!(feedback_for('가', None), Feedback::Neutral);
        assert_eq!(feedback_for('가', Some(' ')), Feedback::Neutral);
        assert_eq!(feedback_for('가', Some('가')), Feedback::Correct);
        assert_eq!(feedback_for('가', Some('나')), Feedback::Incorrect);
        assert_eq!(feedback_for('가', Some('ㄱ')), Feedback::Incorrect);
    }

    #[test]
    fn feedback_for_spaces() {
        assert_eq!(feedback_for(' ', None), Feedback::Neutral);
        assert_eq!(feedback_for(' ', Some(' ')), Feedback::Neutral);
        assert_eq!(feedback_for(' ', Some('가')), Feedback::Incorrect);
    }
}
