use std::collections::HashSet;

// Blend weights for [`similarity`], in tenths.
const LEVENSHTEIN_WEIGHT: f64 = 7.0;
const JACCARD_WEIGHT: f64 = 3.0;

/// Edit distance between two character slices.
///
/// Single-row dynamic programming over the shorter slice, so memory is
/// O(min(len(a), len(b))).
pub fn levenshtein(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return long.len();
    }

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, &lc) in long.iter().enumerate() {
        // row[0] before overwrite is the diagonal for j = 0
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let substitution = diagonal + usize::from(lc != sc);
            let insertion = row[j + 1] + 1;
            let deletion = row[j] + 1;
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(insertion).min(deletion);
        }
    }
    row[short.len()]
}

/// |A ∩ B| / |A ∪ B| over the distinct characters of each slice.
/// Two empty slices score 0.
pub fn jaccard(a: &[char], b: &[char]) -> f64 {
    let set_a: HashSet<char> = a.iter().copied().collect();
    let set_b: HashSet<char> = b.iter().copied().collect();
    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    set_a.intersection(&set_b).count() as f64 / union as f64
}

/// Closeness of a guess to the original, 0–100.
///
/// Whitespace is ignored. The score blends normalised Levenshtein similarity
/// (70%) with character-set Jaccard similarity (30%).
pub fn similarity(original: &str, guess: &str) -> f64 {
    let a: Vec<char> = original.chars().filter(|c| !c.is_whitespace()).collect();
    let b: Vec<char> = guess.chars().filter(|c| !c.is_whitespace()).collect();

    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 100.0,
        (true, false) | (false, true) => return 0.0,
        _ => {}
    }

    let max_len = a.len().max(b.len()) as f64;
    let distance = levenshtein(&a, &b) as f64;
    let levenshtein_sim = (max_len - distance) / max_len * 100.0;
    let jaccard_sim = jaccard(&a, &b) * 100.0;

    let blended = (LEVENSHTEIN_WEIGHT * levenshtein_sim + JACCARD_WEIGHT * jaccard_sim)
        / (LEVENSHTEIN_WEIGHT + JACCARD_WEIGHT);
    blended.clamp(0.0, 100.0)
}
