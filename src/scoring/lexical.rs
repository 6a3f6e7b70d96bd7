//! Cheap token-set similarity used when titles already agree.

use std::collections::HashSet;

/// Tokens shorter than this carry too little signal.
const MIN_TOKEN_CHARS: usize = 3;

/// Lower-cased, whitespace-split tokens of at least three characters.
pub fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity (intersection over union) of the token sets of `a` and `b`.
///
/// `0.0` if either text is blank or neither has a qualifying token.
pub fn jaccard_similarity(a: &str, b: &str) -> f32 {
    if a.trim().is_empty() || b.trim().is_empty() {
        return 0.0;
    }

    let tokens_a = token_set(a);
    let tokens_b = token_set(b);

    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = tokens_a.intersection(&tokens_b).count();
    intersection as f32 / union as f32
}
