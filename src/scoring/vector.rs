//! Cosine similarity and its mapping onto the 0–100 presentation scale.

use super::error::ScoringError;
use crate::constants::MAX_SCORE;

/// Cosine similarity of `a` and `b`.
///
/// Returns `0.0` when either vector has zero norm. Unequal lengths are an error.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, ScoringError> {
    if a.len() != b.len() {
        return Err(ScoringError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot / (norm_a * norm_b))
    }
}

/// Clamps `cosine` into `[0, 1]` and rescales it to `[0, 100]`.
///
/// Non-finite input maps to `0.0`.
#[inline]
pub fn map_to_score(cosine: f32) -> f32 {
    if !cosine.is_finite() {
        return 0.0;
    }
    cosine.clamp(0.0, 1.0) * MAX_SCORE
}

/// [`cosine_similarity`] followed by [`map_to_score`].
pub fn vector_score(a: &[f32], b: &[f32]) -> Result<f32, ScoringError> {
    cosine_similarity(a, b).map(map_to_score)
}
