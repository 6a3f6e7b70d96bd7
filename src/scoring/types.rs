use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::risk::{RiskField, RiskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Rule of the pairwise scorer that produced a [`PairScore`].
pub enum ScoringStrategy {
    /// All fields identical.
    ExactMatch,
    /// Titles identical, descriptions compared lexically.
    TitleIdentical,
    /// Judged by the chat backend.
    Semantic,
}

impl fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringStrategy::ExactMatch => write!(f, "EXACT_MATCH"),
            ScoringStrategy::TitleIdentical => write!(f, "TITLE_IDENTICAL"),
            ScoringStrategy::Semantic => write!(f, "SEMANTIC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Outcome of a one-off pairwise comparison.
pub struct PairScore {
    /// Score in `[0, 100]`.
    pub score: f32,
    /// Fields reported as contributing to the match.
    pub matched_fields: BTreeSet<RiskField>,
    /// Rule that produced the score.
    pub strategy: ScoringStrategy,
}

impl PairScore {
    /// Creates a score, clamping it into `[0, 100]`.
    pub fn new(
        score: f32,
        matched_fields: impl IntoIterator<Item = RiskField>,
        strategy: ScoringStrategy,
    ) -> Self {
        Self {
            score: clamp_score(score),
            matched_fields: matched_fields.into_iter().collect(),
            strategy,
        }
    }

    /// The worst case: score 0, nothing matched.
    pub fn zero(strategy: ScoringStrategy) -> Self {
        Self {
            score: 0.0,
            matched_fields: BTreeSet::new(),
            strategy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Score of one candidate against a query risk.
pub struct SimilarityResult {
    pub risk_id: RiskId,
    /// Score in `[0, 100]`.
    pub score: f32,
    /// Display hint only; never part of the ranking.
    pub matched_fields: BTreeSet<RiskField>,
}

impl SimilarityResult {
    pub fn new(
        risk_id: RiskId,
        score: f32,
        matched_fields: impl IntoIterator<Item = RiskField>,
    ) -> Self {
        Self {
            risk_id,
            score: clamp_score(score),
            matched_fields: matched_fields.into_iter().collect(),
        }
    }

    /// Returns `true` if `score` reaches `threshold`.
    pub fn meets_threshold(&self, threshold: u8) -> bool {
        self.score >= f32::from(threshold)
    }
}

/// Clamps into `[0, 100]`; NaN becomes `0.0`.
pub fn clamp_score(score: f32) -> f32 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, crate::constants::MAX_SCORE)
}
