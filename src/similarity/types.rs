use serde::Serialize;
use std::collections::BTreeSet;

use crate::risk::{RiskField, RiskRecord};
use crate::scoring::SimilarityResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// A ranked candidate with its full record attached for display.
pub struct SimilarRiskResult {
    /// The candidate, including owner, category and related summaries.
    pub risk: RiskRecord,
    /// Score in `[0, 100]`.
    pub score: f32,
    pub matched_fields: BTreeSet<RiskField>,
}

impl SimilarRiskResult {
    pub fn new(risk: RiskRecord, result: SimilarityResult) -> Self {
        Self {
            risk,
            score: result.score,
            matched_fields: result.matched_fields,
        }
    }
}
