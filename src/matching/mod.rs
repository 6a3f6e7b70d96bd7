//! Batch matching of one query text against stored candidate embeddings.
//!
//! One embedding call per query at most; candidates are never re-embedded. Candidates
//! without a stored vector are left out rather than scored as 0.

pub mod error;


pub use error::MatchError;

use std::cmp::Ordering;
use tracing::debug;

use crate::inference::{EmbeddingBackend, EmbeddingClient};
use crate::risk::{EmbeddingVector, RiskField, RiskId, RiskRecord};
use crate::scoring::{SimilarityResult, vector_score};

/// Comparable view of a candidate risk.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate {
    pub id: RiskId,
    pub title: String,
    pub threat_description: Option<String>,
    pub description: Option<String>,
    pub embedding: Option<EmbeddingVector>,
}

impl From<&RiskRecord> for MatchCandidate {
    fn from(risk: &RiskRecord) -> Self {
        Self {
            id: risk.id.clone(),
            title: risk.text.title.clone(),
            threat_description: risk.text.threat_description.clone(),
            description: risk.text.description.clone(),
            embedding: risk.embedding.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchMatcher<B> {
    embeddings: EmbeddingClient<B>,
}

impl<B: EmbeddingBackend> BatchMatcher<B> {
    pub fn new(embeddings: EmbeddingClient<B>) -> Self {
        Self { embeddings }
    }

    pub fn embeddings(&self) -> &EmbeddingClient<B> {
        &self.embeddings
    }

    /// Embeds `query_text` once and ranks `candidates` against it.
    ///
    /// Returns an empty list when there are no candidates or no query vector; the
    /// caller decides whether to fall back to pairwise chat scoring.
    pub async fn find_similar_risks(
        &self,
        query_text: &str,
        candidates: &[MatchCandidate],
    ) -> Result<Vec<SimilarityResult>, MatchError> {
        if candidates.is_empty() {
            debug!("No candidates provided for matching");
            return Ok(Vec::new());
        }

        let Some(query_embedding) = self.embeddings.embed(query_text).await else {
            debug!("Query has no usable embedding; skipping vector matching");
            return Ok(Vec::new());
        };

        self.find_similar_risks_with_embedding(query_text, &query_embedding, candidates)
    }

    /// Ranks `candidates` against a precomputed query vector.
    ///
    /// Sorted by descending score; ties keep candidate order. A candidate vector of
    /// a different length than the query is an error.
    pub fn find_similar_risks_with_embedding(
        &self,
        query_text: &str,
        query_embedding: &EmbeddingVector,
        candidates: &[MatchCandidate],
    ) -> Result<Vec<SimilarityResult>, MatchError> {
        let query_lower = query_text.to_lowercase();

        let mut results = Vec::with_capacity(candidates.len());
        let mut skipped = 0usize;

        for candidate in candidates {
            let Some(embedding) = candidate.embedding.as_ref() else {
                skipped += 1;
                continue;
            };

            let score = vector_score(query_embedding.as_slice(), embedding.as_slice()).map_err(
                |source| MatchError::Scoring {
                    risk_id: candidate.id.clone(),
                    source,
                },
            )?;

            results.push(SimilarityResult::new(
                candidate.id.clone(),
                score,
                matched_fields(&query_lower, candidate),
            ));
        }

        // `sort_by` is stable, so equal scores keep input order.
        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!(
            candidates = candidates.len(),
            scored = results.len(),
            skipped_without_embedding = skipped,
            top_score = results.first().map(|r| r.score),
            "Batch matching complete"
        );

        Ok(results)
    }
}

/// UI hint: the candidate's title appears verbatim (case-insensitive) in the query.
fn matched_fields(query_lower: &str, candidate: &MatchCandidate) -> Vec<RiskField> {
    let title = candidate.title.trim().to_lowercase();
    if !title.is_empty() && query_lower.contains(&title) {
        vec![RiskField::Title]
    } else {
        Vec::new()
    }
}
