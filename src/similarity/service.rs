use std::collections::HashMap;
use tracing::{debug, error, info, warn};

use super::error::SimilarityError;
use super::types::SimilarRiskResult;
use crate::config::Config;
use crate::constants::{DRAFT_CANDIDATE_CAP, MIN_DRAFT_TITLE_CHARS};
use crate::inference::{EmbeddingBackend, EmbeddingClient};
use crate::matching::{BatchMatcher, MatchCandidate};
use crate::risk::{
    DraftRisk, EmbeddingVector, RiskFilter, RiskId, RiskRecord, RiskRepository, RiskText,
};
use crate::text::normalize_risk;

/// Entry point used by the rest of the system to find likely duplicate risks.
///
/// Suggestions are advisory: an inference outage, a repository failure while loading
/// candidates or a corrupt embedding all produce an empty list, never an error.
pub struct SimilarityService<R, E> {
    repository: R,
    matcher: BatchMatcher<E>,
    config: Config,
}

impl<R, E> std::fmt::Debug for SimilarityService<R, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityService")
            .field("threshold", &self.config.similarity_threshold)
            .field("max_text_length", &self.config.max_text_length)
            .finish()
    }
}

impl<R: RiskRepository, E: EmbeddingBackend> SimilarityService<R, E> {
    pub fn new(repository: R, embeddings: E, config: Config) -> Self {
        Self {
            repository,
            matcher: BatchMatcher::new(EmbeddingClient::new(embeddings)),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn matcher(&self) -> &BatchMatcher<E> {
        &self.matcher
    }

    /// Minimum score a result must reach to be returned.
    pub fn threshold(&self) -> u8 {
        self.config.similarity_threshold
    }

    /// Risks similar to the stored risk `risk_id`, best first, at most `limit`.
    ///
    /// Uses the risk's stored embedding when present. Fails only when the risk
    /// itself cannot be loaded.
    pub async fn for_existing_risk(
        &self,
        risk_id: &RiskId,
        limit: usize,
    ) -> Result<Vec<SimilarRiskResult>, SimilarityError> {
        let risk = self
            .repository
            .find_by_id(risk_id)
            .await?
            .ok_or_else(|| SimilarityError::RiskNotFound {
                id: risk_id.clone(),
            })?;

        let filter = RiskFilter::active().excluding(Some(risk.id.clone()));

        Ok(self
            .rank(&risk.text, risk.embedding.as_ref(), &filter, limit)
            .await)
    }

    /// Risks similar to an unsaved draft, best first, at most `limit`.
    ///
    /// Drafts with a title under three characters are not compared.
    pub async fn for_draft_risk(&self, draft: &DraftRisk, limit: usize) -> Vec<SimilarRiskResult> {
        if draft.text.title.trim().chars().count() < MIN_DRAFT_TITLE_CHARS {
            debug!("Draft title too short to compare");
            return Vec::new();
        }

        let filter = RiskFilter::active()
            .excluding(draft.exclude_id.clone())
            .limit(DRAFT_CANDIDATE_CAP);

        self.rank(&draft.text, None, &filter, limit).await
    }

    /// Embedding of `risk` in the same normalized form the query path uses.
    ///
    /// For write paths that cache the vector on the risk row.
    pub async fn embed_risk(&self, risk: &RiskText) -> Option<EmbeddingVector> {
        let text = normalize_risk(risk, self.config.max_text_length);
        self.matcher.embeddings().embed(&text).await
    }

    async fn rank(
        &self,
        query: &RiskText,
        query_embedding: Option<&EmbeddingVector>,
        filter: &RiskFilter,
        limit: usize,
    ) -> Vec<SimilarRiskResult> {
        let query_text = normalize_risk(query, self.config.max_text_length);
        if query_text.is_empty() {
            debug!("Query risk has no comparable text");
            return Vec::new();
        }

        let candidates = match self.repository.find_many(filter).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Failed to load similarity candidates");
                return Vec::new();
            }
        };

        let match_candidates: Vec<MatchCandidate> =
            candidates.iter().map(MatchCandidate::from).collect();

        let scored = match query_embedding {
            Some(embedding) => self.matcher.find_similar_risks_with_embedding(
                &query_text,
                embedding,
                &match_candidates,
            ),
            None => {
                self.matcher
                    .find_similar_risks(&query_text, &match_candidates)
                    .await
            }
        };

        let scored = match scored {
            Ok(scored) => scored,
            Err(e) => {
                error!(error = %e, "Similarity matching failed");
                return Vec::new();
            }
        };

        let threshold = self.threshold();
        let mut records: HashMap<RiskId, RiskRecord> = candidates
            .into_iter()
            .map(|risk| (risk.id.clone(), risk))
            .collect();

        let results: Vec<SimilarRiskResult> = scored
            .into_iter()
            .filter_map(|result| {
                records
                    .remove(&result.risk_id)
                    .map(|risk| SimilarRiskResult::new(risk, result))
            })
            .filter(|result| result.score >= f32::from(threshold))
            .take(limit)
            .collect();

        info!(
            candidates = match_candidates.len(),
            returned = results.len(),
            threshold = threshold,
            "Similar risks found"
        );

        results
    }
}
