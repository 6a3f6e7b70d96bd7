//! Risk similarity library crate (used by the CLI and integration tests).
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Threshold, text limits and inference endpoints
//! - [`RiskText`], [`RiskRecord`], [`DraftRisk`], [`RiskField`] - Risk data model
//! - [`RiskRepository`] - Read seam onto stored risks
//!
//! ## Inference
//! - [`EmbeddingBackend`], [`ChatBackend`] - Capability seams
//! - [`InferenceClient`] - HTTP implementation of both
//! - [`EmbeddingClient`] - Embeds text, degrading failures to "no vector"
//!
//! ## Scoring & Matching
//! - [`cosine_similarity`], [`vector_score`] - Vector path
//! - [`ChatFallbackScorer`] - Pairwise judgement with deterministic shortcuts and penalties
//! - [`BatchMatcher`] - Ranks candidates against one query embedding
//!
//! ## Orchestration
//! - [`SimilarityService`], [`SimilarRiskResult`] - Entry points for existing and draft risks
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod inference;
pub mod matching;
pub mod risk;
pub mod scoring;
pub mod similarity;
pub mod text;

pub use config::{Config, ConfigError, InferenceConfig};
pub use constants::{
    DEFAULT_DRAFT_RISK_LIMIT, DEFAULT_EXISTING_RISK_LIMIT, DEFAULT_SIMILARITY_THRESHOLD,
};
pub use inference::{
    ChatBackend, ChatMessage, ChatRole, EmbeddingBackend, EmbeddingClient, InferenceClient,
    InferenceError,
};
#[cfg(any(test, feature = "mock"))]
pub use inference::{MockChatBackend, MockEmbeddingBackend};
pub use matching::{BatchMatcher, MatchCandidate, MatchError};
#[cfg(any(test, feature = "mock"))]
pub use risk::MockRiskRepository;
pub use risk::{
    DraftRisk, EmbeddingVector, RelatedSummary, RepositoryError, RiskField, RiskFilter, RiskId,
    RiskRecord, RiskRepository, RiskText,
};
pub use scoring::{
    ChatFallbackScorer, PairScore, ScoringError, ScoringStrategy, SimilarityResult,
    cosine_similarity, jaccard_similarity, map_to_score, vector_score,
};
pub use similarity::{SimilarRiskResult, SimilarityError, SimilarityService};
pub use text::{labeled_risk, normalize, normalize_risk};
