//! Similarity scoring.
//!
//! - [`vector`]: cosine similarity of embeddings, mapped to the 0–100 scale.
//! - [`lexical`]: token-set Jaccard similarity.
//! - [`chat`]: the pairwise [`ChatFallbackScorer`], an ordered pipeline of
//!   exact-match, title-identical and semantic (chat backend) rules.
//! - [`parse`]: reading a judgement out of chat output.
//!
//! # Path asymmetry
//!
//! The completeness and generic-title penalties exist on the chat path only. Vector
//! scores are reported as computed. Keep the two paths separate unless matching
//! behavior is meant to change.

pub mod chat;
pub mod error;
pub mod lexical;
pub mod parse;
pub mod types;
pub mod vector;


pub use chat::ChatFallbackScorer;
pub use error::ScoringError;
pub use lexical::jaccard_similarity;
pub use parse::{ChatJudgement, parse_judgement};
pub use types::{PairScore, ScoringStrategy, SimilarityResult, clamp_score};
pub use vector::{cosine_similarity, map_to_score, vector_score};
