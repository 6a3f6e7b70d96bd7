//! Similarity orchestration: load candidates, match, filter by threshold, truncate.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::SimilarityError;
pub use service::SimilarityService;
pub use types::SimilarRiskResult;
