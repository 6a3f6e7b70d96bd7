use thiserror::Error;

use crate::risk::{RepositoryError, RiskId};

/// Errors surfaced by [`SimilarityService`](super::SimilarityService).
///
/// Only caller errors are reported; matching failures degrade to an empty list.
#[derive(Debug, Error)]
pub enum SimilarityError {
    #[error("risk not found: {id}")]
    RiskNotFound { id: RiskId },

    #[error("failed to load risk: {0}")]
    Repository(#[from] RepositoryError),
}
