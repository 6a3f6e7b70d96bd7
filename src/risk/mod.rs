//! Risk data model and the repository seam the similarity core reads through.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod model;
pub mod repository;


pub use error::RepositoryError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRiskRepository;
pub use model::{
    DraftRisk, EmbeddingVector, RelatedSummary, RiskField, RiskFilter, RiskId, RiskRecord,
    RiskText,
};
pub use repository::RiskRepository;
