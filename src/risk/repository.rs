use super::error::RepositoryError;
use super::model::{RiskFilter, RiskId, RiskRecord};

/// Read access to persisted risks.
///
/// Implemented by the persistence layer; the similarity core never writes through it.
pub trait RiskRepository: Send + Sync {
    /// Loads a single risk, `Ok(None)` when it does not exist.
    fn find_by_id(
        &self,
        id: &RiskId,
    ) -> impl std::future::Future<Output = Result<Option<RiskRecord>, RepositoryError>> + Send;

    /// Loads the risks selected by `filter`, in the repository's natural order.
    fn find_many(
        &self,
        filter: &RiskFilter,
    ) -> impl std::future::Future<Output = Result<Vec<RiskRecord>, RepositoryError>> + Send;
}
