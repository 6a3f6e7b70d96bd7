use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by a [`RiskRepository`](super::RiskRepository).
pub enum RepositoryError {
    /// The backing store could not serve the query.
    #[error("risk repository query failed: {message}")]
    QueryFailed {
        /// Error message.
        message: String,
    },
}
