use thiserror::Error;

use crate::risk::RiskId;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("failed to score candidate {risk_id}: {source}")]
    Scoring {
        risk_id: RiskId,
        #[source]
        source: ScoringError,
    },
}
