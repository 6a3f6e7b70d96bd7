use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::error::RepositoryError;
use super::model::{RiskFilter, RiskId, RiskRecord};
use super::repository::RiskRepository;

/// In-memory repository preserving insertion order.
#[derive(Default)]
pub struct MockRiskRepository {
    risks: RwLock<Vec<RiskRecord>>,
    fail_find_many: AtomicBool,
    find_many_calls: AtomicUsize,
    last_filter: RwLock<Option<RiskFilter>>,
}

impl MockRiskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_risks(risks: Vec<RiskRecord>) -> Self {
        Self {
            risks: RwLock::new(risks),
            ..Self::default()
        }
    }

    pub fn insert(&self, risk: RiskRecord) {
        self.risks.write().expect("lock poisoned").push(risk);
    }

    /// Makes every subsequent `find_many` call fail.
    pub fn fail_find_many(&self) {
        self.fail_find_many.store(true, Ordering::SeqCst);
    }

    pub fn find_many_calls(&self) -> usize {
        self.find_many_calls.load(Ordering::SeqCst)
    }

    pub fn last_filter(&self) -> Option<RiskFilter> {
        self.last_filter.read().expect("lock poisoned").clone()
    }
}

impl RiskRepository for MockRiskRepository {
    async fn find_by_id(&self, id: &RiskId) -> Result<Option<RiskRecord>, RepositoryError> {
        Ok(self
            .risks
            .read()
            .map_err(|_| RepositoryError::QueryFailed {
                message: "lock poisoned".to_string(),
            })?
            .iter()
            .find(|risk| &risk.id == id)
            .cloned())
    }

    async fn find_many(&self, filter: &RiskFilter) -> Result<Vec<RiskRecord>, RepositoryError> {
        self.find_many_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_filter.write().expect("lock poisoned") = Some(filter.clone());

        if self.fail_find_many.load(Ordering::SeqCst) {
            return Err(RepositoryError::QueryFailed {
                message: "connection refused".to_string(),
            });
        }

        let risks = self
            .risks
            .read()
            .map_err(|_| RepositoryError::QueryFailed {
                message: "lock poisoned".to_string(),
            })?;

        let selected = risks.iter().filter(|risk| filter.matches(risk)).cloned();

        Ok(match filter.limit {
            Some(limit) => selected.take(limit).collect(),
            None => selected.collect(),
        })
    }
}
