//! Shared risk fixtures for integration tests.

use risk_similarity::{EmbeddingVector, RelatedSummary, RiskRecord, RiskText};

/// Unit vector at the given cosine to `[1, 0]`.
pub fn at_cosine(cosine: f32) -> Vec<f32> {
    vec![cosine, (1.0 - cosine * cosine).sqrt()]
}

pub struct RiskRecordBuilder {
    record: RiskRecord,
}

impl RiskRecordBuilder {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            record: RiskRecord::new(id, RiskText::new(title)),
        }
    }

    pub fn threat(mut self, threat: &str) -> Self {
        self.record.text.threat_description = Some(threat.to_string());
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.record.text.description = Some(description.to_string());
        self
    }

    pub fn cosine(mut self, cosine: f32) -> Self {
        self.record.embedding = Some(EmbeddingVector::new(at_cosine(cosine)));
        self
    }

    pub fn owner(mut self, owner: &str) -> Self {
        self.record.owner = Some(owner.to_string());
        self
    }

    pub fn asset(mut self, id: &str, name: &str) -> Self {
        self.record.assets.push(RelatedSummary {
            id: id.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn archived(mut self) -> Self {
        self.record.archived = true;
        self
    }

    pub fn build(self) -> RiskRecord {
        self.record
    }
}
