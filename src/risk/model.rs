use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a risk row, as issued by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskId(pub String);

impl RiskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RiskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RiskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RiskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Embedding vector cached on a risk row. Opaque beyond its numeric values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbeddingVector(pub Vec<f32>);

impl EmbeddingVector {
    pub fn new(values: Vec<f32>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn dimensions(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(values: Vec<f32>) -> Self {
        Self(values)
    }
}

/// The comparable surface of a risk.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskText {
    pub title: String,
    #[serde(default)]
    pub threat_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RiskText {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            threat_description: None,
            description: None,
        }
    }

    pub fn with_threat(mut self, threat: impl Into<String>) -> Self {
        self.threat_description = Some(threat.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn threat(&self) -> &str {
        self.threat_description.as_deref().unwrap_or("")
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Text of `field`, or `""` when absent.
    pub fn field(&self, field: RiskField) -> &str {
        match field {
            RiskField::Title => &self.title,
            RiskField::ThreatDescription => self.threat(),
            RiskField::Description => self.description(),
        }
    }

    /// Fields whose trimmed text is non-empty, in canonical order.
    pub fn present_fields(&self) -> Vec<RiskField> {
        RiskField::ALL
            .into_iter()
            .filter(|field| !self.field(*field).trim().is_empty())
            .collect()
    }

    /// A title plus at least one of threat or description.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && (!self.threat().trim().is_empty() || !self.description().trim().is_empty())
    }
}

/// A field of [`RiskText`] that can be reported as matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskField {
    Title,
    ThreatDescription,
    Description,
}

impl RiskField {
    pub const ALL: [RiskField; 3] = [
        RiskField::Title,
        RiskField::ThreatDescription,
        RiskField::Description,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskField::Title => "title",
            RiskField::ThreatDescription => "threatDescription",
            RiskField::Description => "description",
        }
    }

    /// Lenient parse used for field names reported by the chat backend.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "title" => Some(RiskField::Title),
            "threat" | "threatdescription" | "threat_description" => {
                Some(RiskField::ThreatDescription)
            }
            "description" => Some(RiskField::Description),
            _ => None,
        }
    }
}

impl fmt::Display for RiskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Short summary of a related record, carried for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedSummary {
    pub id: String,
    pub name: String,
}

/// A risk row as returned by the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRecord {
    pub id: RiskId,
    #[serde(flatten)]
    pub text: RiskText,
    #[serde(default, skip_serializing)]
    pub embedding: Option<EmbeddingVector>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub assets: Vec<RelatedSummary>,
    #[serde(default)]
    pub interested_parties: Vec<RelatedSummary>,
}

impl RiskRecord {
    pub fn new(id: impl Into<RiskId>, text: RiskText) -> Self {
        Self {
            id: id.into(),
            text,
            embedding: None,
            archived: false,
            owner: None,
            category: None,
            assets: Vec::new(),
            interested_parties: Vec::new(),
        }
    }

    pub fn with_embedding(mut self, embedding: impl Into<EmbeddingVector>) -> Self {
        self.embedding = Some(embedding.into());
        self
    }

    pub fn archived(mut self) -> Self {
        self.archived = true;
        self
    }
}

/// Risk data submitted while drafting, before it has been saved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRisk {
    #[serde(flatten)]
    pub text: RiskText,
    /// Risk to leave out of the candidates, e.g. the one being edited.
    #[serde(default)]
    pub exclude_id: Option<RiskId>,
}

impl DraftRisk {
    pub fn new(text: RiskText) -> Self {
        Self {
            text,
            exclude_id: None,
        }
    }

    pub fn excluding(mut self, id: impl Into<RiskId>) -> Self {
        self.exclude_id = Some(id.into());
        self
    }
}

/// Candidate selection for [`RiskRepository::find_many`](super::RiskRepository::find_many).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RiskFilter {
    pub exclude_id: Option<RiskId>,
    pub include_archived: bool,
    pub limit: Option<usize>,
}

impl RiskFilter {
    /// Non-archived risks, without a limit.
    pub fn active() -> Self {
        Self::default()
    }

    pub fn excluding(mut self, id: Option<RiskId>) -> Self {
        self.exclude_id = id;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, risk: &RiskRecord) -> bool {
        if risk.archived && !self.include_archived {
            return false;
        }
        self.exclude_id.as_ref() != Some(&risk.id)
    }
}
