use tracing::{debug, warn};

use super::backend::EmbeddingBackend;
use crate::risk::EmbeddingVector;

/// "Give me a vector or tell me you can't."
///
/// Wraps an [`EmbeddingBackend`] so that every failure becomes `None` plus a log line.
#[derive(Debug, Clone)]
pub struct EmbeddingClient<B> {
    backend: B,
}

impl<B: EmbeddingBackend> EmbeddingClient<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Embeds `text`, or returns `None` when no vector can be produced.
    ///
    /// Blank input returns `None` without contacting the backend.
    pub async fn embed(&self, text: &str) -> Option<EmbeddingVector> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Skipping embedding of empty text");
            return None;
        }

        match self.backend.embed(text).await {
            Ok(values) => {
                debug!(dimensions = values.len(), "Embedding generated");
                Some(EmbeddingVector::new(values))
            }
            Err(e) if e.is_misconfiguration() => {
                warn!(
                    error = %e,
                    "Embedding backend rejected the request; check the model and endpoint configuration"
                );
                None
            }
            Err(e) => {
                warn!(error = %e, "Embedding backend unavailable");
                None
            }
        }
    }
}
