use serde::{Deserialize, Serialize};

use super::error::InferenceError;

/// Turns text into a vector.
pub trait EmbeddingBackend: Send + Sync {
    /// Embeds `text` as given; callers are expected to have trimmed it.
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, InferenceError>> + Send;
}

/// Answers a (non-streaming) chat conversation with the assistant's text.
pub trait ChatBackend: Send + Sync {
    fn chat(
        &self,
        messages: &[ChatMessage],
    ) -> impl std::future::Future<Output = Result<String, InferenceError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}
