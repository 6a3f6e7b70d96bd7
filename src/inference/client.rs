use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::backend::{ChatBackend, ChatMessage, EmbeddingBackend};
use super::error::InferenceError;
use crate::config::InferenceConfig;

/// Longest slice of an error body kept in [`InferenceError::Status`].
const ERROR_BODY_EXCERPT_CHARS: usize = 200;

#[derive(Clone, Debug)]
/// HTTP client for the embedding and chat endpoints of the inference backend.
///
/// One request per call, no retries. Timeouts come from [`InferenceConfig::timeout`].
pub struct InferenceClient {
    http: Client,
    config: InferenceConfig,
}

impl InferenceClient {
    /// Creates a client for `config`.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| InferenceError::ClientBuild { source })?;

        Ok(Self { http, config })
    }

    /// Returns the endpoint configuration.
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    async fn post_json(&self, url: String, body: &Value) -> Result<Value, InferenceError> {
        let res = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| InferenceError::Request {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        let text = res.text().await.map_err(|source| InferenceError::Request {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(InferenceError::Status {
                url,
                status: status.as_u16(),
                body: crate::text::truncate_chars(text, ERROR_BODY_EXCERPT_CHARS),
            });
        }

        serde_json::from_str(&text).map_err(|e| InferenceError::MalformedResponse {
            reason: format!("response from '{}' is not JSON: {}", url, e),
        })
    }
}

impl EmbeddingBackend for InferenceClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        let body = serde_json::json!({
            "model": self.config.embedding_model,
            "prompt": text,
        });

        debug!(
            model = %self.config.embedding_model,
            text_len = text.len(),
            "Requesting embedding"
        );

        let json = self.post_json(self.config.embeddings_url(), &body).await?;
        parse_embedding_response(&json, &self.config.embedding_model)
    }
}

impl ChatBackend for InferenceClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, InferenceError> {
        let body = serde_json::json!({
            "model": self.config.chat_model,
            "messages": messages,
            "stream": false,
        });

        debug!(
            model = %self.config.chat_model,
            messages = messages.len(),
            "Requesting chat completion"
        );

        let json = self.post_json(self.config.chat_url(), &body).await?;
        parse_chat_response(&json)
    }
}

/// Extracts the vector from `{"embedding": [...]}`.
///
/// A missing, non-array or empty `embedding` means the model cannot embed.
pub(crate) fn parse_embedding_response(json: &Value, model: &str) -> Result<Vec<f32>, InferenceError> {
    let unsupported = || InferenceError::EmbeddingUnsupported {
        model: model.to_string(),
    };

    let values = json
        .get("embedding")
        .and_then(|v| v.as_array())
        .ok_or_else(unsupported)?;

    if values.is_empty() {
        return Err(unsupported());
    }

    values
        .iter()
        .map(|value| {
            value
                .as_f64()
                .map(|number| number as f32)
                .ok_or_else(|| InferenceError::MalformedResponse {
                    reason: "embedding values must be numeric".to_string(),
                })
        })
        .collect()
}

/// Extracts the assistant text from `{"message": {"content": "..."}}`.
///
/// OpenAI-style `choices[0].message.content` is accepted as well.
pub(crate) fn parse_chat_response(json: &Value) -> Result<String, InferenceError> {
    let content = json
        .get("message")
        .or_else(|| {
            json.get("choices")
                .and_then(|v| v.as_array())
                .and_then(|choices| choices.first())
                .and_then(|choice| choice.get("message"))
        })
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .ok_or(InferenceError::EmptyResponse)?;

    if content.trim().is_empty() {
        return Err(InferenceError::EmptyResponse);
    }

    Ok(content.to_string())
}
