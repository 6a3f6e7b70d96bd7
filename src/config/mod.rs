//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `RISK_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::time::Duration;

use crate::constants::{
    CHAT_PATH, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL, DEFAULT_INFERENCE_BASE_URL,
    DEFAULT_INFERENCE_TIMEOUT_MS, DEFAULT_MAX_TEXT_LENGTH, DEFAULT_SIMILARITY_THRESHOLD,
    EMBEDDINGS_PATH,
};

/// Similarity configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `RISK_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Minimum score (0-100) for a result to be surfaced. Default: `70`.
    pub similarity_threshold: u8,

    /// Maximum normalized text length, in characters. Default: `8000`.
    pub max_text_length: usize,

    /// Base URL shared by the embedding and chat backends. Default: `http://localhost:11434`.
    pub inference_base_url: String,

    /// Embedding model identifier. Default: `nomic-embed-text`.
    pub embedding_model: String,

    /// Chat model identifier. Default: `llama3.2`.
    pub chat_model: String,

    /// HTTP timeout for inference calls, in milliseconds. Default: `30000`.
    pub inference_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            inference_base_url: DEFAULT_INFERENCE_BASE_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            inference_timeout_ms: DEFAULT_INFERENCE_TIMEOUT_MS,
        }
    }
}

impl Config {
    const ENV_THRESHOLD: &'static str = "RISK_SIMILARITY_THRESHOLD";
    const ENV_MAX_TEXT_LENGTH: &'static str = "RISK_SIMILARITY_MAX_TEXT_LENGTH";
    const ENV_BASE_URL: &'static str = "RISK_INFERENCE_BASE_URL";
    const ENV_EMBEDDING_MODEL: &'static str = "RISK_EMBEDDING_MODEL";
    const ENV_CHAT_MODEL: &'static str = "RISK_CHAT_MODEL";
    const ENV_TIMEOUT_MS: &'static str = "RISK_INFERENCE_TIMEOUT_MS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let similarity_threshold = Self::parse_threshold_from_env(defaults.similarity_threshold)?;
        let max_text_length = Self::parse_usize_from_env(
            Self::ENV_MAX_TEXT_LENGTH,
            defaults.max_text_length,
        )?;
        let inference_base_url =
            Self::parse_string_from_env(Self::ENV_BASE_URL, defaults.inference_base_url);
        let embedding_model =
            Self::parse_string_from_env(Self::ENV_EMBEDDING_MODEL, defaults.embedding_model);
        let chat_model = Self::parse_string_from_env(Self::ENV_CHAT_MODEL, defaults.chat_model);
        let inference_timeout_ms =
            Self::parse_u64_from_env(Self::ENV_TIMEOUT_MS, defaults.inference_timeout_ms)?;

        Ok(Self {
            similarity_threshold,
            max_text_length,
            inference_base_url,
            embedding_model,
            chat_model,
            inference_timeout_ms,
        })
    }

    /// Validates basic invariants (does not contact the backend).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.similarity_threshold > 100 {
            return Err(ConfigError::InvalidThreshold {
                value: self.similarity_threshold.to_string(),
            });
        }

        let url = self.inference_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                value: self.inference_base_url.clone(),
            });
        }

        if self.embedding_model.trim().is_empty() {
            return Err(ConfigError::EmptyModel {
                name: Self::ENV_EMBEDDING_MODEL,
            });
        }
        if self.chat_model.trim().is_empty() {
            return Err(ConfigError::EmptyModel {
                name: Self::ENV_CHAT_MODEL,
            });
        }

        if self.max_text_length == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_MAX_TEXT_LENGTH,
            });
        }
        if self.inference_timeout_ms == 0 {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_TIMEOUT_MS,
            });
        }

        Ok(())
    }

    /// Returns the backend settings needed by [`crate::inference::InferenceClient`].
    pub fn inference(&self) -> InferenceConfig {
        InferenceConfig {
            base_url: self.inference_base_url.trim().trim_end_matches('/').to_string(),
            embedding_model: self.embedding_model.clone(),
            chat_model: self.chat_model.clone(),
            timeout: Duration::from_millis(self.inference_timeout_ms),
        }
    }

    fn parse_threshold_from_env(default: u8) -> Result<u8, ConfigError> {
        match env::var(Self::ENV_THRESHOLD) {
            Ok(value) => {
                let trimmed = value.trim();
                let threshold: u32 =
                    trimmed
                        .parse()
                        .map_err(|e| ConfigError::ThresholdParseError {
                            value: value.clone(),
                            source: e,
                        })?;

                if threshold > 100 {
                    return Err(ConfigError::InvalidThreshold { value });
                }

                Ok(threshold as u8)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &'static str, default: u64) -> Result<u64, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::NumberParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(var_name: &'static str, default: usize) -> Result<usize, ConfigError> {
        Self::parse_u64_from_env(var_name, default as u64).map(|v| v as usize)
    }
}

/// Endpoint and model settings for the inference backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub embedding_model: String,
    pub chat_model: String,
    pub timeout: Duration,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Config::default().inference()
    }
}

impl InferenceConfig {
    /// Full URL of the embedding endpoint.
    pub fn embeddings_url(&self) -> String {
        format!("{}{}", self.base_url, EMBEDDINGS_PATH)
    }

    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.base_url, CHAT_PATH)
    }
}
