//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Threshold string could not be parsed as an integer.
    #[error("failed to parse similarity threshold '{value}': {source}")]
    ThresholdParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Threshold value is outside the 0-100 score range.
    #[error("invalid similarity threshold '{value}': must be between 0 and 100")]
    InvalidThreshold { value: String },

    /// A numeric setting could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    NumberParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Inference base URL is empty or not an http(s) URL.
    #[error("invalid inference base URL '{value}': must start with http:// or https://")]
    InvalidBaseUrl { value: String },

    /// A model identifier was configured as an empty string.
    #[error("{name} must not be empty")]
    EmptyModel { name: &'static str },

    /// A numeric setting that must be positive was zero.
    #[error("{name} must be greater than zero")]
    ZeroValue { name: &'static str },
}
