use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by inference backends.
///
/// None of these reach callers of the similarity service; they are logged and
/// turned into "no result" at the call site.
pub enum InferenceError {
    /// The HTTP client could not be constructed.
    #[error("failed to build inference HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[error("inference request to '{url}' failed: {source}")]
    Request {
        /// Endpoint URL.
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("inference backend at '{url}' returned HTTP {status}: {body}")]
    Status {
        /// Endpoint URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// The response body was not the JSON shape we expect.
    #[error("malformed inference response: {reason}")]
    MalformedResponse {
        /// What was wrong with it.
        reason: String,
    },

    /// The response carried no usable vector; the model likely does not embed.
    #[error("model '{model}' returned no embedding; check that it supports embeddings")]
    EmbeddingUnsupported {
        /// Configured model identifier.
        model: String,
    },

    /// The chat response carried no message content.
    #[error("chat response contained no message content")]
    EmptyResponse,
}

impl InferenceError {
    /// Returns `true` if the failure points at configuration rather than an outage.
    pub fn is_misconfiguration(&self) -> bool {
        match self {
            InferenceError::EmbeddingUnsupported { .. } => true,
            InferenceError::Status { status, .. } => matches!(status, 400 | 401 | 403 | 404),
            _ => false,
        }
    }
}
