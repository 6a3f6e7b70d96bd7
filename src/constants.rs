//! Cross-cutting, shared constants.
//!
//! Scores are expressed on the 0–100 presentation scale everywhere outside of
//! [`crate::scoring::vector`], which works on raw cosine values.

/// Default minimum score a result must reach to be surfaced.
pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 70;

/// Upper bound of the presentation score scale.
pub const MAX_SCORE: f32 = 100.0;

/// Default maximum length (in characters) of a normalized risk text.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 8000;

/// Default base URL of the inference backend (embeddings and chat).
pub const DEFAULT_INFERENCE_BASE_URL: &str = "http://localhost:11434";

pub const DEFAULT_EMBEDDING_MODEL: &str = "nomic-embed-text";

pub const DEFAULT_CHAT_MODEL: &str = "llama3.2";

pub const DEFAULT_INFERENCE_TIMEOUT_MS: u64 = 30_000;

pub const EMBEDDINGS_PATH: &str = "/api/embeddings";

pub const CHAT_PATH: &str = "/api/chat";

/// Default number of results returned for an existing risk.
pub const DEFAULT_EXISTING_RISK_LIMIT: usize = 10;

/// Default number of results returned while drafting a risk.
pub const DEFAULT_DRAFT_RISK_LIMIT: usize = 5;

/// Cap on candidates loaded for a draft comparison.
pub const DRAFT_CANDIDATE_CAP: usize = 100;

/// Draft titles shorter than this (in characters) are not compared.
pub const MIN_DRAFT_TITLE_CHARS: usize = 3;
