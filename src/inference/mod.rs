//! Inference backends (embedding + chat) and the embedding wrapper used by matching.
//!
//! - [`backend`] defines the two capability seams, [`EmbeddingBackend`] and [`ChatBackend`].
//! - [`client`] is the HTTP implementation of both.
//! - [`embedding`] turns backend failures into "no vector".

pub mod backend;
pub mod client;
pub mod embedding;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use backend::{ChatBackend, ChatMessage, ChatRole, EmbeddingBackend};
pub use client::InferenceClient;
pub use embedding::EmbeddingClient;
pub use error::InferenceError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockChatBackend, MockEmbeddingBackend};
