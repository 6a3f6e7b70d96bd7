use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::backend::{ChatBackend, ChatMessage, EmbeddingBackend};
use super::error::InferenceError;

/// Embedding backend returning canned vectors keyed by exact input text.
#[derive(Default)]
pub struct MockEmbeddingBackend {
    vectors: RwLock<HashMap<String, Vec<f32>>>,
    fallback: RwLock<Option<Vec<f32>>>,
    failure_status: RwLock<Option<u16>>,
    calls: AtomicUsize,
    requests: RwLock<Vec<String>>,
}

impl MockEmbeddingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `vector` for any text without an exact entry.
    pub fn with_fallback(vector: Vec<f32>) -> Self {
        let backend = Self::default();
        *backend.fallback.write().expect("lock poisoned") = Some(vector);
        backend
    }

    /// Every call fails with HTTP `status`.
    pub fn failing(status: u16) -> Self {
        let backend = Self::default();
        *backend.failure_status.write().expect("lock poisoned") = Some(status);
        backend
    }

    pub fn insert(&self, text: &str, vector: Vec<f32>) {
        self.vectors
            .write()
            .expect("lock poisoned")
            .insert(text.to_string(), vector);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts received, in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.read().expect("lock poisoned").clone()
    }
}

impl EmbeddingBackend for MockEmbeddingBackend {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .write()
            .expect("lock poisoned")
            .push(text.to_string());

        if let Some(status) = *self.failure_status.read().expect("lock poisoned") {
            return Err(InferenceError::Status {
                url: "mock://embeddings".to_string(),
                status,
                body: "mock failure".to_string(),
            });
        }

        if let Some(vector) = self.vectors.read().expect("lock poisoned").get(text) {
            return Ok(vector.clone());
        }

        self.fallback
            .read()
            .expect("lock poisoned")
            .clone()
            .ok_or_else(|| InferenceError::EmbeddingUnsupported {
                model: "mock".to_string(),
            })
    }
}

/// Chat backend replaying queued replies, then repeating the last one.
#[derive(Default)]
pub struct MockChatBackend {
    replies: RwLock<VecDeque<Result<String, u16>>>,
    last_reply: RwLock<Option<Result<String, u16>>>,
    calls: AtomicUsize,
    conversations: RwLock<Vec<Vec<ChatMessage>>>,
}

impl MockChatBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always answers with `content`.
    pub fn replying(content: impl Into<String>) -> Self {
        let backend = Self::default();
        backend.push_reply(content);
        backend
    }

    /// Always fails with HTTP `status`.
    pub fn failing(status: u16) -> Self {
        let backend = Self::default();
        backend
            .replies
            .write()
            .expect("lock poisoned")
            .push_back(Err(status));
        backend
    }

    pub fn push_reply(&self, content: impl Into<String>) {
        self.replies
            .write()
            .expect("lock poisoned")
            .push_back(Ok(content.into()));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Conversations received, in call order.
    pub fn conversations(&self) -> Vec<Vec<ChatMessage>> {
        self.conversations.read().expect("lock poisoned").clone()
    }
}

impl ChatBackend for MockChatBackend {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.conversations
            .write()
            .expect("lock poisoned")
            .push(messages.to_vec());

        let next = self.replies.write().expect("lock poisoned").pop_front();
        let reply = match next {
            Some(reply) => {
                *self.last_reply.write().expect("lock poisoned") = Some(reply.clone());
                reply
            }
            None => self
                .last_reply
                .read()
                .expect("lock poisoned")
                .clone()
                .ok_or(InferenceError::EmptyResponse)?,
        };

        reply.map_err(|status| InferenceError::Status {
            url: "mock://chat".to_string(),
            status,
            body: "mock failure".to_string(),
        })
    }
}
