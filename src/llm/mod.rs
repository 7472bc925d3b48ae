// src/llm/mod.rs
pub mod ollama;

use crate::utils::error::LlmError;
use async_trait::async_trait;

pub use ollama::{OllamaClient, SamplingOptions};

/// A chat model that answers a single user prompt with JSON constrained by `schema`.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the raw text of the reply; validating it is the caller's job.
    async fn complete_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, LlmError>;
}
