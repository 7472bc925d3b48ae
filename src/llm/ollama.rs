// src/llm/ollama.rs
use crate::llm::ChatModel;
use crate::utils::error::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "deepseek-r1:8b";

/// Sampling knobs sent with every request. Defaults keep the model close to
/// literal extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub top_k: u32,
}

impl Default for SamplingOptions {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_k: 10,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    format: &'a serde_json::Value,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

/// Client for a local Ollama server's `/api/chat` endpoint.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    options: SamplingOptions,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, options: SamplingOptions) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            options,
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn request_body<'a>(&'a self, prompt: &'a str, schema: &'a serde_json::Value) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            format: schema,
            stream: false,
            options: self.options,
        }
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn complete_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<String, LlmError> {
        tracing::debug!("Sending {} byte prompt to {} ({})", prompt.len(), self.chat_url(), self.model);

        let response = self
            .http
            .post(self.chat_url())
            .json(&self.request_body(prompt, schema))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Http { status, body });
        }

        let raw = response.text().await?;
        parse_reply(&raw)
    }
}

/// Pulls `message.content` out of a non-streamed chat reply.
fn parse_reply(raw: &str) -> Result<String, LlmError> {
    let reply: ChatResponse =
        serde_json::from_str(raw).map_err(|e| LlmError::Decode(e.to_string()))?;
    Ok(reply.message.content)
}
