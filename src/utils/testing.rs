// src/utils/testing.rs
// In-memory stand-ins for the network and the model, shared by unit tests.
use crate::edgar::client::DocumentSource;
use crate::llm::ChatModel;
use crate::utils::error::{EdgarError, LlmError};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Serves fixed bodies by URL; unknown URLs behave like a 404.
#[derive(Default)]
pub struct StaticSource {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    async fn fetch_text(&self, url: &str) -> Result<String, EdgarError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| EdgarError::DocumentNotFound(url.to_string()))
    }
}

/// Replies with queued outputs in order and records every prompt it saw.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, raw: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(raw.to_string()));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.replies.lock().unwrap().push_back(Err(message.to_string()));
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    async fn complete_json(
        &self,
        prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(raw)) => Ok(raw),
            Some(Err(message)) => Err(LlmError::Decode(message)),
            None => Err(LlmError::Decode("no scripted reply left".to_string())),
        }
    }
}
