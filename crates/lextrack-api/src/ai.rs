//! AI completion service seam
//!
//! Handlers await a completion before taking the database lock, so the trait
//! is async while the engine below it stays synchronous. The HTTP client
//! targets an OpenAI-compatible chat-completions endpoint; the tier selects
//! the model.

use async_trait::async_trait;
use serde_json::json;

use lextrack_core::errors::{ErrorKind, LexError, Result};
use lextrack_engine::prompts::CompletionRequest;

/// Model tier; PRO for authenticated callers, FREE otherwise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTier {
    Free,
    Pro,
}

/// Completion backend
#[async_trait]
pub trait AiService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest, tier: AiTier) -> Result<String>;
}

/// reqwest-backed client for an OpenAI-compatible endpoint
pub struct HttpAiService {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    pro_model: String,
    free_model: String,
}

impl HttpAiService {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            pro_model: "gpt-4o".to_string(),
            free_model: "gpt-4o-mini".to_string(),
        }
    }

    pub fn with_models(
        mut self,
        pro_model: impl Into<String>,
        free_model: impl Into<String>,
    ) -> Self {
        self.pro_model = pro_model.into();
        self.free_model = free_model.into();
        self
    }

    fn external(message: impl Into<String>) -> LexError {
        LexError::new(ErrorKind::ExternalService)
            .with_op("ai_complete")
            .with_message(message)
    }
}

#[async_trait]
impl AiService for HttpAiService {
    async fn complete(&self, request: &CompletionRequest, tier: AiTier) -> Result<String> {
        let model = match tier {
            AiTier::Pro => &self.pro_model,
            AiTier::Free => &self.free_model,
        };
        let payload = json!({
            "model": model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user.expose() },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| Self::external(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::external(format!(
                "completion endpoint returned {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Self::external(e.to_string()))?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Self::external("malformed completion response"))
    }
}

/// Fixed-response backend for tests and offline development
pub struct CannedAiService {
    response: String,
}

impl CannedAiService {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl AiService for CannedAiService {
    async fn complete(&self, _request: &CompletionRequest, _tier: AiTier) -> Result<String> {
        Ok(self.response.clone())
    }
}
