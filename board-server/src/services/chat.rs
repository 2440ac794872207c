//! Text-generation backend
//!
//! Single "transform text via external capability" seam used by the
//! pipeline's extraction and enhancement stages. The backend is opaque:
//! one prompt in, one completion out, no retries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::Config;
use crate::utils::{AppError, AppResult};

const GROQ_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Opaque text transformation capability
#[async_trait]
pub trait ChatBackend: Send + Sync + std::fmt::Debug {
    /// Submit one prompt and return the completion text
    async fn complete(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Groq chat-completion backend
///
/// Credentials are validated lazily, at call time, so a dev instance
/// without a key still boots; only the message pipeline is unavailable.
#[derive(Debug, Clone)]
pub struct GroqChat {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GroqChat {
    pub fn from_config(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.groq_api_key.clone(),
            model: config.groq_model_name.clone(),
        }
    }
}

#[async_trait]
impl ChatBackend for GroqChat {
    async fn complete(&self, prompt: &str) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::configuration("Missing GROQ_API_KEY"))?;
        if self.model.is_empty() {
            return Err(AppError::configuration("Missing Groq model name"));
        }

        let request = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(GROQ_COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Groq request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, model = %self.model, "Groq returned an error status");
            return Err(AppError::upstream(format!("Groq returned {}", status)));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Malformed Groq response: {}", e)))?;
        body.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::upstream("Groq returned no choices"))
    }
}
