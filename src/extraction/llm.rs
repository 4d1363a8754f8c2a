//! Chat-model collaborator seam

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_TOKENS: u32 = 500;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM request failed with status {status}")]
    Status { status: u16 },

    #[error("LLM response envelope could not be decoded")]
    Decode,
}

/// Prompt-to-completion collaborator.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// OpenAI chat-completions backend.
pub struct OpenAiChat {
    client: Client,
    model: String,
    max_tokens: u32,
}

impl OpenAiChat {
    pub fn new() -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .connect_timeout(std::time::Duration::from_secs(15))
            .build()?;

        Ok(Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, api_key: &str, prompt: &str) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        let res = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            // Body goes to the log only; the user sees the status
            let body = res.text().await.unwrap_or_default();
            log::error!("LLM request failed: {} - {}", status, body);
            return Err(LlmError::Status {
                status: status.as_u16(),
            });
        }

        let envelope: ChatResponse = res.json().await.map_err(|_| LlmError::Decode)?;
        envelope
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(LlmError::Decode)
    }
}
