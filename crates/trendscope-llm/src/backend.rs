use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LlmError;

pub const DEFAULT_REMOTE_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LOCAL_URL: &str = "http://localhost:11434";

/// A language-model serving option. Mockable for testing.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Send `prompt` as a single user message and return the reply text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// OpenAI-compatible `POST /chat/completions` request.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, or `EmptyCompletion` when there is none.
    pub fn into_text(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .ok_or(LlmError::EmptyCompletion)
    }
}

/// Ollama-compatible `POST /api/chat` request.
#[derive(Debug, Serialize)]
pub struct LocalChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct LocalChatResponse {
    pub message: ChatMessage,
}

/// Hosted chat-completion API (OpenAI and compatible servers).
pub struct RemoteBackend {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: u32,
}

impl RemoteBackend {
    pub fn new(base_url: Option<&str>, model: &str, api_key: Option<String>, max_tokens: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url
                .unwrap_or(DEFAULT_REMOTE_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: model.to_string(),
            api_key,
            max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmBackend for RemoteBackend {
    fn name(&self) -> &str {
        "remote"
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingCredential)?;
        let url = self.completions_url();
        debug!(%url, model = %self.model, prompt_len = prompt.len(), "Requesting chat completion");

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: self.max_tokens,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Remote LLM request failed");
            return Err(LlmError::Status {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;
        parsed.into_text()
    }
}

/// Local model server speaking the Ollama chat API.
pub struct LocalBackend {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl LocalBackend {
    pub fn new(base_url: Option<&str>, model: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url
                .unwrap_or(DEFAULT_LOCAL_URL)
                .trim_end_matches('/')
                .to_string(),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }
}

#[async_trait]
impl LlmBackend for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.chat_url();
        debug!(%url, model = %self.model, prompt_len = prompt.len(), "Requesting local chat");

        let request = LocalChatRequest {
            model: &self.model,
            messages: vec![ChatMessage::user(prompt)],
            stream: false,
        };

        let response = self.http.post(&url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Local LLM request failed");
            return Err(LlmError::Status {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: LocalChatResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::Parse(format!("local chat response: {e}")))?;
        Ok(parsed.message.content)
    }
}

/// Extract `error.message` (OpenAI) or `error` (Ollama) from an error body.
fn api_error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    let message = parsed.as_ref().and_then(|v| {
        let error = v.get("error")?;
        error
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| error.as_str())
            .map(str::to_string)
    });
    message.unwrap_or_else(|| body.trim().to_string())
}
