use std::sync::Arc;

use tracing::{info, warn};
use trendscope_models::config::{LlmBackendConfig, LlmMode};

use crate::backend::{LlmBackend, LocalBackend, RemoteBackend};
use crate::error::LlmError;

/// Narrative used when the backend answered without any completion.
pub const NO_RESPONSE_NARRATIVE: &str = "No response from the LLM.";

/// Dispatches prompts to the single backend chosen at startup.
///
/// `complete` never fails: transport and protocol errors come back as
/// human-readable narrative text so the caller can display them as-is.
/// Use `try_complete` for the typed result.
#[derive(Clone)]
pub struct LlmGateway {
    backend: Arc<dyn LlmBackend>,
    mode: LlmMode,
}

impl LlmGateway {
    pub fn new(backend: Arc<dyn LlmBackend>, mode: LlmMode) -> Self {
        Self { backend, mode }
    }

    /// Build the backend selected by `config.mode`. There is no fallback to the other one.
    pub fn from_config(config: &LlmBackendConfig) -> Self {
        let backend: Arc<dyn LlmBackend> = match config.mode {
            LlmMode::Remote => Arc::new(RemoteBackend::new(
                config.endpoint.as_deref(),
                &config.model,
                config.credential.clone(),
                config.max_tokens,
            )),
            LlmMode::Local => Arc::new(LocalBackend::new(config.endpoint.as_deref(), &config.model)),
        };
        info!(backend = backend.name(), model = %config.model, "LLM backend selected");
        Self::new(backend, config.mode)
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn mode(&self) -> LlmMode {
        self.mode
    }

    pub async fn try_complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.backend.complete(prompt).await
    }

    /// Complete `prompt`, folding every failure into the returned text.
    pub async fn complete(&self, prompt: &str) -> String {
        match self.try_complete(prompt).await {
            Ok(text) => text,
            Err(LlmError::EmptyCompletion) => {
                warn!(backend = self.backend.name(), "LLM returned no completion");
                NO_RESPONSE_NARRATIVE.to_string()
            }
            Err(e) => {
                warn!(backend = self.backend.name(), error = %e, "LLM request failed");
                self.failure_narrative(&e)
            }
        }
    }

    fn failure_narrative(&self, error: &LlmError) -> String {
        match self.mode {
            LlmMode::Remote => format!("Error from LLM: {error}"),
            LlmMode::Local => format!("Failed to connect to local LLM. Error: {error}"),
        }
    }
}
