//! Spy backend for exercising the gateway and pipeline without a model server.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::LlmBackend;
use crate::error::LlmError;

type ErrorFactory = Box<dyn Fn() -> LlmError + Send + Sync>;

enum Reply {
    Text(String),
    Empty,
    Failure(ErrorFactory),
}

/// Records every prompt it receives and answers with a canned reply.
pub struct RecordingBackend {
    reply: Reply,
    prompts: Mutex<Vec<String>>,
}

impl RecordingBackend {
    pub fn replying(text: &str) -> Self {
        Self::with_reply(Reply::Text(text.to_string()))
    }

    /// Behaves like a reachable backend that produced zero completions.
    pub fn empty_completion() -> Self {
        Self::with_reply(Reply::Empty)
    }

    pub fn failing_with(make_error: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self::with_reply(Reply::Failure(Box::new(make_error)))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().map(|p| p.len()).unwrap_or_default()
    }
}

#[async_trait]
impl LlmBackend for RecordingBackend {
    fn name(&self) -> &str {
        "recording"
    }

    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Empty => Err(LlmError::EmptyCompletion),
            Reply::Failure(make_error) => Err(make_error()),
        }
    }
}
