use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("LLM response parse error: {0}")]
    Parse(String),

    #[error("LLM returned no completion")]
    EmptyCompletion,

    #[error("No API key configured for the remote LLM (set OPENAI_API_KEY)")]
    MissingCredential,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
