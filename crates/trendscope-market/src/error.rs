use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Symbol must not be empty")]
    EmptySymbol,

    #[error("No market-data access key configured (set MARKETSTACK_API_KEY)")]
    MissingAccessKey,

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Market data parse error: {0}")]
    Parse(String),
}
