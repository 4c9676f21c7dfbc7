use serde::{Deserialize, Serialize};

/// Top-level configuration for Trendscope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrendscopeConfig {
    #[serde(default)]
    pub market_data: MarketDataConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Settings for the end-of-day market-data provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketDataConfig {
    /// Provider base URL; `/eod` is appended per request.
    #[serde(default = "default_market_base_url")]
    pub base_url: String,
    /// Provider access key. Usually supplied through `MARKETSTACK_API_KEY`.
    #[serde(default)]
    pub access_key: Option<String>,
    /// Records requested per fetch.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            base_url: default_market_base_url(),
            access_key: None,
            limit: default_limit(),
        }
    }
}

/// Which language-model backend serves completions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LlmMode {
    #[default]
    Remote,
    Local,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    #[serde(default)]
    pub mode: LlmMode,
    #[serde(default)]
    pub remote: RemoteLlmConfig,
    #[serde(default)]
    pub local: LocalLlmConfig,
}

/// Hosted OpenAI-compatible chat-completion API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteLlmConfig {
    #[serde(default = "default_remote_model")]
    pub model: String,
    #[serde(default = "default_remote_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Output-length cap sent as `max_tokens`.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for RemoteLlmConfig {
    fn default() -> Self {
        Self {
            model: default_remote_model(),
            base_url: default_remote_base_url(),
            api_key: None,
            max_tokens: default_max_tokens(),
        }
    }
}

/// Locally reachable Ollama-compatible model server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocalLlmConfig {
    #[serde(default = "default_local_model")]
    pub model: String,
    #[serde(default = "default_local_url")]
    pub url: String,
}

impl Default for LocalLlmConfig {
    fn default() -> Self {
        Self {
            model: default_local_model(),
            url: default_local_url(),
        }
    }
}

/// Resolved settings for the one backend used for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmBackendConfig {
    pub mode: LlmMode,
    pub model: String,
    pub endpoint: Option<String>,
    pub credential: Option<String>,
    pub max_tokens: u32,
}

impl LlmConfig {
    /// Pick the active backend's settings according to `mode`.
    pub fn resolve(&self) -> LlmBackendConfig {
        match self.mode {
            LlmMode::Remote => LlmBackendConfig {
                mode: LlmMode::Remote,
                model: self.remote.model.clone(),
                endpoint: Some(self.remote.base_url.clone()),
                credential: self.remote.api_key.clone(),
                max_tokens: self.remote.max_tokens,
            },
            LlmMode::Local => LlmBackendConfig {
                mode: LlmMode::Local,
                model: self.local.model.clone(),
                endpoint: Some(self.local.url.clone()),
                credential: None,
                max_tokens: self.remote.max_tokens,
            },
        }
    }
}

/// In-memory memoisation of windowed series keyed by (symbol, period).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Maximum number of memoised (symbol, period) entries.
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
    /// Optional expiry. Entries live for the whole process when unset.
    #[serde(default)]
    pub ttl_seconds: Option<u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_capacity: default_cache_capacity(),
            ttl_seconds: None,
        }
    }
}

fn default_market_base_url() -> String {
    "http://api.marketstack.com/v1".to_string()
}
fn default_limit() -> u32 {
    crate::price::FETCH_LIMIT
}
fn default_remote_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_remote_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_max_tokens() -> u32 {
    500
}
fn default_local_model() -> String {
    "gemma3:1b".to_string()
}
fn default_local_url() -> String {
    "http://localhost:11434".to_string()
}
fn default_cache_capacity() -> u64 {
    256
}
fn default_true() -> bool {
    true
}
