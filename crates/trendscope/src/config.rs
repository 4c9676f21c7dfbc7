use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use trendscope_models::config::{LlmMode, TrendscopeConfig};

/// Read the TOML config at `path`, or fall back to defaults when it does not exist.
pub fn load_config_file(path: &Path) -> Result<TrendscopeConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(TrendscopeConfig::default());
    }
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Apply the environment overrides understood by Trendscope.
///
/// | Variable              | Field                    |
/// |-----------------------|--------------------------|
/// | `MARKETSTACK_API_KEY` | `market_data.access_key` |
/// | `OPENAI_API_KEY`      | `llm.remote.api_key`     |
/// | `OPENAI_MODEL`        | `llm.remote.model`       |
/// | `OPENAI_BASE_URL`     | `llm.remote.base_url`    |
/// | `LOCAL_LLM`           | `llm.mode` (`true` → local, anything else → remote) |
/// | `LOCAL_LLM_MODEL`     | `llm.local.model`        |
/// | `LOCAL_LLM_URL`       | `llm.local.url`          |
///
/// `lookup` is usually `|k| std::env::var(k).ok()`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut TrendscopeConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("MARKETSTACK_API_KEY") {
        config.market_data.access_key = Some(v);
    }
    if let Some(v) = get("OPENAI_API_KEY") {
        config.llm.remote.api_key = Some(v);
    }
    if let Some(v) = get("OPENAI_MODEL") {
        config.llm.remote.model = v;
    }
    if let Some(v) = get("OPENAI_BASE_URL") {
        config.llm.remote.base_url = v;
    }
    if let Some(v) = get("LOCAL_LLM") {
        config.llm.mode = if v.trim().eq_ignore_ascii_case("true") {
            LlmMode::Local
        } else {
            LlmMode::Remote
        };
    }
    if let Some(v) = get("LOCAL_LLM_MODEL") {
        config.llm.local.model = v;
    }
    if let Some(v) = get("LOCAL_LLM_URL") {
        config.llm.local.url = v;
    }
}

/// Load the config file (if any) and then apply process environment overrides.
pub fn load_config(path: &Path) -> Result<TrendscopeConfig> {
    let mut config = load_config_file(path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}
