//! Trendscope - LLM-assisted stock trend summaries
//!
//! Fetches recent end-of-day prices for a ticker, keeps the trailing day,
//! week or month, and asks a hosted or local language model to classify the
//! trend and explain it.
//!
//! # Library Usage
//!
//! ```rust,no_run
//! use trendscope::models::{AnalysisRequest, PeriodSelector, TrendscopeConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let pipeline = trendscope::build_pipeline(&TrendscopeConfig::default());
//! let request = AnalysisRequest::new("AAPL", PeriodSelector::Week)?;
//! let result = pipeline.analyze(&request).await;
//! println!("{}", result.narrative);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod display;
pub mod pipeline;

pub use trendscope_cache as cache;
pub use trendscope_llm as llm;
pub use trendscope_market as market;
pub use trendscope_models as models;

pub use pipeline::Pipeline;

use std::sync::Arc;

use trendscope_cache::SeriesCache;
use trendscope_llm::LlmGateway;
use trendscope_market::{MarketDataClient, MarketstackClient};
use trendscope_models::config::TrendscopeConfig;

/// Build a Pipeline from configuration. The LLM backend is fixed here for
/// the lifetime of the returned pipeline.
pub fn build_pipeline(config: &TrendscopeConfig) -> Pipeline {
    let market: Arc<dyn MarketDataClient> = Arc::new(MarketstackClient::new(&config.market_data));
    let gateway = LlmGateway::from_config(&config.llm.resolve());
    let cache = SeriesCache::from_config(&config.cache);
    Pipeline::new(market, gateway, cache)
}
