pub mod analysis;
pub mod config;
pub mod price;

pub use analysis::{AnalysisRequest, AnalysisResult, RequestError};
pub use config::{
    CacheConfig, LlmBackendConfig, LlmConfig, LlmMode, LocalLlmConfig, MarketDataConfig,
    RemoteLlmConfig, TrendscopeConfig,
};
pub use price::{select_window, PeriodSelector, PriceRecord, PriceSeries, FETCH_LIMIT};
