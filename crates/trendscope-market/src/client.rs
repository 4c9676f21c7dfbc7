use async_trait::async_trait;
use tracing::{debug, warn};
use trendscope_models::config::MarketDataConfig;
use trendscope_models::price::{PriceSeries, FETCH_LIMIT};

use crate::error::MarketDataError;
use crate::schema::{provider_error_message, EodResponse};

/// Source of recent end-of-day records for a symbol. Mockable for testing.
#[async_trait]
pub trait MarketDataClient: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the most recent records, ascending by date. An unknown symbol
    /// yields `Ok` with an empty series.
    async fn fetch(&self, symbol: &str) -> Result<PriceSeries, MarketDataError>;
}

/// Client for the Marketstack `GET /eod` endpoint.
pub struct MarketstackClient {
    http: reqwest::Client,
    base_url: String,
    access_key: Option<String>,
    limit: u32,
}

impl MarketstackClient {
    pub fn new(config: &MarketDataConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// The configured limit is clamped to `1..=FETCH_LIMIT`.
    pub fn with_client(http: reqwest::Client, config: &MarketDataConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
            limit: config.limit.clamp(1, FETCH_LIMIT),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn eod_url(&self) -> String {
        format!("{}/eod", self.base_url)
    }
}

#[async_trait]
impl MarketDataClient for MarketstackClient {
    fn name(&self) -> &str {
        "marketstack"
    }

    async fn fetch(&self, symbol: &str) -> Result<PriceSeries, MarketDataError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(MarketDataError::EmptySymbol);
        }
        let access_key = self
            .access_key
            .as_deref()
            .ok_or(MarketDataError::MissingAccessKey)?;

        let url = self.eod_url();
        let limit = self.limit.to_string();
        debug!(%url, symbol, limit = self.limit, "Requesting end-of-day data");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("access_key", access_key),
                ("symbols", symbol),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = provider_error_message(&body);
            warn!(symbol, status = status.as_u16(), %message, "Market data request failed");
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EodResponse = serde_json::from_str(&body)?;
        let series = parsed.into_series()?.keep_last(self.limit as usize);
        debug!(symbol, records = series.len(), "Parsed end-of-day data");
        Ok(series)
    }
}
