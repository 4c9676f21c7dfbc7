//! Canned market-data sources for exercising callers without a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use trendscope_models::price::PriceSeries;

use crate::client::MarketDataClient;
use crate::error::MarketDataError;

#[cfg(feature = "test-util")]
pub mod http;

enum Canned {
    Series(PriceSeries),
    Failure { status: u16, message: String },
}

/// Returns the same series (or the same failure) for every symbol and
/// records which symbols were requested.
pub struct StaticMarketData {
    canned: Canned,
    calls: AtomicUsize,
    symbols: Mutex<Vec<String>>,
}

impl StaticMarketData {
    pub fn new(series: PriceSeries) -> Self {
        Self::from_canned(Canned::Series(series))
    }

    pub fn empty() -> Self {
        Self::new(PriceSeries::empty())
    }

    /// Every fetch fails with an HTTP status error.
    pub fn failing(status: u16, message: &str) -> Self {
        Self::from_canned(Canned::Failure {
            status,
            message: message.to_string(),
        })
    }

    fn from_canned(canned: Canned) -> Self {
        Self {
            canned,
            calls: AtomicUsize::new(0),
            symbols: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_symbols(&self) -> Vec<String> {
        self.symbols
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MarketDataClient for StaticMarketData {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, symbol: &str) -> Result<PriceSeries, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut symbols) = self.symbols.lock() {
            symbols.push(symbol.to_string());
        }

        match &self.canned {
            Canned::Series(series) => Ok(series.clone()),
            Canned::Failure { status, message } => Err(MarketDataError::Status {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counts_calls_and_symbols() {
        let source = StaticMarketData::empty();
        assert!(source.fetch("AAPL").await.unwrap().is_empty());
        assert!(source.fetch("TSLA").await.unwrap().is_empty());

        assert_eq!(source.calls(), 2);
        assert_eq!(source.requested_symbols(), vec!["AAPL", "TSLA"]);
    }

    #[tokio::test]
    async fn failing_source_returns_status_error() {
        let source = StaticMarketData::failing(503, "maintenance");
        let err = source.fetch("AAPL").await.unwrap_err();
        assert_eq!(err.to_string(), "Provider returned HTTP 503: maintenance");
    }
}
