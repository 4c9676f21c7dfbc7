use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::price::{PeriodSelector, PriceSeries};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Ticker must not be empty")]
    EmptyTicker,

    #[error("Unknown period: {0} (expected day, week or month)")]
    UnknownPeriod(String),
}

/// A single trend-analysis request for one ticker. Only built through
/// [`AnalysisRequest::new`], so the ticker is never blank.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub request_id: Uuid,
    ticker: String,
    period: PeriodSelector,
}

impl AnalysisRequest {
    /// Build a request, trimming surrounding whitespace from the ticker.
    pub fn new(ticker: &str, period: PeriodSelector) -> Result<Self, RequestError> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(RequestError::EmptyTicker);
        }
        Ok(Self {
            request_id: Uuid::new_v4(),
            ticker: ticker.to_string(),
            period,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn period(&self) -> PeriodSelector {
        self.period
    }
}

/// Windowed price table plus the narrative produced for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalysisResult {
    pub series: PriceSeries,
    pub narrative: String,
}
