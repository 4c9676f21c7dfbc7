//! Wire schema for the provider's end-of-day endpoint.
//!
//! Only the six fields used downstream are declared; anything else the
//! provider sends (symbol, exchange, adjusted prices, pagination) is ignored.

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;
use trendscope_models::price::{PriceRecord, PriceSeries};

use crate::error::MarketDataError;

/// Body of a successful `GET /eod` response.
#[derive(Debug, Deserialize)]
pub struct EodResponse {
    #[serde(default)]
    pub data: Option<Vec<EodRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct EodRecord {
    pub date: Option<String>,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
    /// Sent as a float by the provider (e.g. `82488700.0`).
    pub volume: Option<f64>,
}

/// Error object returned alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub error: ProviderError,
}

#[derive(Debug, Deserialize)]
pub struct ProviderError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl EodResponse {
    /// Convert into an ascending series. A missing or empty `data` array is a
    /// valid empty result; records lacking any of the six fields are skipped.
    pub fn into_series(self) -> Result<PriceSeries, MarketDataError> {
        let raw = self.data.unwrap_or_default();
        let mut records = Vec::with_capacity(raw.len());

        for record in raw {
            match record.into_price_record()? {
                Some(r) => records.push(r),
                None => debug!("Skipping incomplete end-of-day record"),
            }
        }

        Ok(PriceSeries::from_unsorted(records))
    }
}

impl EodRecord {
    fn into_price_record(self) -> Result<Option<PriceRecord>, MarketDataError> {
        let (Some(date), Some(open), Some(high), Some(low), Some(close), Some(volume)) = (
            self.date, self.open, self.high, self.low, self.close, self.volume,
        ) else {
            return Ok(None);
        };

        Ok(Some(PriceRecord {
            date: parse_eod_date(&date)?,
            open,
            high,
            low,
            close,
            volume: volume.max(0.0).round() as u64,
        }))
    }
}

/// Parse a provider date. Accepts `2024-01-02T00:00:00+0000`, RFC 3339 and
/// plain `2024-01-02`.
pub fn parse_eod_date(raw: &str) -> Result<NaiveDate, MarketDataError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| MarketDataError::Parse(format!("invalid date {raw:?}: {e}")))
}

/// Pull a human-readable message out of an error body, falling back to the raw text.
pub fn provider_error_message(body: &str) -> String {
    match serde_json::from_str::<ProviderErrorBody>(body) {
        Ok(parsed) => match (parsed.error.code, parsed.error.message) {
            (Some(code), Some(message)) => format!("{code}: {message}"),
            (None, Some(message)) => message,
            (Some(code), None) => code,
            (None, None) => body.trim().to_string(),
        },
        Err(_) => body.trim().to_string(),
    }
}
