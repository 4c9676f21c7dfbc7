use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::RequestError;

/// Number of end-of-day records requested from the provider per fetch.
pub const FETCH_LIMIT: u32 = 30;

/// A single day's open/high/low/close/volume snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: u64,
}

/// Chronologically ordered end-of-day records, oldest first.
///
/// Dates are strictly increasing: construction through [`PriceSeries::from_unsorted`]
/// sorts the records and keeps the first record seen for any duplicated date.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<PriceRecord>", into = "Vec<PriceRecord>")]
pub struct PriceSeries(Vec<PriceRecord>);

impl PriceSeries {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Sort by date ascending and drop duplicate dates.
    pub fn from_unsorted(mut records: Vec<PriceRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        records.dedup_by_key(|r| r.date);
        Self(records)
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.0.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.0.last().map(|r| r.date)
    }

    pub fn into_records(self) -> Vec<PriceRecord> {
        self.0
    }

    /// Keep only the trailing `n` records.
    pub fn keep_last(mut self, n: usize) -> Self {
        let start = self.0.len().saturating_sub(n);
        self.0.drain(..start);
        self
    }
}

impl From<Vec<PriceRecord>> for PriceSeries {
    fn from(records: Vec<PriceRecord>) -> Self {
        Self::from_unsorted(records)
    }
}

impl From<PriceSeries> for Vec<PriceRecord> {
    fn from(series: PriceSeries) -> Self {
        series.0
    }
}

/// Coarse analysis window selected by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodSelector {
    #[default]
    Day,
    Week,
    Month,
}

impl PeriodSelector {
    pub const ALL: [PeriodSelector; 3] = [Self::Day, Self::Week, Self::Month];

    /// Trailing trading days covered by this period.
    pub const fn window_size(self) -> usize {
        match self {
            Self::Day => 1,
            Self::Week => 5,
            Self::Month => 22,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodSelector {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(RequestError::UnknownPeriod(other.to_string())),
        }
    }
}

/// Keep the trailing `period.window_size()` records of `series`.
///
/// Shorter series are returned whole; an empty series stays empty.
pub fn select_window(series: PriceSeries, period: PeriodSelector) -> PriceSeries {
    series.keep_last(period.window_size())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(date: &str, close: Decimal) -> PriceRecord {
        PriceRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close - dec!(1),
            high: close + dec!(2),
            low: close - dec!(2),
            close,
            volume: 1_000,
        }
    }

    fn daily_series(n: usize) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let records = (0..n)
            .map(|i| {
                let date = start + chrono::Duration::days(i as i64);
                PriceRecord {
                    date,
                    open: dec!(100),
                    high: dec!(101),
                    low: dec!(99),
                    close: Decimal::from(100 + i as i64),
                    volume: 10 * i as u64,
                }
            })
            .collect();
        PriceSeries::from_unsorted(records)
    }

    #[test]
    fn window_sizes() {
        assert_eq!(PeriodSelector::Day.window_size(), 1);
        assert_eq!(PeriodSelector::Week.window_size(), 5);
        assert_eq!(PeriodSelector::Month.window_size(), 22);
    }

    #[test]
    fn select_returns_trailing_suffix_for_all_lengths() {
        for period in PeriodSelector::ALL {
            for n in 0..=30 {
                let series = daily_series(n);
                let selected = select_window(series.clone(), period);
                let expected = n.min(period.window_size());
                assert_eq!(selected.len(), expected, "period={period} n={n}");
                assert_eq!(selected.records(), &series.records()[n - expected..]);
            }
        }
    }

    #[test]
    fn select_on_empty_series_is_empty() {
        for period in PeriodSelector::ALL {
            assert!(select_window(PriceSeries::empty(), period).is_empty());
        }
    }

    #[test]
    fn select_short_series_returns_everything() {
        let series = daily_series(3);
        let selected = select_window(series.clone(), PeriodSelector::Month);
        assert_eq!(selected, series);
    }

    #[test]
    fn from_unsorted_orders_and_dedups() {
        let series = PriceSeries::from_unsorted(vec![
            record("2024-01-03", dec!(103)),
            record("2024-01-01", dec!(101)),
            record("2024-01-02", dec!(102)),
            record("2024-01-01", dec!(999)),
        ]);

        assert_eq!(series.len(), 3);
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2024, 1, 3));
        assert!(series
            .records()
            .windows(2)
            .all(|pair| pair[0].date < pair[1].date));
        assert_eq!(series.records()[0].close, dec!(101));
    }

    #[test]
    fn period_parses_case_insensitively() {
        assert_eq!("Day".parse::<PeriodSelector>().unwrap(), PeriodSelector::Day);
        assert_eq!(" WEEK ".parse::<PeriodSelector>().unwrap(), PeriodSelector::Week);
        assert_eq!("month".parse::<PeriodSelector>().unwrap(), PeriodSelector::Month);
        assert!("year".parse::<PeriodSelector>().is_err());
    }

    #[test]
    fn period_serialization() {
        assert_eq!(serde_json::to_string(&PeriodSelector::Week).unwrap(), "\"week\"");
        assert_eq!(PeriodSelector::Month.to_string(), "month");
    }

    #[test]
    fn series_serializes_as_array() {
        let series = PriceSeries::from_unsorted(vec![record("2024-01-01", dec!(100))]);
        let json = serde_json::to_value(&series).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["date"], "2024-01-01");
        assert_eq!(json[0]["close"], "100");
    }

    #[test]
    fn keep_last_trims_oldest_records() {
        let series = daily_series(40).keep_last(FETCH_LIMIT as usize);
        assert_eq!(series.len(), 30);
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2024, 1, 11));
        assert_eq!(series.last_date(), NaiveDate::from_ymd_opt(2024, 2, 9));

        assert_eq!(daily_series(3).keep_last(30).len(), 3);
        assert!(daily_series(3).keep_last(0).is_empty());
    }

    #[test]
    fn deserializing_a_series_orders_and_dedups() {
        let json = serde_json::json!([
            {"date": "2024-01-02", "open": "1", "high": "1", "low": "1", "close": "2", "volume": 5},
            {"date": "2024-01-01", "open": "1", "high": "1", "low": "1", "close": "1", "volume": 5},
            {"date": "2024-01-02", "open": "1", "high": "1", "low": "1", "close": "9", "volume": 5}
        ]);
        let series: PriceSeries = serde_json::from_value(json).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(series.records()[1].close, dec!(2));
    }
}
