use std::fmt::Write;

use trendscope_models::price::{PeriodSelector, PriceSeries};

/// Narrative used when there is nothing to send to the model.
pub const NO_DATA_NARRATIVE: &str = "No data to analyze.";

pub const DATA_BEGIN_MARKER: &str = "<DATA BEGINS>";
pub const DATA_END_MARKER: &str = "<DATA ENDS>";
pub const TREND_FIELD: &str = "**Trend**:";
pub const EXPLANATION_FIELD: &str = "**Explanation**:";

const CSV_HEADER: &str = "date,open,high,low,close,volume";

/// Render the series as CSV: a header row, then one line per record.
pub fn render_csv(series: &PriceSeries) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + series.len() * 48);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for r in series.records() {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{},{},{},{},{},{}",
            r.date.format("%Y-%m-%d"),
            r.open,
            r.high,
            r.low,
            r.close,
            r.volume
        );
    }
    out
}

/// Build the trend-analysis prompt for `ticker` over `period`.
///
/// Returns [`NO_DATA_NARRATIVE`] for an empty series; callers must not send
/// that to a model. The output is deterministic for identical inputs.
pub fn build_trend_prompt(ticker: &str, period: PeriodSelector, series: &PriceSeries) -> String {
    if series.is_empty() {
        return NO_DATA_NARRATIVE.to_string();
    }

    format!(
        "You are a data-analysis assistant.\n\
         Here is the historical price data for {ticker} over the last {period}:\n\
         {DATA_BEGIN_MARKER}\n\
         {table}\
         {DATA_END_MARKER}\n\n\
         Please analyze this data and determine:\n\
         - The overall trend (upward, downward, or neutral)\n\
         - Predict and provide a brief explanation of what might have caused this trend \
         (100 words or fewer)\n\
         Output your answer in a user-friendly format.\n\n\
         Use this below format to return the answer:\n\
         {TREND_FIELD} <state the trend>\n\
         {EXPLANATION_FIELD} <state the prediction and explanation>\n",
        table = render_csv(series),
    )
}
