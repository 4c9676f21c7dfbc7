use trendscope_models::analysis::AnalysisResult;
use trendscope_models::price::PriceSeries;

const HEADERS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

/// Render the series as a right-aligned text table. Empty series render as "".
pub fn render_table(series: &PriceSeries) -> String {
    if series.is_empty() {
        return String::new();
    }

    let rows: Vec<[String; 6]> = series
        .records()
        .iter()
        .map(|r| {
            [
                r.date.format("%Y-%m-%d").to_string(),
                r.open.to_string(),
                r.high.to_string(),
                r.low.to_string(),
                r.close.to_string(),
                r.volume.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, HEADERS.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, rule.iter().map(String::as_str), &widths);
    for row in &rows {
        push_row(&mut out, row.iter().map(String::as_str), &widths);
    }
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:>width$}"))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

/// Full human-readable report: the table (when there is data) then the narrative.
pub fn render_report(ticker: &str, result: &AnalysisResult) -> String {
    let mut out = String::new();
    if !result.series.is_empty() {
        out.push_str(&format!("{ticker} ({} records)\n", result.series.len()));
        out.push_str(&render_table(&result.series));
        out.push('\n');
    }
    out.push_str("### LLM Analysis\n");
    out.push_str(result.narrative.trim_end());
    out.push('\n');
    out
}
