use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use trendscope::config::load_config;
use trendscope::display::render_report;
use trendscope_models::analysis::AnalysisRequest;
use trendscope_models::price::PeriodSelector;

#[derive(Parser, Debug)]
#[command(
    name = "trendscope",
    about = "Fetch recent end-of-day prices for a ticker and have an LLM summarise the trend"
)]
struct Cli {
    /// Stock ticker, e.g. AAPL or TSLA
    ticker: String,

    /// Trailing window to analyse: day, week or month
    #[arg(short, long, default_value = "day")]
    period: PeriodSelector,

    /// Path to configuration file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "config/trendscope.toml")]
    config: PathBuf,

    /// Print the result as JSON instead of a table and narrative
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present; variables already set in the environment win.
    dotenvy::dotenv().ok();

    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    let request =
        AnalysisRequest::new(&cli.ticker, cli.period).context("Invalid analysis request")?;

    let pipeline = trendscope::build_pipeline(&config);
    eprintln!(
        "Fetching data for {} and analysing with the {} LLM backend...",
        request.ticker(),
        pipeline.gateway().backend_name()
    );

    let result = pipeline.analyze(&request).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(request.ticker(), &result));
    }

    Ok(())
}
