use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};
use trendscope_cache::{SeriesCache, SeriesKey};
use trendscope_llm::{build_trend_prompt, LlmGateway, NO_DATA_NARRATIVE};
use trendscope_market::MarketDataClient;
use trendscope_models::analysis::{AnalysisRequest, AnalysisResult};
use trendscope_models::price::{select_window, PriceSeries};

/// Fetch → window → prompt → LLM, once per request with no retries.
pub struct Pipeline {
    market: Arc<dyn MarketDataClient>,
    gateway: LlmGateway,
    cache: SeriesCache,
}

impl Pipeline {
    pub fn new(market: Arc<dyn MarketDataClient>, gateway: LlmGateway, cache: SeriesCache) -> Self {
        Self {
            market,
            gateway,
            cache,
        }
    }

    pub fn gateway(&self) -> &LlmGateway {
        &self.gateway
    }

    /// Run one analysis. Never fails: fetch and LLM problems are reported in
    /// the narrative, and the LLM is not called when there is no data.
    pub async fn analyze(&self, request: &AnalysisRequest) -> AnalysisResult {
        let start = Instant::now();
        let ticker = request.ticker();
        let period = request.period();
        info!(request_id = %request.request_id, ticker, %period, "Starting analysis");

        let series = match self.windowed_series(request).await {
            Ok(series) => series,
            Err(narrative) => {
                return AnalysisResult {
                    series: PriceSeries::empty(),
                    narrative,
                };
            }
        };

        if series.is_empty() {
            info!(request_id = %request.request_id, ticker, "No data returned, skipping LLM");
            return AnalysisResult {
                series,
                narrative: NO_DATA_NARRATIVE.to_string(),
            };
        }

        let prompt = build_trend_prompt(ticker, period, &series);
        debug!(request_id = %request.request_id, prompt_len = prompt.len(), "Prompt built");
        let narrative = self.gateway.complete(&prompt).await;

        info!(
            request_id = %request.request_id,
            ticker,
            records = series.len(),
            backend = self.gateway.backend_name(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        AnalysisResult { series, narrative }
    }

    /// Memoised fetch + window. Failures come back as narrative text and are not cached.
    async fn windowed_series(&self, request: &AnalysisRequest) -> Result<PriceSeries, String> {
        let key = SeriesKey::new(request.ticker(), request.period());
        if let Some(series) = self.cache.get(&key).await {
            debug!(ticker = request.ticker(), records = series.len(), "Serving memoised series");
            return Ok(series);
        }

        let fetched = self.market.fetch(request.ticker()).await.map_err(|e| {
            warn!(
                ticker = request.ticker(),
                source = self.market.name(),
                error = %e,
                "Market data fetch failed"
            );
            format!(
                "Failed to fetch market data for {}: {e}",
                request.ticker()
            )
        })?;

        let series = select_window(fetched, request.period());
        self.cache.insert(key, series.clone()).await;
        Ok(series)
    }
}
