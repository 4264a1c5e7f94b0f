use crate::domain::errors::{FetchResult, MetricError};
use crate::infrastructure::http::JsonHttpClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TimeseriesResponse {
    data: Vec<MetricsRow>,
}

/// Coin Metrics serializes numeric metrics as strings.
#[derive(Debug, Deserialize)]
struct MetricsRow {
    #[serde(rename = "CapRealUSD")]
    cap_real_usd: Option<String>,
    #[serde(rename = "PriceUSD")]
    price_usd: Option<String>,
}

/// Secondary on-chain-metrics provider, used as fallback and cross-check
/// source for realized cap and price history.
#[derive(Debug, Clone)]
pub struct CoinMetricsClient {
    http: JsonHttpClient,
    base_url: String,
}

impl CoinMetricsClient {
    pub fn new(http: JsonHttpClient) -> Self {
        Self { http, base_url: "https://api.coinmetrics.io/v4".to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn market_metrics_url(&self, metric: &str) -> String {
        format!("{}/timeseries/market-metrics?assets=btc&metrics={}", self.base_url, metric)
    }

    /// Latest realized capitalization in USD.
    pub async fn realized_cap_usd(&self) -> FetchResult<f64> {
        let dto: TimeseriesResponse = self.http.get_json(&self.market_metrics_url("CapRealUSD")).await?;
        dto.data
            .iter()
            .rev()
            .filter_map(|row| row.cap_real_usd.as_deref())
            .find_map(|raw| raw.parse::<f64>().ok().filter(|v| v.is_finite()))
            .ok_or_else(|| MetricError::MalformedResponse("CapRealUSD data missing".into()))
    }

    /// Full USD price history, oldest first; used for the all-time-high
    /// fallback. Unparsable rows are skipped.
    pub async fn price_history_usd(&self) -> FetchResult<Vec<f64>> {
        let dto: TimeseriesResponse = self.http.get_json(&self.market_metrics_url("PriceUSD")).await?;
        let prices: Vec<f64> = dto
            .data
            .iter()
            .filter_map(|row| row.price_usd.as_deref())
            .filter_map(|raw| raw.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .collect();

        if prices.is_empty() {
            return Err(MetricError::MalformedResponse("PriceUSD data missing".into()));
        }
        Ok(prices)
    }
}
