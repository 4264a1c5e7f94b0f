use crate::domain::errors::{FetchResult, MetricError};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::metrics::{PricePoint, PriceSeries};
use crate::infrastructure::http::JsonHttpClient;
use serde::Deserialize;

/// Current market figures for Bitcoin, straight off the coin endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarketSnapshot {
    pub price_usd: f64,
    pub change_24h_pct: f64,
    pub market_cap_usd: f64,
    pub volume_24h_usd: f64,
    pub ath_usd: f64,
}

#[derive(Debug, Deserialize)]
struct CoinResponse {
    market_data: Option<MarketDataDto>,
}

#[derive(Debug, Deserialize)]
struct MarketDataDto {
    current_price: CurrencyMap,
    price_change_percentage_24h: Option<f64>,
    market_cap: CurrencyMap,
    total_volume: CurrencyMap,
    ath: CurrencyMap,
}

#[derive(Debug, Default, Deserialize)]
struct CurrencyMap {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(f64, f64)>,
}

/// Primary market-data provider (price, market figures, daily history).
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http: JsonHttpClient,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new(http: JsonHttpClient) -> Self {
        Self { http, base_url: "https://api.coingecko.com/api/v3".to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn coin_url(&self) -> String {
        format!("{}/coins/bitcoin?market_data=true", self.base_url)
    }

    fn market_chart_url(&self, days: u32) -> String {
        format!(
            "{}/coins/bitcoin/market_chart?vs_currency=usd&days={}&interval=daily",
            self.base_url, days
        )
    }

    /// Fetch the current market snapshot. Missing fields are reported as
    /// `MalformedResponse`; only the 24h change is tolerated as absent
    /// (it merely drives the panel color).
    pub async fn market_snapshot(&self) -> FetchResult<MarketSnapshot> {
        let dto: CoinResponse = self.http.get_json(&self.coin_url()).await?;
        let market_data = dto
            .market_data
            .ok_or_else(|| MetricError::MalformedResponse("market_data field missing".into()))?;

        let required = |field: Option<f64>, name: &str| {
            field.ok_or_else(|| MetricError::MalformedResponse(format!("{} field missing", name)))
        };

        Ok(MarketSnapshot {
            price_usd: required(market_data.current_price.usd, "current_price.usd")?,
            change_24h_pct: market_data.price_change_percentage_24h.unwrap_or(0.0),
            market_cap_usd: required(market_data.market_cap.usd, "market_cap.usd")?,
            volume_24h_usd: required(market_data.total_volume.usd, "total_volume.usd")?,
            ath_usd: required(market_data.ath.usd, "ath.usd")?,
        })
    }

    /// Fetch the daily close history for the last `days` days.
    pub async fn daily_prices(&self, days: u32) -> FetchResult<PriceSeries> {
        let dto: MarketChartResponse = self.http.get_json(&self.market_chart_url(days)).await?;
        let points = dto
            .prices
            .iter()
            .filter(|(_, price)| price.is_finite())
            .map(|(ts, price)| PricePoint::new(*ts as u64, *price))
            .collect::<Vec<_>>();

        if points.is_empty() {
            return Err(MetricError::MalformedResponse("prices array empty".into()));
        }

        get_logger().info(
            LogComponent::Infrastructure("CoinGecko"),
            &format!("loaded {} daily prices ({} days requested)", points.len(), days),
        );
        Ok(PriceSeries::from_points(points))
    }
}
