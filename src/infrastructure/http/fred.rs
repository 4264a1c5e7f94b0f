use crate::domain::errors::{FetchResult, MetricError};
use crate::infrastructure::http::JsonHttpClient;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    value: String,
}

/// FRED client for the 1-year Treasury yield (DGS1), the dashboard's
/// risk-free rate. Callers fall back to a configured constant when this
/// source fails, so every error here is survivable.
#[derive(Debug, Clone)]
pub struct FredClient {
    http: JsonHttpClient,
    base_url: String,
}

impl FredClient {
    pub fn new(http: JsonHttpClient) -> Self {
        Self { http, base_url: "https://api.stlouisfed.org/fred".to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn latest_dgs1_url(&self) -> String {
        format!(
            "{}/series/observations?series_id=DGS1&sort_order=desc&limit=1&file_type=json",
            self.base_url
        )
    }

    /// Latest 1-year T-bill yield as a decimal rate (e.g. 0.0475).
    pub async fn annual_risk_free_rate(&self) -> FetchResult<f64> {
        let dto: ObservationsResponse = self.http.get_json(&self.latest_dgs1_url()).await?;
        let yield_pct = dto
            .observations
            .first()
            .and_then(|obs| obs.value.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or_else(|| MetricError::MalformedResponse("DGS1 observation missing".into()))?;
        Ok(yield_pct / 100.0)
    }
}
