use crate::domain::errors::{FetchResult, MetricError};
use crate::domain::logging::{LogComponent, get_logger};
use futures::future::{Either, select};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;

pub mod coingecko;
pub mod coinmetrics;
pub mod fred;

/// Thin JSON GET client shared by all providers: bounded timeout, status
/// mapping (429 becomes `RateLimited` so the orchestrator can retry) and
/// typed deserialization.
#[derive(Debug, Clone)]
pub struct JsonHttpClient {
    timeout_ms: u32,
}

impl JsonHttpClient {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }

    pub async fn get_json<T>(&self, url: &str) -> FetchResult<T>
    where
        T: DeserializeOwned,
    {
        crate::log_debug!(LogComponent::Infrastructure("Http"), "GET {url}");

        let send = Request::get(url).send();
        let timeout = TimeoutFuture::new(self.timeout_ms);
        futures::pin_mut!(send);
        futures::pin_mut!(timeout);

        let response = match select(send, timeout).await {
            Either::Left((result, _)) => result
                .map_err(|e| MetricError::NetworkFailure(format!("request failed: {e:?}")))?,
            Either::Right(_) => {
                return Err(MetricError::NetworkFailure(format!(
                    "request timed out after {} ms",
                    self.timeout_ms
                )));
            }
        };

        if response.status() == 429 {
            return Err(MetricError::RateLimited);
        }
        if !response.ok() {
            get_logger().warn(
                LogComponent::Infrastructure("Http"),
                &format!("HTTP {} - {} for {}", response.status(), response.status_text(), url),
            );
            return Err(MetricError::NetworkFailure(format!("HTTP {}", response.status())));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| MetricError::MalformedResponse(format!("invalid JSON: {e:?}")))
    }
}
