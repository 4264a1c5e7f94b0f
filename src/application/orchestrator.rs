//! The one generic cache-aware fetch orchestrator every metric panel runs
//! through, instead of each panel re-implementing the cache/retry/fallback
//! control flow. State machine per request:
//!
//! `ServingCache -> Fetching -> {Success, RetryOnce -> {Success, Failed}}
//!  -> ServingFresh | ServingStaleOnFailure | ServingUnavailable`

use std::future::Future;

use crate::domain::cache::{KeyValueStore, MetricCache};
use crate::domain::errors::MetricError;
use crate::domain::logging::{LogComponent, TimeProvider, get_logger};
use crate::domain::metrics::{MetricOutcome, MetricResult};

/// Suspension primitive for the retry back-off. Injected so the control
/// flow stays testable without a browser event loop.
pub trait Delay {
    fn delay(&self, ms: u32) -> impl Future<Output = ()>;
}

/// Per-run parameters: where the result lives and how long it stays valid.
#[derive(Debug, Clone, Copy)]
pub struct MetricRequest<'a> {
    pub cache_key: &'a str,
    pub validity_ms: u64,
    pub retry_backoff_ms: u32,
}

/// Placeholder for metrics without a secondary source.
pub fn no_fallback() -> Option<fn() -> futures::future::Ready<Result<f64, MetricError>>> {
    None
}

/// Run one metric: serve a valid cache entry if present, otherwise fetch
/// (retrying exactly once on throttling), compute, fall back to the
/// secondary source on primary failure, cache any success, and degrade to
/// a stale entry or `Unavailable` when everything fails.
pub async fn run_metric<R, F, FFut, C, B, BFut, S, D>(
    store: &S,
    time: &dyn TimeProvider,
    delay: &D,
    request: MetricRequest<'_>,
    fetch: F,
    compute: C,
    fallback: Option<B>,
) -> MetricOutcome
where
    S: KeyValueStore,
    D: Delay,
    F: Fn() -> FFut,
    FFut: Future<Output = Result<R, MetricError>>,
    C: FnOnce(R) -> Result<f64, MetricError>,
    B: FnOnce() -> BFut,
    BFut: Future<Output = Result<f64, MetricError>>,
{
    let cache = MetricCache::new(store);
    let key = request.cache_key;

    if let Some(hit) = cache.load_valid(key, time.current_timestamp(), request.validity_ms) {
        crate::log_debug!(LogComponent::Application("Orchestrator"), "cache hit for {key}");
        return MetricOutcome::Cached(hit);
    }

    let primary = match fetch_with_retry(&fetch, delay, request.retry_backoff_ms, key).await {
        Ok(raw) => compute(raw),
        Err(e) => Err(e),
    };

    let value = match primary {
        Ok(v) => Ok(v),
        Err(e) => match fallback {
            Some(secondary) => {
                get_logger().warn(
                    LogComponent::Application("Orchestrator"),
                    &format!("primary source failed for {}: {}, trying fallback", key, e),
                );
                secondary().await
            }
            None => Err(e),
        },
    };

    match value {
        Ok(v) => {
            let result = MetricResult { value: v, computed_at_millis: time.current_timestamp() };
            cache.store(key, &result);
            MetricOutcome::Fresh(result)
        }
        Err(e) => {
            get_logger().error(
                LogComponent::Application("Orchestrator"),
                &format!("all sources failed for {}: {}", key, e),
            );
            match cache.load(key) {
                Some(stale) => MetricOutcome::Stale(stale),
                None => MetricOutcome::Unavailable,
            }
        }
    }
}

/// One fetch, plus exactly one retry after the back-off when the first
/// attempt was throttled. A second throttle (or any retry failure) is
/// terminal for the source.
async fn fetch_with_retry<R, F, FFut, D>(
    fetch: &F,
    delay: &D,
    backoff_ms: u32,
    key: &str,
) -> Result<R, MetricError>
where
    D: Delay,
    F: Fn() -> FFut,
    FFut: Future<Output = Result<R, MetricError>>,
{
    match fetch().await {
        Err(MetricError::RateLimited) => {
            get_logger().warn(
                LogComponent::Application("Orchestrator"),
                &format!("throttling detected for {}, retrying once", key),
            );
            delay.delay(backoff_ms).await;
            fetch().await
        }
        other => other,
    }
}
