//! Application service wiring the ten metric panels: each panel pairs a
//! fetch plan (which provider calls, which fallback) with a pure calculator
//! and runs through the shared orchestrator, then renders via the surface.

use std::cell::Cell;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::application::orchestrator::{Delay, MetricRequest, no_fallback, run_metric};
use crate::domain::cache::{KeyValueStore, MetricCache};
use crate::domain::config::DashboardConfig;
use crate::domain::errors::MetricError;
use crate::domain::logging::{LogComponent, TimeProvider};
use crate::domain::metrics::calculators::{
    market_cap_volume_ratio, mayer_multiple, mvrv_ratio, nupl, puell_multiple, realized_price,
    sharpe_ratio, weekly_rsi, weekly_rsi_smoothed,
};
use crate::domain::metrics::presenter::{MetricSurface, change_background, present};
use crate::domain::metrics::{MetricKind, MetricResult, WEEK_MILLIS, resample_weekly};
use crate::infrastructure::http::JsonHttpClient;
use crate::infrastructure::http::coingecko::{CoinGeckoClient, MarketSnapshot};
use crate::infrastructure::http::coinmetrics::CoinMetricsClient;
use crate::infrastructure::http::fred::FredClient;
use crate::infrastructure::services::{BrowserDelay, BrowserTimeProvider};
use crate::infrastructure::storage::LocalStorageStore;
use crate::infrastructure::ui::DomMetricSurface;
use crate::{log_info, log_warn};

/// The 24h price change rides along with the spot price fetch but lives in
/// its own cache slot, keyed separately from the metric results.
const CHANGE_24H_KEY: &str = "btcChange24h";

/// Risk-free rate cache slot. Not a panel, so not part of `MetricKind`.
const RISK_FREE_KEY: &str = "riskFreeRate";

/// Days of history requested per windowed metric. One extra day on top of
/// the calculator window keeps the guard satisfied when the provider trims
/// the leading point.
const SHARPE_HISTORY_DAYS: u32 = 365;
const RSI_HISTORY_DAYS: u32 = 365;
const RSI_SMOOTHED_HISTORY_DAYS: u32 = 730;
const MAYER_HISTORY_DAYS: u32 = 200;
const PUELL_HISTORY_DAYS: u32 = 365;

pub struct MetricsDashboard<'a, S, D, U>
where
    S: KeyValueStore,
    D: Delay,
    U: MetricSurface,
{
    store: &'a S,
    time: &'a dyn TimeProvider,
    delay: &'a D,
    surface: &'a U,
    config: DashboardConfig,
    coingecko: CoinGeckoClient,
    coinmetrics: CoinMetricsClient,
    fred: FredClient,
}

impl<'a, S, D, U> MetricsDashboard<'a, S, D, U>
where
    S: KeyValueStore,
    D: Delay,
    U: MetricSurface,
{
    pub fn new(
        store: &'a S,
        time: &'a dyn TimeProvider,
        delay: &'a D,
        surface: &'a U,
        config: DashboardConfig,
    ) -> Self {
        let http = JsonHttpClient::new(config.request_timeout_ms);
        Self {
            store,
            time,
            delay,
            surface,
            config,
            coingecko: CoinGeckoClient::new(http.clone()),
            coinmetrics: CoinMetricsClient::new(http.clone()),
            fred: FredClient::new(http),
        }
    }

    /// Run all panels concurrently. Each panel settles independently, so a
    /// failing provider degrades its own panels and nothing else.
    pub async fn run(&self) {
        log_info!(LogComponent::Application("Dashboard"), "refreshing all panels");

        let panels: Vec<LocalBoxFuture<'_, ()>> = vec![
            self.spot_price_panel().boxed_local(),
            self.realized_price_panel().boxed_local(),
            self.all_time_high_panel().boxed_local(),
            self.mcap_volume_panel().boxed_local(),
            self.mayer_panel().boxed_local(),
            self.mvrv_panel().boxed_local(),
            self.puell_panel().boxed_local(),
            self.nupl_panel().boxed_local(),
            self.sharpe_panel().boxed_local(),
            self.rsi_panel().boxed_local(),
        ];
        futures::future::join_all(panels).await;

        log_info!(LogComponent::Application("Dashboard"), "all panels settled");
    }

    fn request(&self, kind: MetricKind) -> MetricRequest<'static> {
        let validity_ms = if kind.is_fast_moving() {
            self.config.fast_cache_validity_ms
        } else {
            self.config.slow_cache_validity_ms
        };
        MetricRequest {
            cache_key: kind.cache_key(),
            validity_ms,
            retry_backoff_ms: self.config.retry_backoff_ms,
        }
    }

    /// Spot price, colored by 24h change direction. The change value is
    /// captured out of the same snapshot fetch and cached under its own key
    /// so a cache-served price still gets its direction color.
    async fn spot_price_panel(&self) {
        let kind = MetricKind::SpotPrice;
        let observed_change = Cell::new(None);

        let outcome = run_metric(
            self.store,
            self.time,
            self.delay,
            self.request(kind),
            || self.coingecko.market_snapshot(),
            |snapshot: MarketSnapshot| {
                observed_change.set(Some(snapshot.change_24h_pct));
                Ok(snapshot.price_usd)
            },
            no_fallback(),
        )
        .await;

        let change = match observed_change.get() {
            Some(pct) => {
                let result =
                    MetricResult { value: pct, computed_at_millis: self.time.current_timestamp() };
                MetricCache::new(self.store).store(CHANGE_24H_KEY, &result);
                Some(pct)
            }
            None => MetricCache::new(self.store)
                .load_valid(
                    CHANGE_24H_KEY,
                    self.time.current_timestamp(),
                    self.config.fast_cache_validity_ms,
                )
                .map(|r| r.value),
        };

        let mut view = present(kind, &outcome, self.time);
        if outcome.value().is_some() {
            if let Some(pct) = change {
                view.background = Some(change_background(pct));
            }
        }
        self.surface.render(kind.slot_id(), &view);
    }

    /// Realized price from the on-chain realized cap, approximated from the
    /// market cap when the on-chain source is down.
    async fn realized_price_panel(&self) {
        let kind = MetricKind::RealizedPrice;
        let supply = self.config.circulating_supply_btc;

        let outcome = run_metric(
            self.store,
            self.time,
            self.delay,
            self.request(kind),
            || self.coinmetrics.realized_cap_usd(),
            |cap| realized_price(cap, supply),
            Some(|| async move {
                let snapshot = self.coingecko.market_snapshot().await?;
                realized_price(
                    snapshot.market_cap_usd * self.config.realized_cap_fallback_ratio,
                    supply,
                )
            }),
        )
        .await;

        self.surface.render(kind.slot_id(), &present(kind, &outcome, self.time));
    }

    /// All-time high, with the full price history as secondary source.
    async fn all_time_high_panel(&self) {
        let kind = MetricKind::AllTimeHigh;

        let outcome = run_metric(
            self.store,
            self.time,
            self.delay,
            self.request(kind),
            || self.coingecko.market_snapshot(),
            |snapshot: MarketSnapshot| Ok(snapshot.ath_usd),
            Some(|| async move {
                let history = self.coinmetrics.price_history_usd().await?;
                history
                    .into_iter()
                    .reduce(f64::max)
                    .ok_or(MetricError::InsufficientData { required: 1, actual: 0 })
            }),
        )
        .await;

        self.surface.render(kind.slot_id(), &present(kind, &outcome, self.time));
    }

    async fn mcap_volume_panel(&self) {
        let kind = MetricKind::MarketCapVolumeRatio;

        let outcome = run_metric(
            self.store,
            self.time,
            self.delay,
            self.request(kind),
            || self.coingecko.market_snapshot(),
            |snapshot: MarketSnapshot| {
                market_cap_volume_ratio(snapshot.market_cap_usd, snapshot.volume_24h_usd)
            },
            no_fallback(),
        )
        .await;

        self.surface.render(kind.slot_id(), &present(kind, &outcome, self.time));
    }

    async fn mayer_panel(&self) {
        let kind = MetricKind::MayerMultiple;

        let outcome = run_metric(
            self.store,
            self.time,
            self.delay,
            self.request(kind),
            || self.coingecko.daily_prices(MAYER_HISTORY_DAYS),
            |series| {
                let closes = series.prices();
                let current = series
                    .last_price()
                    .ok_or(MetricError::InsufficientData { required: 1, actual: 0 })?;
                mayer_multiple(current, &closes)
            },
            no_fallback(),
        )
        .await;

        self.surface.render(kind.slot_id(), &present(kind, &outcome, self.time));
    }

    async fn mvrv_panel(&self) {
        let kind = MetricKind::MvrvRatio;

        let outcome = run_metric(
            self.store,
            self.time,
            self.delay,
            self.request(kind),
            || self.caps(),
            |(market_cap, realized_cap)| mvrv_ratio(market_cap, realized_cap),
            no_fallback(),
        )
        .await;

        self.surface.render(kind.slot_id(), &present(kind, &outcome, self.time));
    }

    async fn puell_panel(&self) {
        let kind = MetricKind::PuellMultiple;

        let outcome = run_metric(
            self.store,
            self.time,
            self.delay,
            self.request(kind),
            || self.coingecko.daily_prices(PUELL_HISTORY_DAYS),
            |series| puell_multiple(&series.prices(), &self.config.protocol),
            no_fallback(),
        )
        .await;

        self.surface.render(kind.slot_id(), &present(kind, &outcome, self.time));
    }

    async fn nupl_panel(&self) {
        let kind = MetricKind::Nupl;

        let outcome = run_metric(
            self.store,
            self.time,
            self.delay,
            self.request(kind),
            || self.caps(),
            |(market_cap, realized_cap)| nupl(market_cap, realized_cap),
            no_fallback(),
        )
        .await;

        self.surface.render(kind.slot_id(), &present(kind, &outcome, self.time));
    }

    async fn sharpe_panel(&self) {
        let kind = MetricKind::SharpeRatio;

        let outcome = run_metric(
            self.store,
            self.time,
            self.delay,
            self.request(kind),
            || async move {
                let risk_free = self.risk_free_rate().await;
                let series = self.coingecko.daily_prices(SHARPE_HISTORY_DAYS).await?;
                Ok((risk_free, series))
            },
            |(risk_free, series)| {
                let weekly = resample_weekly(&series, WEEK_MILLIS);
                sharpe_ratio(weekly.as_slice(), risk_free)
            },
            no_fallback(),
        )
        .await;

        self.surface.render(kind.slot_id(), &present(kind, &outcome, self.time));
    }

    async fn rsi_panel(&self) {
        let kind = MetricKind::WeeklyRsi;
        let smoothed = self.config.rsi_two_year_smoothing;
        let days = if smoothed { RSI_SMOOTHED_HISTORY_DAYS } else { RSI_HISTORY_DAYS };

        let outcome = run_metric(
            self.store,
            self.time,
            self.delay,
            self.request(kind),
            || self.coingecko.daily_prices(days),
            |series| {
                let weekly = resample_weekly(&series, WEEK_MILLIS);
                if smoothed {
                    weekly_rsi_smoothed(weekly.as_slice())
                } else {
                    weekly_rsi(weekly.as_slice())
                }
            },
            no_fallback(),
        )
        .await;

        self.surface.render(kind.slot_id(), &present(kind, &outcome, self.time));
    }

    /// Market cap and realized cap as one unit, for MVRV and NUPL. A failed
    /// realized-cap lookup degrades to the market-cap approximation rather
    /// than failing the metric.
    async fn caps(&self) -> Result<(f64, f64), MetricError> {
        let snapshot = self.coingecko.market_snapshot().await?;
        let realized_cap = match self.coinmetrics.realized_cap_usd().await {
            Ok(cap) => cap,
            Err(e) => {
                log_warn!(
                    LogComponent::Application("Dashboard"),
                    "realized cap source failed ({e}), approximating from market cap"
                );
                snapshot.market_cap_usd * self.config.realized_cap_fallback_ratio
            }
        };
        Ok((snapshot.market_cap_usd, realized_cap))
    }

    /// Annual risk-free rate, cached like the fast-moving values. The
    /// configured constant backstops a failed FRED lookup, so this always
    /// yields a rate.
    async fn risk_free_rate(&self) -> f64 {
        let request = MetricRequest {
            cache_key: RISK_FREE_KEY,
            validity_ms: self.config.fast_cache_validity_ms,
            retry_backoff_ms: self.config.retry_backoff_ms,
        };
        let fallback_rate = self.config.annual_risk_free_fallback;

        run_metric(
            self.store,
            self.time,
            self.delay,
            request,
            || self.fred.annual_risk_free_rate(),
            Ok,
            Some(move || futures::future::ready(Ok(fallback_rate))),
        )
        .await
        .value()
        .unwrap_or(fallback_rate)
    }
}

/// Entry point for the browser: wire the production implementations and run
/// one refresh pass.
pub async fn run_dashboard(config: DashboardConfig) {
    let store = LocalStorageStore;
    let time = BrowserTimeProvider::new();
    let delay = BrowserDelay;
    let surface = DomMetricSurface::new();

    MetricsDashboard::new(&store, &time, &delay, &surface, config).run().await;
}
