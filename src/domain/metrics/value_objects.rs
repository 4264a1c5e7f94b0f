use derive_more::{Constructor, Deref, From, Into};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Value Object - one (timestamp, price) sample from the market-data provider
#[derive(Debug, Clone, Copy, PartialEq, Constructor, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp_millis: u64,
    pub price_usd: f64,
}

/// Ordered sequence of `PricePoint` with unique ascending timestamps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, sorting and deduplicating by timestamp. For duplicate
    /// timestamps the later sample wins.
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by_key(|p| p.timestamp_millis);
        points.reverse();
        points.dedup_by_key(|p| p.timestamp_millis);
        points.reverse();
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Closing prices in time order.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price_usd).collect()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price_usd)
    }
}

/// Weekly-spaced closing prices derived from a `PriceSeries`. Its length
/// decides whether a downstream statistic can be computed at all.
#[derive(Debug, Clone, PartialEq, Default, Deref, From, Into)]
pub struct WeeklySeries(Vec<f64>);

impl WeeklySeries {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// A successfully computed metric value plus the moment it was computed;
/// this is exactly what gets serialized into the cache.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub value: f64,
    pub computed_at_millis: u64,
}

/// User-visible outcome of one metric run. Every error condition collapses
/// into `Stale` or `Unavailable`; callers never see a raw error.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricOutcome {
    /// Newly computed and written to the cache.
    Fresh(MetricResult),
    /// Served from a still-valid cache entry, no network involved.
    Cached(MetricResult),
    /// Expired cache entry served because every source failed.
    Stale(MetricResult),
    /// No value and nothing cached to fall back on.
    Unavailable,
}

impl MetricOutcome {
    pub fn value(&self) -> Option<f64> {
        match self {
            MetricOutcome::Fresh(r) | MetricOutcome::Cached(r) | MetricOutcome::Stale(r) => {
                Some(r.value)
            }
            MetricOutcome::Unavailable => None,
        }
    }
}

/// The ten dashboard panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum MetricKind {
    SpotPrice,
    RealizedPrice,
    AllTimeHigh,
    MarketCapVolumeRatio,
    MayerMultiple,
    MvrvRatio,
    PuellMultiple,
    Nupl,
    SharpeRatio,
    WeeklyRsi,
}

impl MetricKind {
    /// Key under which the metric's `MetricResult` lives in the store.
    pub fn cache_key(self) -> &'static str {
        match self {
            Self::SpotPrice => "btcPriceUsd",
            Self::RealizedPrice => "realizedPriceUsd",
            Self::AllTimeHigh => "athPriceUsd",
            Self::MarketCapVolumeRatio => "mcapVolumeRatio",
            Self::MayerMultiple => "mayerMultiple",
            Self::MvrvRatio => "mvrvRatio",
            Self::PuellMultiple => "puellMultiple",
            Self::Nupl => "nupl",
            Self::SharpeRatio => "sharpeRatio",
            Self::WeeklyRsi => "rsi",
        }
    }

    /// Id of the named output slot in the page.
    pub fn slot_id(self) -> &'static str {
        match self {
            Self::SpotPrice => "btc-price-usd",
            Self::RealizedPrice => "realized-price-usd",
            Self::AllTimeHigh => "ath-price-usd",
            Self::MarketCapVolumeRatio => "mcap-volume-ratio",
            Self::MayerMultiple => "mayer-multiple",
            Self::MvrvRatio => "mvrv-ratio",
            Self::PuellMultiple => "puell-multiple",
            Self::Nupl => "nupl",
            Self::SharpeRatio => "sharpe-ratio",
            Self::WeeklyRsi => "rsi",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SpotPrice => "Bitcoin Price",
            Self::RealizedPrice => "Realized Price",
            Self::AllTimeHigh => "All-Time High",
            Self::MarketCapVolumeRatio => "Market Cap / Volume",
            Self::MayerMultiple => "Mayer Multiple",
            Self::MvrvRatio => "MVRV Ratio",
            Self::PuellMultiple => "Puell Multiple",
            Self::Nupl => "NUPL",
            Self::SharpeRatio => "Sharpe Ratio",
            Self::WeeklyRsi => "Weekly RSI",
        }
    }

    /// Dollar-denominated panels render as `$x.xx`, the rest as labeled ratios.
    pub fn is_dollar_denominated(self) -> bool {
        matches!(self, Self::SpotPrice | Self::RealizedPrice | Self::AllTimeHigh)
    }

    /// Fast (1 hour) vs slow (14 days) cache validity class.
    pub fn is_fast_moving(self) -> bool {
        matches!(self, Self::SpotPrice | Self::MarketCapVolumeRatio)
    }
}
