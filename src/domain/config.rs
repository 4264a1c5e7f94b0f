/// Bitcoin issuance parameters. These change at every halving, so they are
/// configuration rather than constants baked into the Puell calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolParams {
    pub block_reward_btc: f64,
    pub blocks_per_day: f64,
}

impl ProtocolParams {
    pub fn daily_issuance_btc(&self) -> f64 {
        self.block_reward_btc * self.blocks_per_day
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        // Fourth-epoch reward (post April 2024 halving).
        Self { block_reward_btc: 3.125, blocks_per_day: 144.0 }
    }
}

/// All tunable knobs of the dashboard in one place.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub protocol: ProtocolParams,
    /// Realized cap approximation when the on-chain source is down:
    /// `market_cap * ratio`. Fixed at 0.8 - never vary this silently.
    pub realized_cap_fallback_ratio: f64,
    /// Circulating supply used to turn realized cap into realized price.
    pub circulating_supply_btc: f64,
    /// Annual risk-free rate used when the FRED lookup fails.
    pub annual_risk_free_fallback: f64,
    pub request_timeout_ms: u32,
    /// Wait before the single retry after an HTTP 429.
    pub retry_backoff_ms: u32,
    /// Validity window for price-like, fast-moving values.
    pub fast_cache_validity_ms: u64,
    /// Validity window for derived ratio metrics.
    pub slow_cache_validity_ms: u64,
    /// Use the 104-week exponentially smoothed RSI instead of the 15-week form.
    pub rsi_two_year_smoothing: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            protocol: ProtocolParams::default(),
            realized_cap_fallback_ratio: 0.8,
            circulating_supply_btc: 19_700_000.0,
            annual_risk_free_fallback: 0.045,
            request_timeout_ms: 5_000,
            retry_backoff_ms: 2_000,
            fast_cache_validity_ms: 60 * 60 * 1000,
            slow_cache_validity_ms: 14 * 24 * 60 * 60 * 1000,
            rsi_two_year_smoothing: false,
        }
    }
}
