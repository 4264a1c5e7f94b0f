//! Pure statistic calculators. Every function here is total over its
//! guarded domain: short series fail with `InsufficientData` and zero
//! divisors with `DivisionByZero` instead of producing NaN or Infinity.

use crate::domain::config::ProtocolParams;
use crate::domain::errors::MetricError;

/// Minimum weekly points for the Sharpe ratio (one year of weekly returns).
pub const SHARPE_MIN_WEEKS: usize = 52;
/// RSI averaging window.
pub const RSI_PERIOD: usize = 14;
/// Minimum weekly points for the simple RSI (14 differences).
pub const RSI_MIN_WEEKS: usize = 15;
/// Minimum weekly points for the exponentially smoothed two-year RSI.
pub const RSI_SMOOTHED_MIN_WEEKS: usize = 104;
/// Mayer multiple moving-average window, in daily points.
pub const MAYER_WINDOW_DAYS: usize = 200;
/// Puell multiple moving-average window, in daily points.
pub const PUELL_WINDOW_DAYS: usize = 365;

const WEEKS_PER_YEAR: f64 = 52.0;
/// Substituted for an exactly-zero average loss so an all-gains window
/// yields RSI ~100 instead of a division failure.
const ZERO_LOSS_FLOOR: f64 = 0.0001;

/// Period returns `(p[i] - p[i-1]) / p[i-1]` of consecutive weekly prices.
/// Scale-invariant: multiplying every price by k > 0 leaves them unchanged.
pub fn weekly_returns(weekly: &[f64]) -> Vec<f64> {
    weekly.windows(2).map(|pair| (pair[1] - pair[0]) / pair[0]).collect()
}

/// Annualized Sharpe ratio over weekly returns. Sample variance (n - 1
/// divisor); the annual risk-free rate is converted to a weekly rate before
/// subtraction and the quotient is annualized by sqrt(52).
pub fn sharpe_ratio(weekly: &[f64], annual_risk_free_rate: f64) -> Result<f64, MetricError> {
    if weekly.len() < SHARPE_MIN_WEEKS {
        return Err(MetricError::InsufficientData {
            required: SHARPE_MIN_WEEKS,
            actual: weekly.len(),
        });
    }

    let returns = weekly_returns(weekly);
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    let std_dev = variance.sqrt();
    if std_dev == 0.0 {
        return Err(MetricError::DivisionByZero("zero return standard deviation"));
    }

    let weekly_risk_free = annual_risk_free_rate / WEEKS_PER_YEAR;
    Ok((mean - weekly_risk_free) / std_dev * WEEKS_PER_YEAR.sqrt())
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    let loss = if avg_loss == 0.0 { ZERO_LOSS_FLOOR } else { avg_loss };
    let rs = avg_gain / loss;
    100.0 - 100.0 / (1.0 + rs)
}

fn differences(weekly: &[f64]) -> Vec<f64> {
    weekly.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Simple weekly RSI: average gain and loss over the most recent 14
/// differences, each divided by the full period.
pub fn weekly_rsi(weekly: &[f64]) -> Result<f64, MetricError> {
    if weekly.len() < RSI_MIN_WEEKS {
        return Err(MetricError::InsufficientData { required: RSI_MIN_WEEKS, actual: weekly.len() });
    }

    let diffs = differences(weekly);
    let window = &diffs[diffs.len() - RSI_PERIOD..];
    let avg_gain = window.iter().filter(|d| **d > 0.0).sum::<f64>() / RSI_PERIOD as f64;
    let avg_loss = window.iter().filter(|d| **d < 0.0).map(|d| d.abs()).sum::<f64>()
        / RSI_PERIOD as f64;

    Ok(rsi_from_averages(avg_gain, avg_loss))
}

/// Two-year RSI variant: start from the plain 14-difference averages, then
/// fold the older differences in backward with the classic Wilder smoothing
/// `avg = (avg * 13 + x) / 14`, from the window boundary down to the oldest
/// difference.
pub fn weekly_rsi_smoothed(weekly: &[f64]) -> Result<f64, MetricError> {
    if weekly.len() < RSI_SMOOTHED_MIN_WEEKS {
        return Err(MetricError::InsufficientData {
            required: RSI_SMOOTHED_MIN_WEEKS,
            actual: weekly.len(),
        });
    }

    let diffs = differences(weekly);
    let boundary = diffs.len() - RSI_PERIOD;
    let mut avg_gain =
        diffs[boundary..].iter().filter(|d| **d > 0.0).sum::<f64>() / RSI_PERIOD as f64;
    let mut avg_loss = diffs[boundary..].iter().filter(|d| **d < 0.0).map(|d| d.abs()).sum::<f64>()
        / RSI_PERIOD as f64;

    for diff in diffs[..boundary].iter().rev() {
        avg_gain = (avg_gain * (RSI_PERIOD as f64 - 1.0) + diff.max(0.0)) / RSI_PERIOD as f64;
        avg_loss = (avg_loss * (RSI_PERIOD as f64 - 1.0) + (-diff).max(0.0)) / RSI_PERIOD as f64;
    }

    Ok(rsi_from_averages(avg_gain, avg_loss))
}

fn trailing_mean(values: &[f64], window: usize) -> f64 {
    let tail = &values[values.len() - window..];
    tail.iter().sum::<f64>() / window as f64
}

/// Mayer multiple: spot price over the 200-day simple moving average.
pub fn mayer_multiple(current_price: f64, daily_closes: &[f64]) -> Result<f64, MetricError> {
    if daily_closes.len() < MAYER_WINDOW_DAYS {
        return Err(MetricError::InsufficientData {
            required: MAYER_WINDOW_DAYS,
            actual: daily_closes.len(),
        });
    }
    let ma = trailing_mean(daily_closes, MAYER_WINDOW_DAYS);
    if ma == 0.0 {
        return Err(MetricError::DivisionByZero("zero 200-day moving average"));
    }
    Ok(current_price / ma)
}

/// Puell multiple: today's issuance value over its 365-day moving average.
/// Issuance value per day is `block_reward * blocks_per_day * price`.
pub fn puell_multiple(daily_closes: &[f64], params: &ProtocolParams) -> Result<f64, MetricError> {
    if daily_closes.len() < PUELL_WINDOW_DAYS {
        return Err(MetricError::InsufficientData {
            required: PUELL_WINDOW_DAYS,
            actual: daily_closes.len(),
        });
    }
    let issuance: Vec<f64> =
        daily_closes.iter().map(|price| params.daily_issuance_btc() * price).collect();
    let today = issuance[issuance.len() - 1];
    let ma = trailing_mean(&issuance, PUELL_WINDOW_DAYS);
    if ma == 0.0 {
        return Err(MetricError::DivisionByZero("zero 365-day issuance average"));
    }
    Ok(today / ma)
}

/// MVRV ratio: market cap over realized cap.
pub fn mvrv_ratio(market_cap: f64, realized_cap: f64) -> Result<f64, MetricError> {
    if realized_cap == 0.0 {
        return Err(MetricError::DivisionByZero("zero realized cap"));
    }
    Ok(market_cap / realized_cap)
}

/// NUPL: net unrealized profit/loss, `(market cap - realized cap) / market cap`.
pub fn nupl(market_cap: f64, realized_cap: f64) -> Result<f64, MetricError> {
    if market_cap == 0.0 {
        return Err(MetricError::DivisionByZero("zero market cap"));
    }
    Ok((market_cap - realized_cap) / market_cap)
}

/// Market-cap to 24h-volume ratio.
pub fn market_cap_volume_ratio(market_cap: f64, volume_24h: f64) -> Result<f64, MetricError> {
    if volume_24h == 0.0 {
        return Err(MetricError::DivisionByZero("zero 24h volume"));
    }
    Ok(market_cap / volume_24h)
}

/// Realized price: realized cap spread over the circulating supply.
pub fn realized_price(realized_cap: f64, circulating_supply: f64) -> Result<f64, MetricError> {
    if circulating_supply == 0.0 {
        return Err(MetricError::DivisionByZero("zero circulating supply"));
    }
    Ok(realized_cap / circulating_supply)
}
