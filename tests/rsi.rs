use market_health_wasm::domain::errors::MetricError;
use market_health_wasm::domain::metrics::calculators::{
    RSI_MIN_WEEKS, RSI_SMOOTHED_MIN_WEEKS, weekly_rsi, weekly_rsi_smoothed,
};

fn rising(len: usize) -> Vec<f64> {
    (0..len).map(|i| 100.0 + i as f64).collect()
}

fn falling(len: usize) -> Vec<f64> {
    (0..len).map(|i| 1000.0 - i as f64).collect()
}

#[test]
fn fourteen_points_are_insufficient() {
    assert!(matches!(
        weekly_rsi(&rising(14)),
        Err(MetricError::InsufficientData { required: RSI_MIN_WEEKS, actual: 14 })
    ));
}

#[test]
fn all_gains_saturate_near_100() {
    let value = weekly_rsi(&rising(RSI_MIN_WEEKS)).unwrap();
    assert!(value > 99.9, "got {value}");
    assert!(value <= 100.0);
}

#[test]
fn all_losses_read_zero() {
    let value = weekly_rsi(&falling(RSI_MIN_WEEKS)).unwrap();
    assert!(value.abs() < 1e-9, "got {value}");
}

#[test]
fn balanced_gains_and_losses_read_50() {
    // Alternating +1/-1 differences: equal average gain and loss.
    let prices: Vec<f64> =
        (0..RSI_MIN_WEEKS).map(|i| if i % 2 == 0 { 100.0 } else { 101.0 }).collect();
    let value = weekly_rsi(&prices).unwrap();
    assert!((value - 50.0).abs() < 1e-9, "got {value}");
}

#[test]
fn smoothed_variant_needs_two_years() {
    assert!(matches!(
        weekly_rsi_smoothed(&rising(RSI_SMOOTHED_MIN_WEEKS - 1)),
        Err(MetricError::InsufficientData { required: RSI_SMOOTHED_MIN_WEEKS, actual: 103 })
    ));
}

#[test]
fn smoothed_all_gains_also_saturate() {
    let value = weekly_rsi_smoothed(&rising(RSI_SMOOTHED_MIN_WEEKS)).unwrap();
    assert!(value > 99.9, "got {value}");
}

#[test]
fn smoothed_differs_from_simple_when_old_trend_reversed() {
    // Two years: one falling year followed by one rising year. The simple
    // form sees only the recent gains; the smoothed form still carries the
    // old losses and must read lower.
    let mut prices = falling(52);
    let bottom = *prices.last().unwrap();
    prices.extend((1..=52).map(|i| bottom + i as f64));
    let simple = weekly_rsi(&prices).unwrap();
    let smoothed = weekly_rsi_smoothed(&prices).unwrap();
    assert!(smoothed < simple, "smoothed {smoothed} vs simple {simple}");
}
