use market_health_wasm::domain::config::ProtocolParams;
use market_health_wasm::domain::errors::MetricError;
use market_health_wasm::domain::metrics::calculators::{
    MAYER_WINDOW_DAYS, PUELL_WINDOW_DAYS, market_cap_volume_ratio, mayer_multiple, mvrv_ratio,
    nupl, puell_multiple, realized_price,
};

#[test]
fn mayer_is_price_over_200_day_average() {
    let closes = vec![100.0; MAYER_WINDOW_DAYS];
    let value = mayer_multiple(120.0, &closes).unwrap();
    assert!((value - 1.2).abs() < 1e-12);
}

#[test]
fn mayer_short_history_is_insufficient() {
    let closes = vec![100.0; MAYER_WINDOW_DAYS - 1];
    assert!(matches!(
        mayer_multiple(120.0, &closes),
        Err(MetricError::InsufficientData { required: MAYER_WINDOW_DAYS, actual: 199 })
    ));
}

#[test]
fn mayer_zero_average_is_guarded() {
    let closes = vec![0.0; MAYER_WINDOW_DAYS];
    assert!(matches!(mayer_multiple(120.0, &closes), Err(MetricError::DivisionByZero(_))));
}

#[test]
fn puell_of_constant_prices_is_one() {
    let closes = vec![50_000.0; PUELL_WINDOW_DAYS];
    let value = puell_multiple(&closes, &ProtocolParams::default()).unwrap();
    assert!((value - 1.0).abs() < 1e-12);
}

#[test]
fn puell_reacts_to_a_price_spike() {
    let mut closes = vec![50_000.0; PUELL_WINDOW_DAYS];
    *closes.last_mut().unwrap() = 100_000.0;
    let value = puell_multiple(&closes, &ProtocolParams::default()).unwrap();
    assert!(value > 1.9, "got {value}");
}

#[test]
fn puell_short_history_is_insufficient() {
    let closes = vec![50_000.0; PUELL_WINDOW_DAYS - 1];
    assert!(matches!(
        puell_multiple(&closes, &ProtocolParams::default()),
        Err(MetricError::InsufficientData { required: PUELL_WINDOW_DAYS, actual: 364 })
    ));
}

#[test]
fn mvrv_and_nupl_agree_on_the_caps() {
    let market_cap = 1_000_000.0;
    let realized_cap = 800_000.0;
    assert!((mvrv_ratio(market_cap, realized_cap).unwrap() - 1.25).abs() < 1e-12);
    assert!((nupl(market_cap, realized_cap).unwrap() - 0.2).abs() < 1e-12);
}

#[test]
fn nupl_goes_negative_below_realized_cap() {
    let value = nupl(800_000.0, 1_000_000.0).unwrap();
    assert!((value + 0.25).abs() < 1e-12);
}

#[test]
fn cap_ratios_guard_zero_denominators() {
    assert!(matches!(mvrv_ratio(1.0, 0.0), Err(MetricError::DivisionByZero(_))));
    assert!(matches!(nupl(0.0, 1.0), Err(MetricError::DivisionByZero(_))));
    assert!(matches!(market_cap_volume_ratio(1.0, 0.0), Err(MetricError::DivisionByZero(_))));
    assert!(matches!(realized_price(1.0, 0.0), Err(MetricError::DivisionByZero(_))));
}

#[test]
fn mcap_volume_ratio_value() {
    let value = market_cap_volume_ratio(2_000_000_000_000.0, 40_000_000_000.0).unwrap();
    assert!((value - 50.0).abs() < 1e-9);
}

#[test]
fn realized_price_spreads_cap_over_supply() {
    let value = realized_price(788_000_000_000.0, 19_700_000.0).unwrap();
    assert!((value - 40_000.0).abs() < 1e-6);
}
