use market_health_wasm::domain::logging::TimeProvider;
use market_health_wasm::domain::metrics::presenter::{
    Severity, UNAVAILABLE_BACKGROUND, change_background, present, thresholds,
};
use market_health_wasm::domain::metrics::{MetricKind, MetricOutcome, MetricResult};

struct FixedTime;

impl TimeProvider for FixedTime {
    fn current_timestamp(&self) -> u64 {
        1_700_000_000_000
    }

    fn format_timestamp(&self, _timestamp: u64) -> String {
        "Jan 2, 2026".to_string()
    }
}

fn result(value: f64) -> MetricResult {
    MetricResult { value, computed_at_millis: 0 }
}

#[test]
fn rsi_tiers_cover_the_axis() {
    let table = thresholds(MetricKind::WeeklyRsi).unwrap();
    assert_eq!(table.classify(25.0), Severity::VeryLow);
    assert_eq!(table.classify(35.0), Severity::Low);
    assert_eq!(table.classify(50.0), Severity::Neutral);
    assert_eq!(table.classify(65.0), Severity::High);
    assert_eq!(table.classify(75.0), Severity::VeryHigh);
}

#[test]
fn tier_bounds_are_inclusive() {
    let table = thresholds(MetricKind::WeeklyRsi).unwrap();
    assert_eq!(table.classify(30.0), Severity::VeryLow);
    assert_eq!(table.classify(70.0), Severity::High);
}

#[test]
fn severity_colors() {
    assert_eq!(Severity::VeryLow.color(), "#28a745");
    assert_eq!(Severity::Low.color(), "#90ee90");
    assert_eq!(Severity::Neutral.color(), "#fff3cd");
    assert_eq!(Severity::High.color(), "#f08080");
    assert_eq!(Severity::VeryHigh.color(), "#dc143c");
}

#[test]
fn price_panels_carry_no_tier_table() {
    assert!(thresholds(MetricKind::SpotPrice).is_none());
    assert!(thresholds(MetricKind::RealizedPrice).is_none());
    assert!(thresholds(MetricKind::AllTimeHigh).is_none());
    assert!(thresholds(MetricKind::MarketCapVolumeRatio).is_none());
}

#[test]
fn change_direction_colors() {
    assert_eq!(change_background(0.5), "#28a745");
    assert_eq!(change_background(-0.5), "#dc143c");
    assert_eq!(change_background(0.05), "#cccccc");
    assert_eq!(change_background(-0.05), "#cccccc");
}

#[test]
fn fresh_dollar_value_renders_plain() {
    let view = present(MetricKind::SpotPrice, &MetricOutcome::Fresh(result(64_123.456)), &FixedTime);
    assert_eq!(view.text, "$64123.46");
    assert_eq!(view.background, None);
}

#[test]
fn fresh_ratio_gets_its_tier_color() {
    let view =
        present(MetricKind::MayerMultiple, &MetricOutcome::Fresh(result(2.5)), &FixedTime);
    assert_eq!(view.text, "Mayer Multiple: 2.50");
    assert_eq!(view.background, Some("#f08080"));
}

#[test]
fn cached_value_is_annotated() {
    let view = present(MetricKind::Nupl, &MetricOutcome::Cached(result(0.25)), &FixedTime);
    assert_eq!(view.text, "NUPL: 0.25 (Last updated: Jan 2, 2026)");
    assert_eq!(view.background, Some("#fff3cd"));
}

#[test]
fn stale_value_announces_the_outage() {
    let view = present(MetricKind::SharpeRatio, &MetricOutcome::Stale(result(1.5)), &FixedTime);
    assert_eq!(view.text, "Sharpe Ratio: 1.50 (Data unavailable, Last updated: Jan 2, 2026)");
    assert_eq!(view.background, Some("#f08080"));
}

#[test]
fn unavailable_renders_without_a_number() {
    let view = present(MetricKind::Nupl, &MetricOutcome::Unavailable, &FixedTime);
    assert_eq!(view.text, "NUPL: Data unavailable");
    assert_eq!(view.background, Some(UNAVAILABLE_BACKGROUND));
}
