use market_health_wasm::domain::metrics::{
    PricePoint, PriceSeries, WEEK_MILLIS, resample_fixed_stride, resample_weekly,
};
use quickcheck_macros::quickcheck;

const DAY_MILLIS: u64 = 24 * 60 * 60 * 1000;

fn daily_series(n: usize) -> PriceSeries {
    let points =
        (0..n).map(|i| PricePoint::new(i as u64 * DAY_MILLIS, 100.0 + i as f64)).collect();
    PriceSeries::from_points(points)
}

#[quickcheck]
fn fixed_stride_seven_yields_ceil_div(n: u8) -> bool {
    let closes: Vec<f64> = (0..n).map(f64::from).collect();
    resample_fixed_stride(&closes, 7).len() == closes.len().div_ceil(7)
}

#[quickcheck]
fn weekly_resampling_keeps_points_a_week_apart(hour_offsets: Vec<u16>) -> bool {
    // Price mirrors the timestamp, so emitted spacing is visible in the output.
    let points = hour_offsets
        .iter()
        .map(|h| {
            let ts = u64::from(*h) * 60 * 60 * 1000;
            PricePoint::new(ts, ts as f64)
        })
        .collect();
    let weekly = resample_weekly(&PriceSeries::from_points(points), WEEK_MILLIS);
    weekly.as_slice().windows(2).all(|pair| pair[1] - pair[0] >= WEEK_MILLIS as f64)
}

#[test]
fn fixed_stride_zero_is_empty() {
    assert!(resample_fixed_stride(&[1.0, 2.0, 3.0], 0).is_empty());
}

#[test]
fn fixed_stride_picks_every_seventh() {
    let closes: Vec<f64> = (0..15).map(f64::from).collect();
    assert_eq!(resample_fixed_stride(&closes, 7).as_slice(), &[0.0, 7.0, 14.0]);
}

#[test]
fn weekly_resampling_of_daily_year_keeps_enough_points() {
    let weekly = resample_weekly(&daily_series(365), WEEK_MILLIS);
    assert_eq!(weekly.len(), 53);
}

#[test]
fn weekly_resampling_emits_first_point() {
    let weekly = resample_weekly(&daily_series(365), WEEK_MILLIS);
    assert_eq!(weekly.as_slice()[0], 100.0);
}

#[test]
fn sub_week_series_collapses_to_one_point() {
    let weekly = resample_weekly(&daily_series(6), WEEK_MILLIS);
    assert_eq!(weekly.as_slice(), &[100.0]);
}

#[test]
fn irregular_gaps_do_not_accumulate_drift() {
    // Points at 0, 10 and 13 days: the 10-day point is emitted and becomes
    // the new anchor, so the 13-day point (3 days later) is skipped.
    let points = vec![
        PricePoint::new(0, 1.0),
        PricePoint::new(10 * DAY_MILLIS, 2.0),
        PricePoint::new(13 * DAY_MILLIS, 3.0),
    ];
    let weekly = resample_weekly(&PriceSeries::from_points(points), WEEK_MILLIS);
    assert_eq!(weekly.as_slice(), &[1.0, 2.0]);
}

#[test]
fn duplicate_timestamps_keep_the_later_sample() {
    let points = vec![
        PricePoint::new(0, 1.0),
        PricePoint::new(WEEK_MILLIS, 2.0),
        PricePoint::new(WEEK_MILLIS, 5.0),
    ];
    let series = PriceSeries::from_points(points);
    assert_eq!(series.len(), 2);
    assert_eq!(series.last_price(), Some(5.0));
}
