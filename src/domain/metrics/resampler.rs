use crate::domain::metrics::{PriceSeries, WeeklySeries};

/// Target spacing for weekly resampling.
pub const WEEK_MILLIS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Fixed-stride policy: every `stride`-th point of a daily-granularity
/// series. A series of N points yields exactly `ceil(N / stride)` samples.
pub fn resample_fixed_stride(daily_closes: &[f64], stride: usize) -> WeeklySeries {
    if stride == 0 {
        return WeeklySeries::default();
    }
    daily_closes.iter().step_by(stride).copied().collect::<Vec<_>>().into()
}

/// Timestamp-driven policy: emit the first point, then any point whose
/// elapsed time since the last *emitted* point is at least `spacing_millis`.
/// The anchor advances to each emitted point, so gaps and irregular samples
/// never accumulate drift.
pub fn resample_weekly(series: &PriceSeries, spacing_millis: u64) -> WeeklySeries {
    let mut out = Vec::with_capacity(series.len() / 7 + 1);
    let mut anchor: Option<u64> = None;
    for point in series.points() {
        let due = match anchor {
            None => true,
            Some(last) => point.timestamp_millis.saturating_sub(last) >= spacing_millis,
        };
        if due {
            out.push(point.price_usd);
            anchor = Some(point.timestamp_millis);
        }
    }
    out.into()
}
