//! Pure presentation: value -> severity tier via per-metric threshold
//! tables, tier -> color via a fixed lookup, and outcome -> panel text.

use crate::domain::logging::TimeProvider;
use crate::domain::metrics::{MetricKind, MetricOutcome};

/// Background of a panel with no value and nothing cached.
pub const UNAVAILABLE_BACKGROUND: &str = "#f9f9f9";

/// Five ordered severity tiers shared by all thresholded metrics. Low tiers
/// read as "undervalued / oversold", high tiers as "overheated".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    VeryLow,
    Low,
    Neutral,
    High,
    VeryHigh,
}

impl Severity {
    /// Fixed tier-to-color lookup, separate from the threshold tables.
    pub fn color(self) -> &'static str {
        match self {
            Severity::VeryLow => "#28a745",
            Severity::Low => "#90ee90",
            Severity::Neutral => "#fff3cd",
            Severity::High => "#f08080",
            Severity::VeryHigh => "#dc143c",
        }
    }
}

/// Four ascending inclusive upper bounds splitting the value axis into the
/// five tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable {
    bounds: [f64; 4],
}

impl ThresholdTable {
    pub const fn new(bounds: [f64; 4]) -> Self {
        Self { bounds }
    }

    pub fn classify(&self, value: f64) -> Severity {
        if value <= self.bounds[0] {
            Severity::VeryLow
        } else if value <= self.bounds[1] {
            Severity::Low
        } else if value <= self.bounds[2] {
            Severity::Neutral
        } else if value <= self.bounds[3] {
            Severity::High
        } else {
            Severity::VeryHigh
        }
    }
}

/// Threshold table for a metric, or `None` for the price-like panels that
/// carry no severity coloring.
pub fn thresholds(kind: MetricKind) -> Option<ThresholdTable> {
    match kind {
        MetricKind::WeeklyRsi => Some(ThresholdTable::new([30.0, 40.0, 60.0, 70.0])),
        MetricKind::SharpeRatio => Some(ThresholdTable::new([-1.0, 0.0, 1.0, 2.0])),
        MetricKind::MayerMultiple => Some(ThresholdTable::new([0.8, 1.3, 2.4, 3.0])),
        MetricKind::MvrvRatio => Some(ThresholdTable::new([0.8, 1.2, 2.0, 3.0])),
        MetricKind::PuellMultiple => Some(ThresholdTable::new([0.3, 0.5, 1.5, 3.0])),
        MetricKind::Nupl => Some(ThresholdTable::new([-0.4, -0.2, 0.5, 0.75])),
        MetricKind::SpotPrice
        | MetricKind::RealizedPrice
        | MetricKind::AllTimeHigh
        | MetricKind::MarketCapVolumeRatio => None,
    }
}

/// The spot-price panel is colored by 24h change direction, not by tier.
pub fn change_background(change_24h_pct: f64) -> &'static str {
    if change_24h_pct > 0.1 {
        "#28a745"
    } else if change_24h_pct < -0.1 {
        "#dc143c"
    } else {
        "#cccccc"
    }
}

/// What a panel finally shows: text plus an optional background color.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub text: String,
    pub background: Option<&'static str>,
}

/// Named output slots of the page. A missing slot must be a no-op.
pub trait MetricSurface {
    fn render(&self, slot_id: &str, view: &PanelView);
}

fn format_value(kind: MetricKind, value: f64) -> String {
    if kind.is_dollar_denominated() {
        format!("${:.2}", value)
    } else {
        format!("{}: {:.2}", kind.label(), value)
    }
}

fn tier_background(kind: MetricKind, value: f64) -> Option<&'static str> {
    thresholds(kind).map(|table| table.classify(value).color())
}

/// Render one outcome. Fresh values come out plain, valid cache hits carry a
/// "Last updated" note, stale values additionally announce the data outage,
/// and `Unavailable` renders without a number.
pub fn present(kind: MetricKind, outcome: &MetricOutcome, time: &dyn TimeProvider) -> PanelView {
    match outcome {
        MetricOutcome::Fresh(result) => PanelView {
            text: format_value(kind, result.value),
            background: tier_background(kind, result.value),
        },
        MetricOutcome::Cached(result) => PanelView {
            text: format!(
                "{} (Last updated: {})",
                format_value(kind, result.value),
                time.format_timestamp(result.computed_at_millis)
            ),
            background: tier_background(kind, result.value),
        },
        MetricOutcome::Stale(result) => PanelView {
            text: format!(
                "{} (Data unavailable, Last updated: {})",
                format_value(kind, result.value),
                time.format_timestamp(result.computed_at_millis)
            ),
            background: tier_background(kind, result.value),
        },
        MetricOutcome::Unavailable => PanelView {
            text: format!("{}: Data unavailable", kind.label()),
            background: Some(UNAVAILABLE_BACKGROUND),
        },
    }
}
