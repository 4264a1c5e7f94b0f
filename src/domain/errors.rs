/// Everything that can go wrong on the way from an HTTP endpoint to a
/// rendered metric value. All variants are absorbed at the per-panel
/// boundary; none of them reaches the page as a raw exception.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricError {
    /// Non-OK HTTP status (other than throttling), transport failure or timeout.
    NetworkFailure(String),
    /// HTTP 429 - triggers the one-shot retry in the orchestrator.
    RateLimited,
    /// Response parsed but an expected field is missing or unparsable.
    MalformedResponse(String),
    /// Series shorter than the statistic's minimum window.
    InsufficientData { required: usize, actual: usize },
    /// Zero divisor guarded explicitly instead of propagating NaN/Infinity.
    DivisionByZero(&'static str),
}

impl std::fmt::Display for MetricError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricError::NetworkFailure(msg) => write!(f, "Network Failure: {}", msg),
            MetricError::RateLimited => write!(f, "Rate Limited: HTTP 429"),
            MetricError::MalformedResponse(msg) => write!(f, "Malformed Response: {}", msg),
            MetricError::InsufficientData { required, actual } => {
                write!(f, "Insufficient Data: need {} points, have {}", required, actual)
            }
            MetricError::DivisionByZero(what) => write!(f, "Division By Zero: {}", what),
        }
    }
}

impl std::error::Error for MetricError {}

/// Convenience alias for fetch/compute signatures.
pub type FetchResult<T> = Result<T, MetricError>;
