use super::RunId;
use tracing::{Level, Span};

/// Create a root span for one full analysis run or monitor session
pub fn run_span(name: &'static str, run_id: &RunId) -> Span {
    tracing::span!(
        Level::INFO,
        "run",
        name = %name,
        run_id = %run_id.as_str()
    )
}
