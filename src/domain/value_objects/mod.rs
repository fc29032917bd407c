pub mod metric;
pub mod session_state;
pub mod severity;
pub mod thresholds;

pub use metric::MetricKind;
pub use session_state::SessionState;
pub use severity::Severity;
pub use thresholds::{ThresholdPolicy, ThresholdRule};
