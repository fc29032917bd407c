use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::metric::MetricKind;
use crate::domain::value_objects::severity::Severity;

/// A classified threshold crossing (or sensor outage) for one metric.
/// Never mutated after creation; owned by the session that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub metric: MetricKind,
    pub severity: Severity,
    pub value: f64,
    pub threshold_crossed: f64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}
