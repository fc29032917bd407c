use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::metric::MetricKind;

/// One timestamped metric reading. Immutable once created; produced by
/// the hardware sampler, one per tracked metric per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub metric: MetricKind,
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

impl Sample {
    /// Builds a sample with the metric's canonical unit.
    #[must_use]
    pub fn new(metric: MetricKind, value: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            metric,
            value,
            unit: metric.unit().to_string(),
            timestamp,
        }
    }
}
