use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::metric::MetricKind;

/// Warning/critical bounds for one metric. Invariant: `warning < critical`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub metric: MetricKind,
    pub warning: f64,
    pub critical: f64,
}

/// Per-metric threshold lookup. Metrics without a rule are monitored
/// but never produce threshold alerts.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdPolicy {
    rules: BTreeMap<MetricKind, ThresholdRule>,
}

impl Default for ThresholdPolicy {
    fn default() -> Self {
        let defaults = [
            (MetricKind::CpuTemp, 75.0, 85.0),
            (MetricKind::GpuTemp, 80.0, 90.0),
            (MetricKind::RamUsage, 80.0, 90.0),
            (MetricKind::DiskUsage, 85.0, 95.0),
        ];
        let rules = defaults
            .into_iter()
            .map(|(metric, warning, critical)| {
                (
                    metric,
                    ThresholdRule {
                        metric,
                        warning,
                        critical,
                    },
                )
            })
            .collect();
        Self { rules }
    }
}

impl ThresholdPolicy {
    /// Replaces or adds the rule for `metric`, repairing an inverted
    /// pair: warning is floored at 0 and critical is kept at least one
    /// unit above warning.
    pub fn set(&mut self, metric: MetricKind, warning: f64, critical: f64) {
        let warning = warning.max(0.0);
        let critical = if critical > warning {
            critical
        } else {
            warning + 1.0
        };
        self.rules.insert(
            metric,
            ThresholdRule {
                metric,
                warning,
                critical,
            },
        );
    }

    #[must_use]
    pub fn rule(&self, metric: MetricKind) -> Option<&ThresholdRule> {
        self.rules.get(&metric)
    }
}
