use chrono::{DateTime, Utc};

use crate::domain::entities::alert::Alert;
use crate::domain::entities::sample::Sample;
use crate::domain::value_objects::metric::MetricKind;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::ThresholdPolicy;

/// Number of consecutive missed readings before a sensor is declared
/// unavailable.
pub const SENSOR_MISS_LIMIT: u32 = 3;

/// Classifies one sample against the threshold policy.
///
/// Returns `None` when the metric has no rule or the value sits below
/// the warning bound. Boundaries are inclusive: a value exactly equal
/// to a threshold counts as having crossed it.
#[must_use]
pub fn classify(sample: &Sample, policy: &ThresholdPolicy) -> Option<Alert> {
    let rule = policy.rule(sample.metric)?;

    let (severity, threshold_crossed) = if sample.value >= rule.critical {
        (Severity::Critical, rule.critical)
    } else if sample.value >= rule.warning {
        (Severity::High, rule.warning)
    } else {
        return None;
    };

    Some(Alert {
        metric: sample.metric,
        severity,
        value: sample.value,
        threshold_crossed,
        message: alert_message(sample.metric, sample.value, severity),
        timestamp: sample.timestamp,
    })
}

/// Alert message text. Deterministic function of
/// `(metric, value, severity)` — same inputs, same text.
#[must_use]
pub fn alert_message(metric: MetricKind, value: f64, severity: Severity) -> String {
    // "Débit" is masculine; every other label is feminine.
    let qualifier = match severity {
        Severity::Critical => "critique",
        _ if metric == MetricKind::NetThroughput => "élevé",
        _ => "élevée",
    };
    format!(
        "{} {} : {:.1}{}",
        metric.label(),
        qualifier,
        value,
        metric.unit()
    )
}

/// Alert raised once a sensor has missed `SENSOR_MISS_LIMIT`
/// consecutive readings. The session keeps running; the outage is
/// recorded, not fatal.
#[must_use]
pub fn sensor_unavailable(metric: MetricKind, timestamp: DateTime<Utc>) -> Alert {
    Alert {
        metric,
        severity: Severity::Low,
        value: 0.0,
        threshold_crossed: 0.0,
        message: format!(
            "Capteur {metric} indisponible ({SENSOR_MISS_LIMIT} lectures manquées consécutives)"
        ),
        timestamp,
    }
}
