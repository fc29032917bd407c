use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::application::services::session::SessionSnapshot;
use crate::domain::ports::export::{ExportError, ExportSink};
use crate::domain::value_objects::metric::MetricKind;

/// Per-metric aggregates over a session's samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricStats {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
    pub count: usize,
}

/// Computes min/avg/max per metric, keyed in metric order. Metrics
/// without a single sample are absent from the map.
#[must_use]
pub fn metric_stats(snapshot: &SessionSnapshot) -> BTreeMap<MetricKind, MetricStats> {
    let mut acc: BTreeMap<MetricKind, (f64, f64, f64, usize)> = BTreeMap::new();
    for sample in &snapshot.samples {
        let entry = acc
            .entry(sample.metric)
            .or_insert((f64::INFINITY, 0.0, f64::NEG_INFINITY, 0));
        entry.0 = entry.0.min(sample.value);
        entry.1 += sample.value;
        entry.2 = entry.2.max(sample.value);
        entry.3 += 1;
    }
    acc.into_iter()
        .map(|(metric, (min, sum, max, count))| {
            #[allow(clippy::cast_precision_loss)]
            let avg = sum / count as f64;
            (metric, MetricStats { min, avg, max, count })
        })
        .collect()
}

/// Renders the sample history as CSV, one row per sample, in recording
/// order.
#[must_use]
pub fn timeseries_csv(snapshot: &SessionSnapshot) -> String {
    let mut out = String::from("timestamp,metric,value,unit\n");
    for sample in &snapshot.samples {
        let _ = writeln!(
            out,
            "{},{},{:.2},{}",
            sample.timestamp.to_rfc3339(),
            sample.metric,
            sample.value,
            sample.unit
        );
    }
    out
}

/// Renders the human-readable session report: recommendations first,
/// then the alert log, then per-metric statistics.
#[must_use]
pub fn summary_text(snapshot: &SessionSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Rapport de session n°{}", snapshot.id);
    let _ = writeln!(out, "État : {}", snapshot.state);
    if let Some(start) = snapshot.started_at {
        let _ = writeln!(out, "Début : {}", start.to_rfc3339());
    }
    let _ = writeln!(
        out,
        "Durée configurée : {} min (tick {}s)",
        snapshot.duration_minutes, snapshot.tick_interval_secs
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "=== RECOMMANDATIONS ===");
    if snapshot.recommendations.is_empty() {
        let _ = writeln!(out, "Aucune recommandation.");
    }
    for rec in &snapshot.recommendations {
        let _ = writeln!(out, "[{}] ({}) {}", rec.priority, rec.category, rec.text);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "=== ALERTES ===");
    if snapshot.alerts.is_empty() {
        let _ = writeln!(out, "Aucune alerte.");
    }
    for alert in &snapshot.alerts {
        let _ = writeln!(
            out,
            "{} [{}] {}",
            alert.timestamp.to_rfc3339(),
            alert.severity,
            alert.message
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "=== STATISTIQUES ===");
    let stats = metric_stats(snapshot);
    if stats.is_empty() {
        let _ = writeln!(out, "Aucun échantillon.");
    }
    for (metric, s) in &stats {
        let _ = writeln!(
            out,
            "{} : min {:.1}{u}, moy {:.1}{u}, max {:.1}{u} ({} échantillons)",
            metric.label(),
            s.min,
            s.avg,
            s.max,
            s.count,
            u = metric.unit()
        );
    }
    out
}

/// Writes the CSV time series through the sink.
///
/// # Errors
///
/// Propagates [`ExportSink::write_timeseries`] errors.
pub fn export_timeseries(
    snapshot: &SessionSnapshot,
    sink: &dyn ExportSink,
) -> Result<PathBuf, ExportError> {
    sink.write_timeseries(&timeseries_csv(snapshot))
}

/// Writes the session report through the sink.
///
/// # Errors
///
/// Propagates [`ExportSink::write_summary`] errors.
pub fn export_summary(
    snapshot: &SessionSnapshot,
    sink: &dyn ExportSink,
) -> Result<PathBuf, ExportError> {
    sink.write_summary(&summary_text(snapshot))
}
