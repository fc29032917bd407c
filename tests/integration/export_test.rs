#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use vitals::application::export::{export_summary, export_timeseries, timeseries_csv};
use vitals::application::services::session::MonitoringSession;
use vitals::domain::ports::clock::Clock;
use vitals::domain::value_objects::metric::MetricKind;
use vitals::domain::value_objects::thresholds::ThresholdPolicy;
use vitals::infrastructure::clock::ManualClock;
use vitals::infrastructure::export::file_sink::FileExportSink;
use vitals::infrastructure::samplers::scripted_sampler::ScriptedSampler;

fn run_session(ticks: usize) -> vitals::application::services::session::SessionSnapshot {
    let clock = Arc::new(ManualClock::new());
    let mut session = MonitoringSession::new(
        ThresholdPolicy::default(),
        vec![MetricKind::CpuTemp, MetricKind::RamUsage],
        Arc::clone(&clock) as Arc<dyn Clock>,
    );
    let sampler = ScriptedSampler::new();
    sampler.constant(MetricKind::CpuTemp, 86.0);
    sampler.constant(MetricKind::RamUsage, 40.0);

    session.start(30, Duration::from_secs(2)).expect("start");
    for _ in 0..ticks {
        clock.advance_secs(2);
        session.tick(&sampler).expect("tick");
    }
    session.stop().expect("stop");
    session.snapshot()
}

#[test]
fn csv_row_count_matches_recorded_samples() {
    let snapshot = run_session(4);
    let csv = timeseries_csv(&snapshot);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 1 + snapshot.samples.len());
    assert_eq!(lines[0], "timestamp,metric,value,unit");
}

#[test]
fn csv_rows_follow_sample_order() {
    let snapshot = run_session(2);
    let csv = timeseries_csv(&snapshot);
    let metrics: Vec<String> = csv
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(1).expect("metric column").to_string())
        .collect();
    let expected: Vec<String> = snapshot
        .samples
        .iter()
        .map(|s| s.metric.to_string())
        .collect();
    assert_eq!(metrics, expected);
}

#[test]
fn files_land_in_target_directory_and_round_trip() {
    let snapshot = run_session(3);
    let dir = tempfile::tempdir().expect("tempdir");
    let sink = FileExportSink::new(dir.path().to_string_lossy());

    let csv_path = export_timeseries(&snapshot, &sink).expect("csv export");
    let report_path = export_summary(&snapshot, &sink).expect("report export");

    assert!(csv_path.starts_with(dir.path()));
    assert!(report_path.starts_with(dir.path()));

    let csv = std::fs::read_to_string(&csv_path).expect("read csv");
    assert_eq!(csv, timeseries_csv(&snapshot));

    let report = std::fs::read_to_string(&report_path).expect("read report");
    assert!(report.contains("=== RECOMMANDATIONS ==="));
    assert!(report.contains("=== ALERTES ==="));
    assert!(report.contains("=== STATISTIQUES ==="));
    assert!(report.contains("Température CPU critique : 86.0°C"));
}

#[test]
fn summary_statistics_reflect_session_extremes() {
    let clock = Arc::new(ManualClock::new());
    let mut session = MonitoringSession::new(
        ThresholdPolicy::default(),
        vec![MetricKind::RamUsage],
        Arc::clone(&clock) as Arc<dyn Clock>,
    );
    let sampler = ScriptedSampler::new();
    sampler.script(MetricKind::RamUsage, vec![Ok(30.0), Ok(50.0), Ok(70.0)]);

    session.start(30, Duration::from_secs(2)).expect("start");
    for _ in 0..3 {
        clock.advance_secs(2);
        session.tick(&sampler).expect("tick");
    }
    session.stop().expect("stop");

    let summary = vitals::application::export::summary_text(&session.snapshot());
    assert!(summary.contains("min 30.0%"));
    assert!(summary.contains("moy 50.0%"));
    assert!(summary.contains("max 70.0%"));
}
