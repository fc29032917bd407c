#![allow(clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use vitals::application::services::session::MonitoringSession;
use vitals::domain::ports::clock::Clock;
use vitals::domain::value_objects::metric::MetricKind;
use vitals::domain::value_objects::session_state::SessionState;
use vitals::domain::value_objects::severity::Severity;
use vitals::domain::value_objects::thresholds::ThresholdPolicy;
use vitals::infrastructure::clock::ManualClock;
use vitals::infrastructure::samplers::scripted_sampler::ScriptedSampler;

fn session(
    tracked: Vec<MetricKind>,
    clock: &Arc<ManualClock>,
) -> MonitoringSession {
    MonitoringSession::new(
        ThresholdPolicy::default(),
        tracked,
        Arc::clone(clock) as Arc<dyn Clock>,
    )
}

#[test]
fn full_session_records_samples_alerts_and_recommendations() {
    let clock = Arc::new(ManualClock::new());
    let mut session = session(
        vec![MetricKind::CpuTemp, MetricKind::RamUsage, MetricKind::DiskUsage],
        &clock,
    );

    let sampler = ScriptedSampler::new();
    // CPU heats up over the minute, crossing warning then critical.
    sampler.script(
        MetricKind::CpuTemp,
        vec![Ok(60.0), Ok(70.0), Ok(76.0), Ok(80.0), Ok(86.0), Ok(88.0)],
    );
    sampler.constant(MetricKind::RamUsage, 45.0);
    sampler.constant(MetricKind::DiskUsage, 50.0);

    session.start(1, Duration::from_secs(10)).expect("start");
    let mut completed_at_tick = None;
    for tick in 1..=6 {
        clock.advance_secs(10);
        let report = session.tick(&sampler).expect("tick");
        if report.completed {
            completed_at_tick = Some(tick);
        }
    }

    assert_eq!(completed_at_tick, Some(6));
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, SessionState::Completed);
    assert_eq!(snapshot.samples.len(), 18);

    // Two warning-range readings and two critical-range readings.
    let highs = snapshot
        .alerts
        .iter()
        .filter(|a| a.severity == Severity::High)
        .count();
    let criticals = snapshot
        .alerts
        .iter()
        .filter(|a| a.severity == Severity::Critical)
        .count();
    assert_eq!(highs, 2);
    assert_eq!(criticals, 2);
    assert_eq!(snapshot.peak_severity(), Severity::Critical);

    // Thermal advice for both severities, deduplicated, plus the
    // unconditional maintenance entry.
    let thermal = snapshot
        .recommendations
        .iter()
        .filter(|r| r.category == "thermal")
        .count();
    assert_eq!(thermal, 2);
    assert!(snapshot
        .recommendations
        .iter()
        .any(|r| r.category == "maintenance"));

    // Highest priority first.
    assert_eq!(snapshot.recommendations[0].priority, Severity::Critical);
}

#[test]
fn flaky_sensor_produces_single_unavailable_alert() {
    let clock = Arc::new(ManualClock::new());
    let mut session = session(vec![MetricKind::GpuTemp, MetricKind::RamUsage], &clock);

    let sampler = ScriptedSampler::new();
    sampler.constant(MetricKind::RamUsage, 40.0);
    // GPU sensor never answers: 5 misses in a row.

    session.start(5, Duration::from_secs(10)).expect("start");
    for _ in 0..5 {
        clock.advance_secs(10);
        let report = session.tick(&sampler).expect("tick");
        assert_eq!(report.missing, 1);
        assert_eq!(report.samples_recorded, 1);
    }

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, SessionState::Running);
    let unavailable: Vec<_> = snapshot
        .alerts
        .iter()
        .filter(|a| a.metric == MetricKind::GpuTemp)
        .collect();
    assert_eq!(unavailable.len(), 1);
    assert_eq!(unavailable[0].severity, Severity::Low);
    // RAM samples kept flowing the whole time.
    assert_eq!(snapshot.samples.len(), 5);
}

#[test]
fn start_while_running_leaves_session_untouched() {
    let clock = Arc::new(ManualClock::new());
    let mut session = session(vec![MetricKind::RamUsage], &clock);
    let sampler = ScriptedSampler::new();
    sampler.constant(MetricKind::RamUsage, 40.0);

    session.start(5, Duration::from_secs(2)).expect("start");
    clock.advance_secs(2);
    session.tick(&sampler).expect("tick");

    let before = session.snapshot();
    assert!(session.start(10, Duration::from_secs(2)).is_err());
    let after = session.snapshot();

    assert_eq!(after.state, SessionState::Running);
    assert_eq!(after.samples.len(), before.samples.len());
    assert_eq!(after.duration_minutes, before.duration_minutes);
}

#[test]
fn stopped_session_keeps_data_but_refuses_ticks() {
    let clock = Arc::new(ManualClock::new());
    let mut session = session(vec![MetricKind::RamUsage], &clock);
    let sampler = ScriptedSampler::new();
    sampler.constant(MetricKind::RamUsage, 95.0);

    session.start(5, Duration::from_secs(2)).expect("start");
    clock.advance_secs(2);
    session.tick(&sampler).expect("tick");
    session.stop().expect("stop");

    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, SessionState::Stopped);
    assert_eq!(snapshot.samples.len(), 1);
    assert_eq!(snapshot.alerts.len(), 1);

    assert!(session.tick(&sampler).is_err());
    assert!(session.start(5, Duration::from_secs(2)).is_err());
}

#[test]
fn disk_growth_over_session_yields_trend_recommendation() {
    let clock = Arc::new(ManualClock::new());
    let mut session = session(vec![MetricKind::DiskUsage], &clock);
    let sampler = ScriptedSampler::new();
    sampler.script(
        MetricKind::DiskUsage,
        vec![Ok(70.0), Ok(70.4), Ok(70.9), Ok(71.3), Ok(71.8)],
    );

    session.start(5, Duration::from_secs(10)).expect("start");
    for _ in 0..5 {
        clock.advance_secs(10);
        session.tick(&sampler).expect("tick");
    }

    let snapshot = session.snapshot();
    assert!(snapshot.alerts.is_empty());
    assert!(snapshot
        .recommendations
        .iter()
        .any(|r| r.category == "storage" && r.priority == Severity::Low));
}
