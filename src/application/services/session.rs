use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::domain::classifier::{classify, sensor_unavailable, SENSOR_MISS_LIMIT};
use crate::domain::entities::alert::Alert;
use crate::domain::entities::recommendation::Recommendation;
use crate::domain::entities::sample::Sample;
use crate::domain::ports::clock::Clock;
use crate::domain::ports::sampler::HardwareSampler;
use crate::domain::recommender::aggregate;
use crate::domain::value_objects::metric::MetricKind;
use crate::domain::value_objects::session_state::SessionState;
use crate::domain::value_objects::severity::Severity;
use crate::domain::value_objects::thresholds::ThresholdPolicy;

/// Default sampling cadence when the caller does not specify one.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(2);

/// Allowed session length, in minutes.
pub const MIN_DURATION_MINUTES: u64 = 1;
pub const MAX_DURATION_MINUTES: u64 = 30;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid duration: {minutes} min (allowed {MIN_DURATION_MINUTES}..={MAX_DURATION_MINUTES})")]
    InvalidDuration { minutes: u64 },
    #[error("a session is already running")]
    AlreadyRunning,
    #[error("session is not running")]
    NotRunning,
    #[error("session already finished; data is read-only")]
    Finished,
}

/// Result of a single tick; feeds the per-cycle log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub samples_recorded: usize,
    pub alerts_raised: usize,
    pub missing: usize,
    pub completed: bool,
}

/// Consistent point-in-time copy of a session, safe to hand to
/// renderers and exporters while the session keeps running.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: i64,
    pub state: SessionState,
    pub started_at: Option<DateTime<Utc>>,
    pub duration_minutes: u64,
    pub tick_interval_secs: u64,
    pub samples: Vec<Sample>,
    pub alerts: Vec<Alert>,
    pub recommendations: Vec<Recommendation>,
}

impl SessionSnapshot {
    /// Worst alert severity observed, `Severity::None` when clean.
    #[must_use]
    pub fn peak_severity(&self) -> Severity {
        self.alerts
            .iter()
            .map(|a| a.severity)
            .max()
            .unwrap_or(Severity::None)
    }
}

/// Bounded-duration monitoring session: `Idle → Running → {Completed,
/// Stopped}`. The session is passive — an external driver invokes
/// [`MonitoringSession::tick`] at the configured interval; tests call
/// it directly in sequence with a manual clock.
pub struct MonitoringSession {
    id: i64,
    policy: ThresholdPolicy,
    tracked: Vec<MetricKind>,
    clock: Arc<dyn Clock>,
    state: SessionState,
    started_at: Option<DateTime<Utc>>,
    duration_limit: TimeDelta,
    tick_interval: Duration,
    samples: Vec<Sample>,
    alerts: Vec<Alert>,
    recommendations: Vec<Recommendation>,
    miss_streaks: HashMap<MetricKind, u32>,
}

impl MonitoringSession {
    #[must_use]
    pub fn new(policy: ThresholdPolicy, tracked: Vec<MetricKind>, clock: Arc<dyn Clock>) -> Self {
        let id = clock.now().timestamp_millis();
        Self {
            id,
            policy,
            tracked,
            clock,
            state: SessionState::Idle,
            started_at: None,
            duration_limit: TimeDelta::zero(),
            tick_interval: DEFAULT_TICK_INTERVAL,
            samples: Vec::new(),
            alerts: Vec::new(),
            recommendations: Vec::new(),
            miss_streaks: HashMap::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Transitions `Idle → Running`, records the start time and resets
    /// the accumulators.
    ///
    /// # Errors
    ///
    /// `InvalidDuration` when `duration_minutes` is outside 1..=30,
    /// `AlreadyRunning` when the session is running, `Finished` when it
    /// has already reached a terminal state.
    pub fn start(
        &mut self,
        duration_minutes: u64,
        tick_interval: Duration,
    ) -> Result<(), SessionError> {
        if self.state == SessionState::Running {
            return Err(SessionError::AlreadyRunning);
        }
        if self.state.is_terminal() {
            return Err(SessionError::Finished);
        }
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
            return Err(SessionError::InvalidDuration {
                minutes: duration_minutes,
            });
        }

        let now = self.clock.now();
        self.started_at = Some(now);
        // Range-checked above, always fits.
        self.duration_limit =
            TimeDelta::try_minutes(i64::try_from(duration_minutes).unwrap_or(1))
                .unwrap_or_else(|| TimeDelta::minutes(1));
        self.tick_interval = tick_interval;
        self.samples.clear();
        self.alerts.clear();
        self.recommendations.clear();
        self.miss_streaks.clear();
        self.state = SessionState::Running;

        tracing::info!(
            "Session {} démarrée : {} min, tick {}s, {} métrique(s)",
            self.id,
            duration_minutes,
            tick_interval.as_secs(),
            self.tracked.len()
        );
        Ok(())
    }

    /// One sampling-and-classification cycle. Pulls one reading per
    /// tracked metric, classifies it, recomputes recommendations, and
    /// auto-completes once the wall-clock duration limit is reached.
    ///
    /// A failed read is recorded as a missing sample; the session
    /// continues. Three consecutive misses on the same metric escalate
    /// once to a LOW sensor-unavailable alert.
    ///
    /// # Errors
    ///
    /// `NotRunning` unless the session is in the running state.
    pub fn tick(&mut self, sampler: &dyn HardwareSampler) -> Result<TickReport, SessionError> {
        if self.state != SessionState::Running {
            return Err(SessionError::NotRunning);
        }
        let now = self.clock.now();
        let mut samples_recorded = 0usize;
        let mut alerts_raised = 0usize;
        let mut missing = 0usize;

        for metric in self.tracked.clone() {
            match sampler.sample(metric) {
                Ok(sample) => {
                    self.miss_streaks.insert(metric, 0);
                    if let Some(alert) = classify(&sample, &self.policy) {
                        tracing::warn!("[{}] {}", alert.severity, alert.message);
                        self.alerts.push(alert);
                        alerts_raised += 1;
                    }
                    self.samples.push(sample);
                    samples_recorded += 1;
                }
                Err(e) => {
                    tracing::warn!("Lecture manquée pour {metric} : {e}");
                    missing += 1;
                    let streak = self.miss_streaks.entry(metric).or_insert(0);
                    *streak += 1;
                    if *streak == SENSOR_MISS_LIMIT {
                        let alert = sensor_unavailable(metric, now);
                        tracing::warn!("[{}] {}", alert.severity, alert.message);
                        self.alerts.push(alert);
                        alerts_raised += 1;
                    }
                }
            }
        }

        self.recommendations = aggregate(&self.alerts, &self.samples);

        tracing::debug!(
            "Tick : {samples_recorded} échantillon(s), {alerts_raised} alerte(s), {missing} manquant(s)"
        );

        let completed = self
            .started_at
            .is_some_and(|start| now.signed_duration_since(start) >= self.duration_limit);
        if completed {
            self.state = SessionState::Completed;
            tracing::info!(
                "Session {} terminée : {} échantillon(s), {} alerte(s)",
                self.id,
                self.samples.len(),
                self.alerts.len()
            );
        }

        Ok(TickReport {
            samples_recorded,
            alerts_raised,
            missing,
            completed,
        })
    }

    /// Transitions `Running → Stopped`. Accumulated data is retained
    /// for export.
    ///
    /// # Errors
    ///
    /// `NotRunning` unless the session is in the running state.
    pub fn stop(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Running {
            return Err(SessionError::NotRunning);
        }
        self.state = SessionState::Stopped;
        tracing::info!(
            "Session {} arrêtée : {} échantillon(s), {} alerte(s)",
            self.id,
            self.samples.len(),
            self.alerts.len()
        );
        Ok(())
    }

    /// Read-only copy of the current state. Callable in any state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            state: self.state,
            started_at: self.started_at,
            duration_minutes: u64::try_from(self.duration_limit.num_minutes()).unwrap_or(0),
            tick_interval_secs: self.tick_interval.as_secs(),
            samples: self.samples.clone(),
            alerts: self.alerts.clone(),
            recommendations: self.recommendations.clone(),
        }
    }
}
