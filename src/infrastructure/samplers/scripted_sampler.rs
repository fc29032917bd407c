use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;

use crate::domain::entities::sample::Sample;
use crate::domain::ports::sampler::{HardwareSampler, SampleError};
use crate::domain::value_objects::metric::MetricKind;

/// Deterministic sampler for testing purposes.
///
/// Readings come from per-metric scripts consumed in order; once a
/// script is exhausted the sampler falls back to the metric's constant
/// value when one is set, and reports the sensor unavailable otherwise.
#[derive(Default)]
pub struct ScriptedSampler {
    scripts: Mutex<HashMap<MetricKind, VecDeque<Result<f64, ()>>>>,
    constants: Mutex<HashMap<MetricKind, f64>>,
}

impl ScriptedSampler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every read of `metric` returns `value` (unless a script entry
    /// is pending).
    pub fn constant(&self, metric: MetricKind, value: f64) {
        self.constants
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(metric, value);
    }

    /// Queues an ordered sequence of readings for `metric`. `Err(())`
    /// entries simulate a failed read.
    pub fn script(&self, metric: MetricKind, readings: Vec<Result<f64, ()>>) {
        self.scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(metric)
            .or_default()
            .extend(readings);
    }
}

impl HardwareSampler for ScriptedSampler {
    fn sample(&self, metric: MetricKind) -> Result<Sample, SampleError> {
        let scripted = self
            .scripts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&metric)
            .and_then(VecDeque::pop_front);

        let value = match scripted {
            Some(Ok(value)) => value,
            Some(Err(())) => {
                return Err(SampleError::Unavailable(
                    metric,
                    "scripted failure".into(),
                ))
            }
            None => self
                .constants
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get(&metric)
                .copied()
                .ok_or_else(|| {
                    SampleError::Unavailable(metric, "no scripted reading".into())
                })?,
        };
        Ok(Sample::new(metric, value, Utc::now()))
    }

    fn supported(&self) -> Vec<MetricKind> {
        let scripts = self.scripts.lock().unwrap_or_else(PoisonError::into_inner);
        let constants = self
            .constants
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        MetricKind::ALL
            .into_iter()
            .filter(|m| constants.contains_key(m) || scripts.contains_key(m))
            .collect()
    }
}
