use thiserror::Error;

use crate::domain::entities::sample::Sample;
use crate::domain::value_objects::metric::MetricKind;

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("sensor unavailable for {0}: {1}")]
    Unavailable(MetricKind, String),
    #[error("metric {0} not supported by this sampler")]
    Unsupported(MetricKind),
}

/// Source of hardware readings. One structured reading per metric per
/// call; the engine never talks to OS sensor APIs directly.
pub trait HardwareSampler: Send + Sync {
    /// Read the current value for one metric.
    ///
    /// # Errors
    ///
    /// Returns `SampleError` if the sensor is unavailable or the
    /// metric is not supported on this host.
    fn sample(&self, metric: MetricKind) -> Result<Sample, SampleError>;

    /// Metrics this sampler can actually provide on the current host.
    fn supported(&self) -> Vec<MetricKind>;
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn sample_error_display() {
        let err = SampleError::Unavailable(MetricKind::CpuTemp, "no coretemp".to_string());
        assert_eq!(err.to_string(), "sensor unavailable for CPU_TEMP: no coretemp");

        let err = SampleError::Unsupported(MetricKind::GpuTemp);
        assert_eq!(err.to_string(), "metric GPU_TEMP not supported by this sampler");
    }
}
