use std::sync::Mutex;
use std::time::Instant;

use chrono::Utc;
use sysinfo::{Components, Disks, Networks, System};

use crate::domain::entities::sample::Sample;
use crate::domain::ports::sampler::{HardwareSampler, SampleError};
use crate::domain::value_objects::metric::MetricKind;

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Filesystem types to exclude from disk usage.
const PSEUDO_FILESYSTEMS: &[&str] = &[
    "tmpfs",
    "devtmpfs",
    "sysfs",
    "proc",
    "cgroup2",
    "overlay",
    "squashfs",
    "efivarfs",
];

/// Component labels that identify a CPU temperature sensor.
const CPU_SENSOR_HINTS: &[&str] = &["cpu", "core", "tctl", "tdie", "package", "k10temp", "coretemp"];

/// Returns `(numerator / denominator) * 100.0`, or `0.0` when `denominator` is zero.
#[allow(clippy::cast_precision_loss)]
fn safe_percent(numerator: u64, denominator: u64) -> f64 {
    if denominator > 0 {
        (numerator as f64 / denominator as f64) * 100.0
    } else {
        0.0
    }
}

/// Reads hardware metrics through the `sysinfo` crate.
///
/// Uses `Mutex` for interior mutability since the `HardwareSampler`
/// trait requires `&self` but `sysinfo` handles need `&mut self` to
/// refresh. GPU metrics are not exposed by `sysinfo` and report as
/// unsupported; the session records them as missing samples.
pub struct SysinfoSampler {
    sys: Mutex<System>,
    components: Mutex<Components>,
    disks: Mutex<Disks>,
    networks: Mutex<NetworkState>,
}

struct NetworkState {
    networks: Networks,
    last_refresh: Instant,
}

impl SysinfoSampler {
    /// Creates a sampler with pre-initialized system data.
    #[must_use]
    pub fn new() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        Self {
            sys: Mutex::new(sys),
            components: Mutex::new(Components::new_with_refreshed_list()),
            disks: Mutex::new(Disks::new_with_refreshed_list()),
            networks: Mutex::new(NetworkState {
                networks: Networks::new_with_refreshed_list(),
                last_refresh: Instant::now(),
            }),
        }
    }

    fn cpu_usage(&self) -> Result<f64, SampleError> {
        let mut sys = lock(&self.sys, MetricKind::CpuUsage)?;
        sys.refresh_cpu();
        let cpus = sys.cpus();
        if cpus.is_empty() {
            return Err(SampleError::Unavailable(
                MetricKind::CpuUsage,
                "no cpu reported".into(),
            ));
        }
        #[allow(clippy::cast_precision_loss)]
        let avg = cpus.iter().map(|c| f64::from(c.cpu_usage())).sum::<f64>() / cpus.len() as f64;
        Ok(avg.clamp(0.0, 100.0))
    }

    fn cpu_temp(&self) -> Result<f64, SampleError> {
        let mut components = lock(&self.components, MetricKind::CpuTemp)?;
        components.refresh();
        components
            .iter()
            .filter(|c| {
                let label = c.label().to_lowercase();
                CPU_SENSOR_HINTS.iter().any(|hint| label.contains(hint))
            })
            .map(|c| f64::from(c.temperature()))
            .fold(None, |acc: Option<f64>, t| {
                Some(acc.map_or(t, |a| a.max(t)))
            })
            .ok_or_else(|| {
                SampleError::Unavailable(MetricKind::CpuTemp, "no cpu temperature sensor".into())
            })
    }

    fn ram_usage(&self) -> Result<f64, SampleError> {
        let mut sys = lock(&self.sys, MetricKind::RamUsage)?;
        sys.refresh_memory();
        let total = sys.total_memory();
        if total == 0 {
            return Err(SampleError::Unavailable(
                MetricKind::RamUsage,
                "total memory reported as zero".into(),
            ));
        }
        Ok(safe_percent(sys.used_memory(), total))
    }

    fn disk_usage(&self) -> Result<f64, SampleError> {
        let mut disks = lock(&self.disks, MetricKind::DiskUsage)?;
        disks.refresh();
        let (total, available) = disks
            .iter()
            .filter(|d| {
                let fs = d.file_system().to_string_lossy();
                !PSEUDO_FILESYSTEMS.iter().any(|&pseudo| fs == pseudo) && d.total_space() > 0
            })
            .fold((0u64, 0u64), |(t, a), d| {
                (t + d.total_space(), a + d.available_space())
            });
        if total == 0 {
            return Err(SampleError::Unavailable(
                MetricKind::DiskUsage,
                "no real filesystem found".into(),
            ));
        }
        Ok(safe_percent(total.saturating_sub(available), total).clamp(0.0, 100.0))
    }

    fn net_throughput(&self) -> Result<f64, SampleError> {
        let mut state = lock(&self.networks, MetricKind::NetThroughput)?;
        let elapsed = state.last_refresh.elapsed().as_secs_f64();
        state.networks.refresh();
        state.last_refresh = Instant::now();
        if elapsed <= 0.0 {
            return Ok(0.0);
        }
        // received()/transmitted() report bytes since the previous refresh.
        let bytes: u64 = state
            .networks
            .iter()
            .map(|(_, data)| data.received() + data.transmitted())
            .sum();
        #[allow(clippy::cast_precision_loss)]
        let rate = bytes as f64 / BYTES_PER_MB / elapsed;
        Ok(rate)
    }
}

fn lock<'a, T>(
    mutex: &'a Mutex<T>,
    metric: MetricKind,
) -> Result<std::sync::MutexGuard<'a, T>, SampleError> {
    mutex
        .lock()
        .map_err(|e| SampleError::Unavailable(metric, format!("lock poisoned: {e}")))
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareSampler for SysinfoSampler {
    fn sample(&self, metric: MetricKind) -> Result<Sample, SampleError> {
        let value = match metric {
            MetricKind::CpuUsage => self.cpu_usage()?,
            MetricKind::CpuTemp => self.cpu_temp()?,
            MetricKind::RamUsage => self.ram_usage()?,
            MetricKind::DiskUsage => self.disk_usage()?,
            MetricKind::NetThroughput => self.net_throughput()?,
            MetricKind::GpuTemp | MetricKind::GpuUsage | MetricKind::GpuVram => {
                return Err(SampleError::Unsupported(metric))
            }
        };
        Ok(Sample::new(metric, value, Utc::now()))
    }

    fn supported(&self) -> Vec<MetricKind> {
        MetricKind::ALL
            .into_iter()
            .filter(|metric| self.sample(*metric).is_ok())
            .collect()
    }
}
