use serde::{Deserialize, Serialize};

/// Kind of hardware metric tracked by a monitoring session.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    CpuTemp,
    CpuUsage,
    GpuTemp,
    GpuUsage,
    GpuVram,
    RamUsage,
    DiskUsage,
    NetThroughput,
}

impl MetricKind {
    /// All known metric kinds, in canonical order.
    pub const ALL: [Self; 8] = [
        Self::CpuTemp,
        Self::CpuUsage,
        Self::GpuTemp,
        Self::GpuUsage,
        Self::GpuVram,
        Self::RamUsage,
        Self::DiskUsage,
        Self::NetThroughput,
    ];

    /// Metric family, used as the recommendation category.
    #[must_use]
    pub const fn family(&self) -> &'static str {
        match self {
            Self::CpuTemp | Self::GpuTemp => "thermal",
            Self::CpuUsage | Self::GpuUsage => "compute",
            Self::GpuVram | Self::RamUsage => "memory",
            Self::DiskUsage => "storage",
            Self::NetThroughput => "network",
        }
    }

    /// Canonical unit for readings of this kind.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::CpuTemp | Self::GpuTemp => "°C",
            Self::NetThroughput => "MB/s",
            _ => "%",
        }
    }

    /// Human label used in alert messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CpuTemp => "Température CPU",
            Self::CpuUsage => "Utilisation CPU",
            Self::GpuTemp => "Température GPU",
            Self::GpuUsage => "Utilisation GPU",
            Self::GpuVram => "Utilisation VRAM",
            Self::RamUsage => "Utilisation RAM",
            Self::DiskUsage => "Utilisation disque",
            Self::NetThroughput => "Débit réseau",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Self::CpuTemp => "CPU_TEMP",
            Self::CpuUsage => "CPU_USAGE",
            Self::GpuTemp => "GPU_TEMP",
            Self::GpuUsage => "GPU_USAGE",
            Self::GpuVram => "GPU_VRAM",
            Self::RamUsage => "RAM_USAGE",
            Self::DiskUsage => "DISK_USAGE",
            Self::NetThroughput => "NET_THROUGHPUT",
        };
        write!(f, "{tag}")
    }
}
