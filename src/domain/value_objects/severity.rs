use serde::{Deserialize, Serialize};

/// Severity level for alerts and recommendations.
///
/// `None` is the floor of the total order: it marks "no alert" in
/// worst-severity merges and never appears on an emitted alert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "NONE"),
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl Severity {
    #[must_use]
    pub const fn emoji(&self) -> &str {
        match self {
            Self::None => "✅",
            Self::Low => "ℹ️",
            Self::Medium => "⚠️",
            Self::High => "🔶",
            Self::Critical => "🔴",
        }
    }
}
