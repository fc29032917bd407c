use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::metric::MetricKind;
use crate::domain::value_objects::thresholds::ThresholdPolicy;

/// Top-level application configuration loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub thresholds: ThresholdConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// General settings: session length and sampling cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_duration")]
    pub duration_minutes: u64,
    #[serde(default = "default_tick_interval")]
    pub tick_interval_secs: u64,
}

/// Per-metric alert thresholds. Entries override the default rule set;
/// metrics that have no default and no entry are recorded without
/// classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdConfig {
    #[serde(flatten)]
    pub rules: BTreeMap<MetricKind, RuleOverride>,
}

/// Warning/critical bounds for one metric.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RuleOverride {
    pub warning: f64,
    pub critical: f64,
}

/// Export destination (tilde-expanded at point of use).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

// --- Defaults ---

const fn default_duration() -> u64 {
    5
}

const fn default_tick_interval() -> u64 {
    2
}

fn default_rules() -> BTreeMap<MetricKind, RuleOverride> {
    let policy = ThresholdPolicy::default();
    let mut rules = BTreeMap::new();
    for metric in MetricKind::ALL {
        if let Some(rule) = policy.rule(metric) {
            rules.insert(
                metric,
                RuleOverride {
                    warning: rule.warning,
                    critical: rule.critical,
                },
            );
        }
    }
    rules
}

fn default_output_dir() -> String {
    ".".into()
}

// --- Default impls ---

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration(),
            tick_interval_secs: default_tick_interval(),
        }
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

// --- AppConfig methods ---

impl AppConfig {
    /// Load config from default path or create default config file
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined,
    /// the file cannot be read, or the TOML content is invalid.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_or_create(&path)
    }

    /// Load from a specific path, or create a default config file if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is invalid,
    /// or the default config file cannot be written.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from(path)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Load from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML content is invalid.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to a specific path, creating parent directories if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created,
    /// serialization fails, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("vitals").join("config.toml"))
    }
}

impl From<&ThresholdConfig> for ThresholdPolicy {
    fn from(config: &ThresholdConfig) -> Self {
        // File entries override the default rule set; metrics not
        // listed keep their documented defaults. set() clamps negatives
        // and repairs warning/critical inversions.
        let mut policy = Self::default();
        for (metric, rule) in &config.rules {
            policy.set(*metric, rule.warning, rule.critical);
        }
        policy
    }
}
