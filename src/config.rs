use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

// ─── Aggregator section ──────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AggregatorConfig {
    /// Trailing window length (seconds, fractional allowed)
    #[serde(default = "default_window_secs")]
    pub window_secs: f64,

    /// Percentile ranks reported by every snapshot (0–100)
    #[serde(default = "default_percentiles")]
    pub percentiles: Vec<f64>,

    /// Evict on a timer as well as on writes; off when absent
    #[serde(default)]
    pub sweep_interval_ms: Option<u64>,
}

fn default_window_secs() -> f64 {
    300.0
}
fn default_percentiles() -> Vec<f64> {
    vec![50.0, 90.0, 95.0, 99.0]
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            percentiles: default_percentiles(),
            sweep_interval_ms: None,
        }
    }
}

impl AggregatorConfig {
    /// Window as a `Duration`. Zero, negative and non-finite values are rejected.
    pub fn window(&self) -> Result<Duration, ConfigError> {
        let invalid = ConfigError::InvalidWindow {
            value: self.window_secs,
        };
        if !(self.window_secs > 0.0) {
            return Err(invalid);
        }
        match Duration::try_from_secs_f64(self.window_secs) {
            Ok(window) if !window.is_zero() => Ok(window),
            _ => Err(invalid),
        }
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        self.sweep_interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
    }
}

// ─── Demo run ────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RunConfig {
    #[serde(default)]
    pub aggregator: AggregatorConfig,

    /// Number of concurrent Tokio tasks feeding samples
    #[serde(default = "default_producers")]
    pub producers: u32,

    /// Pause between two samples of the same producer (ms)
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,

    /// How often a snapshot is reported (ms)
    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,

    /// How long the run lasts (seconds)
    #[serde(default = "default_duration")]
    pub duration_secs: u64,
}

fn default_producers() -> u32 {
    4
}
fn default_sample_interval_ms() -> u64 {
    100
}
fn default_report_interval_ms() -> u64 {
    1_000
}
fn default_duration() -> u64 {
    30
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            aggregator: AggregatorConfig::default(),
            producers: default_producers(),
            sample_interval_ms: default_sample_interval_ms(),
            report_interval_ms: default_report_interval_ms(),
            duration_secs: default_duration(),
        }
    }
}

impl RunConfig {
    /// Read a JSON config file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| {
                    ConfigError::ReadConfig {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                serde_json::from_str(&raw).map_err(|source| ConfigError::ParseJson {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.aggregator.window()?;
        check_range("producers", u64::from(self.producers), 1, 256)?;
        check_range("sample_interval_ms", self.sample_interval_ms, 1, 60_000)?;
        check_range("report_interval_ms", self.report_interval_ms, 1, 600_000)?;
        check_range("duration_secs", self.duration_secs, 1, 3_600)?;
        Ok(())
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

fn check_range(field: &'static str, value: u64, min: u64, max: u64) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(())
}
