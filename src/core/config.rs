use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::metrics::{EngineOptions, MetricKind, SensorRange, DEFAULT_IDLE_TASK};
use crate::error::MetricsError;

/// Which collaborators back the engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    /// Host facilities (/proc, sysinfo)
    #[default]
    Host,
    /// Scripted board with synthetic counters
    Simulated,
}

impl std::str::FromStr for PlatformKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "host" => Ok(PlatformKind::Host),
            "simulated" | "sim" => Ok(PlatformKind::Simulated),
            other => Err(MetricsError::config(format!("unknown platform '{}'", other))),
        }
    }
}

fn default_interval_ms() -> u64 {
    5000
}

fn default_metrics() -> Vec<MetricKind> {
    MetricKind::ALL.to_vec()
}

fn default_idle_task_name() -> String {
    DEFAULT_IDLE_TASK.to_string()
}

fn default_reset_code() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub platform: PlatformKind,
    #[serde(default = "default_interval_ms")]
    pub sample_interval_ms: u64,
    /// Metrics included in every report
    #[serde(default = "default_metrics")]
    pub metrics: Vec<MetricKind>,
    #[serde(default = "default_idle_task_name")]
    pub idle_task_name: String,
    #[serde(default)]
    pub sensor_range: SensorRange,
    /// Wireless interface to watch; first one found when unset
    #[serde(default)]
    pub wireless_interface: Option<String>,
    /// Reset code reported by platforms without a reset register
    #[serde(default = "default_reset_code")]
    pub reset_code: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platform: PlatformKind::default(),
            sample_interval_ms: default_interval_ms(),
            metrics: default_metrics(),
            idle_task_name: default_idle_task_name(),
            sensor_range: SensorRange::default(),
            wireless_interface: None,
            reset_code: default_reset_code(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load from `path`; a missing, empty or unparseable file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let data = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        Ok(serde_json::from_str(&data).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable config file {:?}: {}", path, e);
            Config::default()
        }))
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let data =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        fs::write(path, data).with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("mcu-metrics").join("config.json"))
    }

    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            idle_task_name: self.idle_task_name.clone(),
            sensor_range: self.sensor_range,
        }
    }

    /// Update a single key from its textual form
    pub fn set_value(&mut self, key: &str, value: &str) -> std::result::Result<(), MetricsError> {
        match key {
            "platform" => self.platform = value.parse()?,
            "sample_interval_ms" | "interval" => {
                let interval: u64 = value.parse().map_err(|_| {
                    MetricsError::config(format!("invalid interval '{}'", value))
                })?;
                if interval == 0 {
                    return Err(MetricsError::config("interval must be greater than 0"));
                }
                self.sample_interval_ms = interval;
            }
            "metrics" => {
                self.metrics = value
                    .split(',')
                    .filter(|s| !s.trim().is_empty())
                    .map(|s| s.parse::<MetricKind>())
                    .collect::<std::result::Result<Vec<_>, _>>()?;
            }
            "idle_task_name" => {
                if value.trim().is_empty() {
                    return Err(MetricsError::config("idle task name cannot be empty"));
                }
                self.idle_task_name = value.trim().to_string();
            }
            "sensor_range" => self.sensor_range = parse_sensor_range(value)?,
            "wireless_interface" => {
                self.wireless_interface = match value.trim() {
                    "" | "auto" => None,
                    name => Some(name.to_string()),
                }
            }
            "reset_code" => {
                self.reset_code = value.parse().map_err(|_| {
                    MetricsError::config(format!("invalid reset code '{}'", value))
                })?;
            }
            other => return Err(MetricsError::config(format!("unknown key '{}'", other))),
        }
        Ok(())
    }
}

/// Parse `"<min>..<max>"` in °C
fn parse_sensor_range(value: &str) -> std::result::Result<SensorRange, MetricsError> {
    let invalid = || MetricsError::config(format!("invalid sensor range '{}', expected MIN..MAX", value));

    let (min, max) = value.split_once("..").ok_or_else(invalid)?;
    let min_celsius: i8 = min.trim().parse().map_err(|_| invalid())?;
    let max_celsius: i8 = max.trim().parse().map_err(|_| invalid())?;

    if min_celsius >= max_celsius {
        return Err(invalid());
    }

    Ok(SensorRange {
        min_celsius,
        max_celsius,
    })
}
