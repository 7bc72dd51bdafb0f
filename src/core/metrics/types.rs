use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::reset::RebootReason;
use super::wifi::WifiStatus;
use crate::error::{MetricsError, Result};

/// Identifier of every metric the engine can report.
///
/// Discriminants are the stable numeric identifiers used by
/// [`MetricsEngine::metric_by_id`](super::MetricsEngine::metric_by_id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    CpuUsage = 0,
    Uptime = 1,
    WifiSignal = 2,
    WifiStatus = 3,
    Temperature = 4,
    BrownoutCount = 5,
    RebootReason = 6,
    WifiDataRate = 7,
    LogLevel = 8,
    ErrorCount = 9,
}

impl MetricKind {
    /// Registry of all metrics, in identifier order
    pub const ALL: [MetricKind; 10] = [
        MetricKind::CpuUsage,
        MetricKind::Uptime,
        MetricKind::WifiSignal,
        MetricKind::WifiStatus,
        MetricKind::Temperature,
        MetricKind::BrownoutCount,
        MetricKind::RebootReason,
        MetricKind::WifiDataRate,
        MetricKind::LogLevel,
        MetricKind::ErrorCount,
    ];

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(&self) -> u32 {
        *self as u32
    }

    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::CpuUsage => "cpu_usage",
            MetricKind::Uptime => "uptime",
            MetricKind::WifiSignal => "wifi_signal",
            MetricKind::WifiStatus => "wifi_status",
            MetricKind::Temperature => "temperature",
            MetricKind::BrownoutCount => "brownout_count",
            MetricKind::RebootReason => "reboot_reason",
            MetricKind::WifiDataRate => "wifi_data_rate",
            MetricKind::LogLevel => "log_level",
            MetricKind::ErrorCount => "error_count",
        }
    }

    /// Unit suffix used when rendering values
    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::CpuUsage => "%",
            MetricKind::Uptime => "ms",
            MetricKind::WifiSignal => "dBm",
            MetricKind::Temperature => "°C",
            MetricKind::WifiDataRate => "Mbps",
            _ => "",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = MetricsError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| MetricsError::invalid_argument(format!("unknown metric '{}'", s)))
    }
}

/// Value of a single metric, tagged by kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    CpuUsage(f32),
    Uptime(u64),
    WifiSignal(i8),
    WifiStatus(WifiStatus),
    Temperature(f32),
    BrownoutCount(u32),
    RebootReason(RebootReason),
    WifiDataRate(f32),
    LogLevel(log::LevelFilter),
    ErrorCount(u32),
}

impl MetricValue {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricValue::CpuUsage(_) => MetricKind::CpuUsage,
            MetricValue::Uptime(_) => MetricKind::Uptime,
            MetricValue::WifiSignal(_) => MetricKind::WifiSignal,
            MetricValue::WifiStatus(_) => MetricKind::WifiStatus,
            MetricValue::Temperature(_) => MetricKind::Temperature,
            MetricValue::BrownoutCount(_) => MetricKind::BrownoutCount,
            MetricValue::RebootReason(_) => MetricKind::RebootReason,
            MetricValue::WifiDataRate(_) => MetricKind::WifiDataRate,
            MetricValue::LogLevel(_) => MetricKind::LogLevel,
            MetricValue::ErrorCount(_) => MetricKind::ErrorCount,
        }
    }
}

/// Outcome of an accessor whose failures have a meaningful default.
///
/// `value` is always usable: a live reading, or the sentinel/fallback the
/// engine substitutes on soft failure. `error` carries that failure, if any,
/// so callers can either trust the value or branch on the error.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading<T> {
    pub value: T,
    pub error: Option<MetricsError>,
}

impl<T> Reading<T> {
    pub fn ok(value: T) -> Self {
        Self { value, error: None }
    }

    pub fn degraded<E: Into<MetricsError>>(value: T, error: E) -> Self {
        Self {
            value,
            error: Some(error.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Reading<U> {
        Reading {
            value: f(self.value),
            error: self.error,
        }
    }

    /// Discard the fallback value when an error was reported
    pub fn into_result(self) -> Result<T> {
        match self.error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}
