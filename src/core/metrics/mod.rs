//! Metric computation and state-tracking engine.
//!
//! This module derives health metrics (CPU usage, uptime, wireless link
//! quality, die temperature, reset history, error tallies) from the raw
//! facilities described in [`platform`].

mod cpu;
mod engine;
pub mod platform;
mod reset;
mod types;
mod wifi;

pub use cpu::{
    idle_run_time, sample_scheduler, usage_percent, CpuBaseline, TaskRunTime, DEFAULT_IDLE_TASK,
};
pub use engine::{EngineOptions, MetricsEngine, VERSION};
pub use platform::{
    MonotonicClock, Platform, ResetCauseRegister, SchedulerAccounting, SensorRange,
    TemperatureSensor, WifiLink,
};
pub use reset::{RebootReason, ResetCause, UNKNOWN_REASON_LABEL};
pub use types::{MetricKind, MetricValue, Reading};
pub use wifi::{
    base_rate_mbps, estimate_data_rate, signal_factor, status_from_ap_query, ApRecord, PhyMode,
    SecondaryChannel, WifiMode, WifiStatus,
};
