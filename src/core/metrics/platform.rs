//! Platform collaborators consumed by the metrics engine.
//!
//! The engine never talks to hardware directly. Each facility it reads from is
//! abstracted behind a trait; implementations live in the platform layer
//! (`crate::platform`).

use serde::{Deserialize, Serialize};

use super::cpu::TaskRunTime;
use super::wifi::{ApRecord, PhyMode, WifiMode};
use crate::error::PlatformError;

/// Monotonic time source
pub trait MonotonicClock: Send {
    /// Microseconds elapsed since boot
    fn now_micros(&self) -> u64;
}

/// Run-time accounting of a preemptive scheduler
pub trait SchedulerAccounting: Send {
    /// Number of tasks currently alive
    fn task_count(&self) -> usize;

    /// Fill `tasks` with a snapshot of per-task run-time counters and return
    /// the aggregate run time since the scheduler started.
    ///
    /// Implementations must not grow `tasks` past its reserved capacity.
    fn system_state(&self, tasks: &mut Vec<TaskRunTime>) -> Result<u32, PlatformError>;
}

/// Status provider of the wireless link
pub trait WifiLink: Send {
    /// Current operating mode; fails when the wireless stack is not started
    fn mode(&self) -> Result<WifiMode, PlatformError>;

    /// Record of the access point the station is associated with
    fn ap_record(&self) -> Result<ApRecord, PlatformError>;

    /// PHY mode negotiated with the associated access point
    fn negotiated_phy_mode(&self) -> Result<PhyMode, PlatformError>;
}

/// On-die temperature sensor
pub trait TemperatureSensor: Send {
    fn configure(&mut self, range: SensorRange) -> Result<(), PlatformError>;
    fn start(&mut self) -> Result<(), PlatformError>;
    fn stop(&mut self) -> Result<(), PlatformError>;
    fn read_celsius(&mut self) -> Result<f32, PlatformError>;
}

/// Register holding the cause of the last reset
pub trait ResetCauseRegister: Send {
    /// Raw ordinal reset code as reported by the platform
    fn reset_code(&self) -> u32;
}

/// Measurement range the temperature sensor is configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorRange {
    pub min_celsius: i8,
    pub max_celsius: i8,
}

impl Default for SensorRange {
    fn default() -> Self {
        Self {
            min_celsius: -10,
            max_celsius: 80,
        }
    }
}

/// Bundle of collaborators handed to the engine at construction
pub struct Platform {
    pub clock: Box<dyn MonotonicClock>,
    pub scheduler: Box<dyn SchedulerAccounting>,
    pub wifi: Box<dyn WifiLink>,
    /// `None` on hardware variants without a temperature sensor
    pub temperature: Option<Box<dyn TemperatureSensor>>,
    pub reset: Box<dyn ResetCauseRegister>,
}
