//! Collaborators backed by the host operating system.

mod scheduler;
mod temperature;
mod wifi;

use std::time::Instant;

use crate::core::metrics::{MonotonicClock, ResetCauseRegister};

pub use scheduler::{parse_proc_stat, ProcStatScheduler};
pub use temperature::ComponentTemperatureSensor;
pub use wifi::{parse_proc_wireless, ProcWirelessLink, WirelessEntry};

/// Monotonic clock counting from its own construction
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for InstantClock {
    fn now_micros(&self) -> u64 {
        self.origin.elapsed().as_micros() as u64
    }
}

/// Hosts have no reset register; the code comes from configuration
pub struct FixedResetCause(pub u32);

impl ResetCauseRegister for FixedResetCause {
    fn reset_code(&self) -> u32 {
        self.0
    }
}
