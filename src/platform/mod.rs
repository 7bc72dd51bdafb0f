//! Platform layer: concrete collaborators for the metrics engine.

pub mod fake;
pub mod host;

use crate::core::config::{Config, PlatformKind};
use crate::core::metrics::Platform;
use fake::{FakeBoard, SchedulerStep};

/// Scheduler increment of the simulated board: 1000 ticks per sample, 35% busy
const SIMULATED_STEP: SchedulerStep = SchedulerStep {
    total: 1000,
    idle: 650,
};

pub fn host_platform(config: &Config) -> Platform {
    Platform {
        clock: Box::new(host::InstantClock::new()),
        scheduler: Box::new(host::ProcStatScheduler::new()),
        wifi: Box::new(host::ProcWirelessLink::new(config.wireless_interface.clone())),
        temperature: Some(Box::new(host::ComponentTemperatureSensor::new())),
        reset: Box::new(host::FixedResetCause(config.reset_code)),
    }
}

pub fn simulated_platform(config: &Config) -> Platform {
    let board = FakeBoard::simulated(SIMULATED_STEP);
    board.set_reset_code(config.reset_code);
    board.platform()
}

/// Collaborators selected by `config.platform`
pub fn build_platform(config: &Config) -> Platform {
    log::debug!("Using {:?} platform", config.platform);
    match config.platform {
        PlatformKind::Host => host_platform(config),
        PlatformKind::Simulated => simulated_platform(config),
    }
}
