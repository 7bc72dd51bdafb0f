//! Scriptable board used by tests and by the simulated platform.
//!
//! A [`FakeBoard`] is a cheap handle over shared state: clone it, hand the
//! clones to the engine through [`FakeBoard::platform`], and keep one to
//! advance counters or change link and sensor conditions between calls.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::metrics::{
    ApRecord, MonotonicClock, PhyMode, Platform, ResetCauseRegister, SchedulerAccounting,
    SecondaryChannel, SensorRange, TaskRunTime, TemperatureSensor, WifiLink, WifiMode,
    DEFAULT_IDLE_TASK,
};
use crate::error::PlatformError;

/// Per-call increment applied to the scheduler counters on every snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerStep {
    pub total: u32,
    pub idle: u32,
}

#[derive(Debug)]
struct BoardState {
    micros: u64,
    clock_anchor: Option<Instant>,
    tasks: Vec<TaskRunTime>,
    total_run_time: u32,
    auto_step: Option<SchedulerStep>,
    snapshots_taken: usize,
    wifi_mode: Result<WifiMode, PlatformError>,
    ap_record: Result<ApRecord, PlatformError>,
    phy_mode: Result<PhyMode, PlatformError>,
    sensor_configure: Result<(), PlatformError>,
    sensor_start: Result<(), PlatformError>,
    sensor_read_error: Option<PlatformError>,
    sensor_running: bool,
    sensor_range: Option<SensorRange>,
    temperature_celsius: f32,
    reset_code: u32,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            micros: 1_000_000,
            clock_anchor: None,
            tasks: vec![
                TaskRunTime::new(DEFAULT_IDLE_TASK, 0),
                TaskRunTime::new("main", 0),
            ],
            total_run_time: 0,
            auto_step: None,
            snapshots_taken: 0,
            wifi_mode: Ok(WifiMode::Station),
            ap_record: Ok(ApRecord {
                rssi: -55,
                primary_channel: 6,
                secondary_channel: SecondaryChannel::None,
            }),
            phy_mode: Ok(PhyMode::Ht),
            sensor_configure: Ok(()),
            sensor_start: Ok(()),
            sensor_read_error: None,
            sensor_running: false,
            sensor_range: None,
            temperature_celsius: 42.5,
            reset_code: 1,
        }
    }
}

impl BoardState {
    fn apply_scheduler_step(&mut self, total: u32, idle: u32) {
        self.total_run_time = self.total_run_time.wrapping_add(total);

        let idle_name = DEFAULT_IDLE_TASK;
        let busy = total.saturating_sub(idle);
        for task in &mut self.tasks {
            if task.name == idle_name {
                task.run_time = task.run_time.wrapping_add(idle);
            } else if task.name == "main" {
                task.run_time = task.run_time.wrapping_add(busy);
            }
        }
    }
}

/// Shared handle over a scripted board
#[derive(Debug, Clone, Default)]
pub struct FakeBoard {
    state: Arc<Mutex<BoardState>>,
}

impl FakeBoard {
    /// Board with a station associated over HT20 at -55 dBm, a working
    /// sensor reading 42.5 °C, a power-on reset and idle counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Board whose clock follows wall time and whose scheduler advances on
    /// every snapshot, for demos without hardware.
    pub fn simulated(step: SchedulerStep) -> Self {
        let board = Self::new();
        {
            let mut state = board.state.lock();
            state.clock_anchor = Some(Instant::now());
            state.auto_step = Some(step);
        }
        board
    }

    /// Collaborators backed by this board, sensor included
    pub fn platform(&self) -> Platform {
        Platform {
            clock: Box::new(self.clone()),
            scheduler: Box::new(self.clone()),
            wifi: Box::new(self.clone()),
            temperature: Some(Box::new(self.clone())),
            reset: Box::new(self.clone()),
        }
    }

    /// Collaborators for a hardware variant without a temperature sensor
    pub fn platform_without_sensor(&self) -> Platform {
        Platform {
            temperature: None,
            ..self.platform()
        }
    }

    pub fn advance_clock(&self, by: Duration) {
        let mut state = self.state.lock();
        state.micros = state.micros.saturating_add(by.as_micros() as u64);
    }

    /// Advance the aggregate run time by `total` and the idle task by `idle`
    pub fn advance_scheduler(&self, total: u32, idle: u32) {
        self.state.lock().apply_scheduler_step(total, idle);
    }

    pub fn set_scheduler_counters(&self, total: u32, idle: u32) {
        let mut state = self.state.lock();
        state.total_run_time = total;
        for task in &mut state.tasks {
            if task.name == DEFAULT_IDLE_TASK {
                task.run_time = idle;
            }
        }
    }

    pub fn set_tasks(&self, tasks: Vec<TaskRunTime>) {
        self.state.lock().tasks = tasks;
    }

    pub fn snapshots_taken(&self) -> usize {
        self.state.lock().snapshots_taken
    }

    pub fn set_wifi_mode(&self, mode: Result<WifiMode, PlatformError>) {
        self.state.lock().wifi_mode = mode;
    }

    pub fn set_ap_record(&self, record: Result<ApRecord, PlatformError>) {
        self.state.lock().ap_record = record;
    }

    pub fn set_phy_mode(&self, phy_mode: Result<PhyMode, PlatformError>) {
        self.state.lock().phy_mode = phy_mode;
    }

    /// Associated at `rssi` using `phy_mode` and the given channel layout
    pub fn connect(&self, phy_mode: PhyMode, rssi: i8, secondary_channel: SecondaryChannel) {
        let mut state = self.state.lock();
        state.wifi_mode = Ok(WifiMode::Station);
        state.phy_mode = Ok(phy_mode);
        state.ap_record = Ok(ApRecord {
            rssi,
            primary_channel: 6,
            secondary_channel,
        });
    }

    pub fn disconnect(&self) {
        self.state.lock().ap_record = Err(PlatformError::WifiNotConnected);
    }

    pub fn fail_sensor_configure(&self, err: PlatformError) {
        self.state.lock().sensor_configure = Err(err);
    }

    pub fn fail_sensor_start(&self, err: PlatformError) {
        self.state.lock().sensor_start = Err(err);
    }

    /// Make subsequent sensor reads fail (`Some`) or succeed (`None`)
    pub fn set_sensor_read_error(&self, err: Option<PlatformError>) {
        self.state.lock().sensor_read_error = err;
    }

    pub fn set_temperature(&self, celsius: f32) {
        self.state.lock().temperature_celsius = celsius;
    }

    pub fn sensor_running(&self) -> bool {
        self.state.lock().sensor_running
    }

    pub fn sensor_range(&self) -> Option<SensorRange> {
        self.state.lock().sensor_range
    }

    pub fn set_reset_code(&self, code: u32) {
        self.state.lock().reset_code = code;
    }
}

impl MonotonicClock for FakeBoard {
    fn now_micros(&self) -> u64 {
        let state = self.state.lock();
        let elapsed = state
            .clock_anchor
            .map(|anchor| anchor.elapsed().as_micros() as u64)
            .unwrap_or(0);
        state.micros.saturating_add(elapsed)
    }
}

impl SchedulerAccounting for FakeBoard {
    fn task_count(&self) -> usize {
        self.state.lock().tasks.len()
    }

    fn system_state(&self, tasks: &mut Vec<TaskRunTime>) -> Result<u32, PlatformError> {
        let mut state = self.state.lock();
        if let Some(step) = state.auto_step {
            state.apply_scheduler_step(step.total, step.idle);
        }
        state.snapshots_taken += 1;

        let room = tasks.capacity() - tasks.len();
        tasks.extend(state.tasks.iter().take(room).cloned());
        Ok(state.total_run_time)
    }
}

impl WifiLink for FakeBoard {
    fn mode(&self) -> Result<WifiMode, PlatformError> {
        self.state.lock().wifi_mode
    }

    fn ap_record(&self) -> Result<ApRecord, PlatformError> {
        self.state.lock().ap_record
    }

    fn negotiated_phy_mode(&self) -> Result<PhyMode, PlatformError> {
        self.state.lock().phy_mode
    }
}

impl TemperatureSensor for FakeBoard {
    fn configure(&mut self, range: SensorRange) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        state.sensor_configure?;
        state.sensor_range = Some(range);
        Ok(())
    }

    fn start(&mut self) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        state.sensor_start?;
        state.sensor_running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), PlatformError> {
        self.state.lock().sensor_running = false;
        Ok(())
    }

    fn read_celsius(&mut self) -> Result<f32, PlatformError> {
        let state = self.state.lock();
        if !state.sensor_running {
            return Err(PlatformError::InvalidState);
        }
        match state.sensor_read_error {
            Some(err) => Err(err),
            None => Ok(state.temperature_celsius),
        }
    }
}

impl ResetCauseRegister for FakeBoard {
    fn reset_code(&self) -> u32 {
        self.state.lock().reset_code
    }
}
