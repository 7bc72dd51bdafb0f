use super::cpu::{sample_scheduler, CpuBaseline, DEFAULT_IDLE_TASK};
use super::platform::{Platform, SensorRange};
use super::reset::RebootReason;
use super::types::{MetricKind, MetricValue, Reading};
use super::wifi::{estimate_data_rate, status_from_ap_query, PhyMode, WifiStatus};
use crate::error::{MetricsError, Result};

/// Version of the metrics engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tunables fixed at engine construction
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Name of the scheduler task whose run time counts as idle
    pub idle_task_name: String,
    pub sensor_range: SensorRange,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            idle_task_name: DEFAULT_IDLE_TASK.to_string(),
            sensor_range: SensorRange::default(),
        }
    }
}

/// Sampling state, present only while the engine is initialized
#[derive(Debug, Clone)]
struct MetricsState {
    temperature_sensor_enabled: bool,
    last_uptime_ms: u64,
    last_temperature_celsius: f32,
    brownout_count: u32,
    error_count: u32,
    reboot_reason: RebootReason,
    cpu_baseline: CpuBaseline,
}

/// Derives health metrics from the platform collaborators.
///
/// The engine has no internal synchronization; `&mut self` on every
/// state-touching method makes callers serialize access. Lifecycle calls are
/// idempotent: initializing a live engine or deinitializing a stopped one is
/// a successful no-op. Every other operation fails with
/// [`MetricsError::InvalidState`] until [`initialize`](Self::initialize) runs.
pub struct MetricsEngine {
    platform: Platform,
    options: EngineOptions,
    state: Option<MetricsState>,
}

impl MetricsEngine {
    /// Create an uninitialized engine with default options
    pub fn new(platform: Platform) -> Self {
        Self::with_options(platform, EngineOptions::default())
    }

    pub fn with_options(platform: Platform, options: EngineOptions) -> Self {
        Self {
            platform,
            options,
            state: None,
        }
    }

    pub fn version() -> &'static str {
        VERSION
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    /// Start sampling. Never fails: a sensor that cannot be brought up only
    /// disables temperature readings.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state.is_some() {
            log::debug!("Metrics engine already initialized");
            return Ok(());
        }

        let last_uptime_ms = self.platform.clock.now_micros() / 1000;
        let (temperature_sensor_enabled, last_temperature_celsius) =
            self.start_temperature_sensor();

        let reboot_reason = RebootReason::from_code(self.platform.reset.reset_code());
        let brownout_count = u32::from(reboot_reason.is_brownout());
        if brownout_count > 0 {
            log::warn!("Last reset was caused by a brownout");
        }

        self.state = Some(MetricsState {
            temperature_sensor_enabled,
            last_uptime_ms,
            last_temperature_celsius,
            brownout_count,
            error_count: 0,
            reboot_reason,
            cpu_baseline: CpuBaseline::default(),
        });

        log::info!(
            "Metrics engine initialized (v{}), reboot reason: {}",
            VERSION,
            reboot_reason
        );
        Ok(())
    }

    /// Stop sampling and release the temperature sensor
    pub fn deinitialize(&mut self) -> Result<()> {
        let Some(state) = self.state.take() else {
            log::debug!("Metrics engine already deinitialized");
            return Ok(());
        };

        if state.temperature_sensor_enabled {
            if let Some(sensor) = self.platform.temperature.as_mut() {
                if let Err(e) = sensor.stop() {
                    log::warn!("Failed to stop temperature sensor: {}", e);
                }
            }
        }

        log::info!("Metrics engine deinitialized");
        Ok(())
    }

    /// Returns `(enabled, initial reading)`
    fn start_temperature_sensor(&mut self) -> (bool, f32) {
        let Some(sensor) = self.platform.temperature.as_mut() else {
            log::warn!("No temperature sensor on this platform");
            return (false, f32::NAN);
        };

        if let Err(e) = sensor.configure(self.options.sensor_range) {
            log::warn!("Failed to configure temperature sensor: {}", e);
            return (false, f32::NAN);
        }

        if let Err(e) = sensor.start() {
            log::warn!("Failed to start temperature sensor: {}", e);
            return (false, f32::NAN);
        }

        match sensor.read_celsius() {
            Ok(celsius) => (true, celsius),
            Err(e) => {
                log::warn!("Initial temperature reading failed: {}", e);
                (true, f32::NAN)
            }
        }
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.state.is_none() {
            return Err(MetricsError::not_initialized());
        }
        Ok(())
    }

    fn state(&self) -> Result<&MetricsState> {
        self.state.as_ref().ok_or_else(MetricsError::not_initialized)
    }

    /// CPU utilization in percent since the previous call.
    ///
    /// The first call after initialization only records a baseline and
    /// reports 0.
    pub fn cpu_usage(&mut self) -> Result<f32> {
        let state = self.state.as_mut().ok_or_else(MetricsError::not_initialized)?;

        let (total, idle) =
            sample_scheduler(&*self.platform.scheduler, &self.options.idle_task_name)?;

        Ok(state.cpu_baseline.advance(total, idle))
    }

    /// Milliseconds since boot
    pub fn uptime(&mut self) -> Result<u64> {
        let state = self.state.as_mut().ok_or_else(MetricsError::not_initialized)?;

        let uptime_ms = self.platform.clock.now_micros() / 1000;
        state.last_uptime_ms = uptime_ms;
        Ok(uptime_ms)
    }

    /// Uptime observed by the most recent [`uptime`](Self::uptime) call, or
    /// at initialization
    pub fn last_uptime_ms(&self) -> Result<u64> {
        Ok(self.state()?.last_uptime_ms)
    }

    /// RSSI of the associated access point; 0 dBm with the platform error
    /// when no record is available
    pub fn wifi_signal(&self) -> Result<Reading<i8>> {
        self.ensure_initialized()?;

        Ok(match self.platform.wifi.ap_record() {
            Ok(record) => Reading::ok(record.rssi),
            Err(e) => Reading::degraded(0, e),
        })
    }

    /// Connection status.
    ///
    /// Only a failed mode query carries an error; every other outcome is
    /// expressed entirely through the returned status.
    pub fn wifi_status(&self) -> Result<Reading<WifiStatus>> {
        self.ensure_initialized()?;

        let mode = match self.platform.wifi.mode() {
            Ok(mode) => mode,
            Err(e) => return Ok(Reading::degraded(WifiStatus::NotInitialized, e)),
        };

        if !mode.has_station() {
            return Ok(Reading::ok(WifiStatus::Disconnected));
        }

        let record = self.platform.wifi.ap_record();
        if let Err(e) = &record {
            log::debug!("Access point query failed: {}", e);
        }

        Ok(Reading::ok(status_from_ap_query(&record)))
    }

    /// Estimated link data rate in Mbps; 0 with the platform error when no
    /// access-point record is available.
    ///
    /// When the negotiated PHY mode cannot be queried the estimate uses the
    /// 802.11b base rate of 11 Mbps, even on HT or VHT links, and the reading
    /// carries no error.
    pub fn wifi_data_rate(&self) -> Result<Reading<f32>> {
        self.ensure_initialized()?;

        let record = match self.platform.wifi.ap_record() {
            Ok(record) => record,
            Err(e) => return Ok(Reading::degraded(0.0, e)),
        };

        let phy_mode = self
            .platform
            .wifi
            .negotiated_phy_mode()
            .unwrap_or_else(|e| {
                log::debug!("Negotiated PHY mode unavailable ({}), assuming legacy", e);
                PhyMode::Legacy11b
            });

        Ok(Reading::ok(estimate_data_rate(phy_mode, &record)))
    }

    /// Die temperature in °C.
    ///
    /// NaN with [`MetricsError::NotSupported`] when the sensor never started;
    /// the last good reading with the platform error when a read fails.
    pub fn temperature(&mut self) -> Result<Reading<f32>> {
        let state = self.state.as_mut().ok_or_else(MetricsError::not_initialized)?;

        let sensor = match self.platform.temperature.as_mut() {
            Some(sensor) if state.temperature_sensor_enabled => sensor,
            _ => {
                return Ok(Reading::degraded(
                    f32::NAN,
                    MetricsError::not_supported("temperature sensor unavailable"),
                ))
            }
        };

        match sensor.read_celsius() {
            Ok(celsius) => {
                state.last_temperature_celsius = celsius;
                Ok(Reading::ok(celsius))
            }
            Err(e) => {
                log::debug!("Temperature read failed, using cached value: {}", e);
                Ok(Reading::degraded(state.last_temperature_celsius, e))
            }
        }
    }

    /// 1 when this boot followed a brownout, 0 otherwise
    pub fn brownout_count(&self) -> Result<u32> {
        Ok(self.state()?.brownout_count)
    }

    pub fn reboot_reason(&self) -> Result<RebootReason> {
        Ok(self.state()?.reboot_reason)
    }

    /// Active maximum log level
    pub fn log_level(&self) -> Result<log::LevelFilter> {
        self.ensure_initialized()?;
        Ok(log::max_level())
    }

    pub fn error_count(&self) -> Result<u32> {
        Ok(self.state()?.error_count)
    }

    /// Bump the embedder's error tally (wraps on overflow)
    pub fn increment_error_count(&mut self) -> Result<()> {
        let state = self.state.as_mut().ok_or_else(MetricsError::not_initialized)?;
        state.error_count = state.error_count.wrapping_add(1);
        Ok(())
    }

    /// Read any metric through a single entry point
    pub fn metric(&mut self, kind: MetricKind) -> Result<Reading<MetricValue>> {
        self.ensure_initialized()?;

        match kind {
            MetricKind::CpuUsage => self.cpu_usage().map(|v| Reading::ok(MetricValue::CpuUsage(v))),
            MetricKind::Uptime => self.uptime().map(|v| Reading::ok(MetricValue::Uptime(v))),
            MetricKind::WifiSignal => self.wifi_signal().map(|r| r.map(MetricValue::WifiSignal)),
            MetricKind::WifiStatus => self.wifi_status().map(|r| r.map(MetricValue::WifiStatus)),
            MetricKind::Temperature => self.temperature().map(|r| r.map(MetricValue::Temperature)),
            MetricKind::BrownoutCount => self
                .brownout_count()
                .map(|v| Reading::ok(MetricValue::BrownoutCount(v))),
            MetricKind::RebootReason => self
                .reboot_reason()
                .map(|v| Reading::ok(MetricValue::RebootReason(v))),
            MetricKind::WifiDataRate => self
                .wifi_data_rate()
                .map(|r| r.map(MetricValue::WifiDataRate)),
            MetricKind::LogLevel => self.log_level().map(|v| Reading::ok(MetricValue::LogLevel(v))),
            MetricKind::ErrorCount => self
                .error_count()
                .map(|v| Reading::ok(MetricValue::ErrorCount(v))),
        }
    }

    /// Like [`metric`](Self::metric), keyed by the raw numeric identifier
    pub fn metric_by_id(&mut self, id: u32) -> Result<Reading<MetricValue>> {
        self.ensure_initialized()?;

        let kind = MetricKind::from_id(id)
            .ok_or_else(|| MetricsError::invalid_argument(format!("unknown metric id {}", id)))?;
        self.metric(kind)
    }
}

impl Drop for MetricsEngine {
    fn drop(&mut self) {
        let _ = self.deinitialize();
    }
}
