use mcu_metrics::core::metrics::{
    MetricsEngine, PhyMode, RebootReason, ResetCause, SecondaryChannel, WifiStatus,
};
use mcu_metrics::platform::fake::{FakeBoard, SchedulerStep};
use mcu_metrics::{MetricsError, PlatformError};
use std::time::Duration;

#[test]
fn test_accessors_fail_before_initialize() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform());

    assert!(matches!(engine.cpu_usage(), Err(MetricsError::InvalidState(_))));
    assert!(matches!(engine.uptime(), Err(MetricsError::InvalidState(_))));
    assert!(matches!(engine.wifi_signal(), Err(MetricsError::InvalidState(_))));
    assert!(matches!(engine.temperature(), Err(MetricsError::InvalidState(_))));
    assert!(matches!(engine.error_count(), Err(MetricsError::InvalidState(_))));
    assert!(matches!(
        engine.increment_error_count(),
        Err(MetricsError::InvalidState(_))
    ));
}

#[test]
fn test_full_lifecycle() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform());

    engine.initialize().unwrap();
    engine.initialize().unwrap();
    assert!(engine.is_initialized());
    assert!(board.sensor_running());

    // Baseline, then 40% busy
    board.set_scheduler_counters(10_000, 6_000);
    assert_eq!(engine.cpu_usage().unwrap(), 0.0);
    board.advance_scheduler(1000, 600);
    assert_eq!(engine.cpu_usage().unwrap(), 40.0);

    engine.increment_error_count().unwrap();
    engine.increment_error_count().unwrap();
    assert_eq!(engine.error_count().unwrap(), 2);

    engine.deinitialize().unwrap();
    engine.deinitialize().unwrap();
    assert!(!engine.is_initialized());
    assert!(!board.sensor_running());

    // Counters reset on the next cycle
    engine.initialize().unwrap();
    assert_eq!(engine.error_count().unwrap(), 0);
    assert_eq!(engine.cpu_usage().unwrap(), 0.0);
}

#[test]
fn test_all_zero_snapshot_is_not_a_baseline() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform());
    engine.initialize().unwrap();

    // Counters start at zero, so this snapshot leaves the baseline unset
    assert_eq!(engine.cpu_usage().unwrap(), 0.0);
    board.advance_scheduler(1000, 600);
    assert_eq!(engine.cpu_usage().unwrap(), 0.0);

    // The previous call established the baseline
    board.advance_scheduler(1000, 250);
    assert_eq!(engine.cpu_usage().unwrap(), 75.0);
}

#[test]
fn test_uptime_follows_clock() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform());
    engine.initialize().unwrap();

    let first = engine.uptime().unwrap();
    board.advance_clock(Duration::from_millis(1500));
    let second = engine.uptime().unwrap();

    assert_eq!(second - first, 1500);
    assert_eq!(engine.last_uptime_ms().unwrap(), second);
}

#[test]
fn test_uptime_on_simulated_board_tracks_wall_time() {
    let board = FakeBoard::simulated(SchedulerStep { total: 100, idle: 50 });
    let mut engine = MetricsEngine::new(board.platform());
    engine.initialize().unwrap();

    let first = engine.uptime().unwrap();
    std::thread::sleep(Duration::from_millis(50));
    let second = engine.uptime().unwrap();

    assert!(second >= first + 50);
}

#[test]
fn test_brownout_boot() {
    let board = FakeBoard::new();
    board.set_reset_code(ResetCause::Brownout.code());
    let mut engine = MetricsEngine::new(board.platform());
    engine.initialize().unwrap();

    assert_eq!(engine.brownout_count().unwrap(), 1);
    assert_eq!(engine.reboot_reason().unwrap(), RebootReason::from_code(8));
    assert_eq!(engine.reboot_reason().unwrap().label, "Brownout reset");
}

#[test]
fn test_unknown_reset_code() {
    let board = FakeBoard::new();
    board.set_reset_code(42);
    let mut engine = MetricsEngine::new(board.platform());
    engine.initialize().unwrap();

    assert_eq!(engine.brownout_count().unwrap(), 0);
    assert_eq!(engine.reboot_reason().unwrap().label, "Unknown reason");
}

#[test]
fn test_wifi_metrics_follow_link() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform());
    engine.initialize().unwrap();

    board.connect(PhyMode::Ht, -90, SecondaryChannel::Above);
    assert_eq!(engine.wifi_signal().unwrap().value, -90);
    assert_eq!(engine.wifi_status().unwrap().value, WifiStatus::Connected);
    assert_eq!(engine.wifi_data_rate().unwrap().value, 144.0);

    board.disconnect();
    let signal = engine.wifi_signal().unwrap();
    assert_eq!(signal.value, 0);
    assert_eq!(
        signal.error,
        Some(MetricsError::Platform(PlatformError::WifiNotConnected))
    );
    assert_eq!(engine.wifi_status().unwrap().value, WifiStatus::Disconnected);
    assert_eq!(engine.wifi_data_rate().unwrap().value, 0.0);
}

#[test]
fn test_temperature_without_sensor_is_nan() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform_without_sensor());
    engine.initialize().unwrap();

    let reading = engine.temperature().unwrap();
    assert!(reading.value.is_nan());
    assert!(matches!(reading.error, Some(MetricsError::NotSupported(_))));
}

#[test]
fn test_temperature_read_failure_keeps_last_value() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform());
    engine.initialize().unwrap();

    board.set_temperature(47.0);
    assert_eq!(engine.temperature().unwrap().value, 47.0);

    board.set_sensor_read_error(Some(PlatformError::Timeout));
    let reading = engine.temperature().unwrap();
    assert_eq!(reading.value, 47.0);
    assert_eq!(
        reading.error,
        Some(MetricsError::Platform(PlatformError::Timeout))
    );
}

#[test]
fn test_drop_releases_sensor() {
    let board = FakeBoard::new();
    {
        let mut engine = MetricsEngine::new(board.platform());
        engine.initialize().unwrap();
        assert!(board.sensor_running());
    }
    assert!(!board.sensor_running());
}
