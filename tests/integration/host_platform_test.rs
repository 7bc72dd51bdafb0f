use mcu_metrics::core::config::Config;
use mcu_metrics::core::metrics::{
    MetricsEngine, MonotonicClock, SchedulerAccounting, WifiLink, WifiMode,
};
use mcu_metrics::platform::host::{InstantClock, ProcStatScheduler, ProcWirelessLink};
use mcu_metrics::PlatformError;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

const PROC_STAT: &str = "cpu  100 0 50 800 10 5 5 0 0 0\ncpu0 100 0 50 800 10 5 5 0 0 0\n";

#[test]
fn test_proc_stat_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("stat");
    fs::write(&path, PROC_STAT).unwrap();

    let scheduler = ProcStatScheduler::with_path(&path);
    let mut tasks = Vec::with_capacity(scheduler.task_count());
    let total = scheduler.system_state(&mut tasks).unwrap();

    assert_eq!(total, 970);
    let idle = tasks.iter().find(|t| t.name == "IDLE").unwrap();
    assert_eq!(idle.run_time, 800);
}

#[test]
fn test_missing_wireless_file() {
    let link = ProcWirelessLink::with_path("/nonexistent/net/wireless", None);
    assert_eq!(link.mode(), Err(PlatformError::WifiNotInitialized));
    assert_eq!(link.ap_record(), Err(PlatformError::WifiNotInitialized));
}

#[test]
fn test_header_only_wireless_file_means_no_station() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("wireless");
    fs::write(&path, "Inter-| sta-|   Quality\n face | tus | link level noise\n").unwrap();

    let link = ProcWirelessLink::with_path(&path, None);
    assert_eq!(link.mode(), Ok(WifiMode::Null));
}

#[test]
fn test_host_engine_lifecycle() {
    // Sensor, wireless and /proc availability vary between machines; the
    // lifecycle must hold regardless.
    let config = Config::default();
    let mut engine =
        MetricsEngine::with_options(mcu_metrics::platform::host_platform(&config), config.engine_options());

    engine.initialize().unwrap();
    assert_eq!(engine.reboot_reason().unwrap().code, 1);
    assert_eq!(engine.brownout_count().unwrap(), 0);
    assert!(engine.wifi_signal().is_ok());
    assert!(engine.temperature().is_ok());
    engine.deinitialize().unwrap();
}

#[test]
fn test_instant_clock_tracks_real_delay() {
    let clock = InstantClock::new();
    let first_ms = clock.now_micros() / 1000;
    std::thread::sleep(Duration::from_millis(30));
    let second_ms = clock.now_micros() / 1000;

    assert!(second_ms >= first_ms + 30);
}

#[test]
fn test_host_engine_uptime_tracks_real_delay() {
    let config = Config::default();
    let mut engine = MetricsEngine::with_options(
        mcu_metrics::platform::host_platform(&config),
        config.engine_options(),
    );
    engine.initialize().unwrap();

    let first = engine.uptime().unwrap();
    std::thread::sleep(Duration::from_millis(30));
    let second = engine.uptime().unwrap();

    assert!(second >= first + 30);
    assert_eq!(engine.last_uptime_ms().unwrap(), second);
}
