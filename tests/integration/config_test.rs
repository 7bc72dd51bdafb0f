use mcu_metrics::core::config::{Config, PlatformKind};
use mcu_metrics::core::metrics::{MetricKind, MetricsEngine, SensorRange};
use mcu_metrics::platform::build_platform;
use tempfile::TempDir;

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let mut config = Config::default();
    config.set_value("platform", "simulated").unwrap();
    config.set_value("metrics", "uptime,wifi-data-rate").unwrap();
    config.set_value("reset_code", "8").unwrap();
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.platform, PlatformKind::Simulated);
    assert_eq!(
        loaded.metrics,
        vec![MetricKind::Uptime, MetricKind::WifiDataRate]
    );
}

#[test]
fn test_missing_and_corrupt_files_yield_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let missing = temp_dir.path().join("missing.json");
    assert_eq!(Config::load_from(&missing).unwrap(), Config::default());

    let corrupt = temp_dir.path().join("corrupt.json");
    std::fs::write(&corrupt, "{ not json").unwrap();
    assert_eq!(Config::load_from(&corrupt).unwrap(), Config::default());

    let empty = temp_dir.path().join("empty.json");
    std::fs::write(&empty, "   \n").unwrap();
    assert_eq!(Config::load_from(&empty).unwrap(), Config::default());
}

#[test]
fn test_invalid_values_are_rejected() {
    let mut config = Config::default();
    assert!(config.set_value("platform", "mainframe").is_err());
    assert!(config.set_value("interval", "0").is_err());
    assert!(config.set_value("metrics", "cpu_usage,bogus").is_err());
    assert!(config.set_value("sensor_range", "80..-10").is_err());
    assert!(config.set_value("no_such_key", "1").is_err());
    assert_eq!(config, Config::default());
}

#[test]
fn test_engine_options_from_config() {
    let mut config = Config::default();
    config.set_value("platform", "simulated").unwrap();
    config.set_value("sensor_range", "20..50").unwrap();
    config.set_value("reset_code", "8").unwrap();

    let options = config.engine_options();
    assert_eq!(
        options.sensor_range,
        SensorRange {
            min_celsius: 20,
            max_celsius: 50
        }
    );

    let mut engine = MetricsEngine::with_options(build_platform(&config), options);
    engine.initialize().unwrap();
    assert_eq!(engine.brownout_count().unwrap(), 1);
}
