use mcu_metrics::core::metrics::{MetricKind, MetricValue, MetricsEngine, WifiStatus};
use mcu_metrics::core::report::collect_report;
use mcu_metrics::platform::fake::FakeBoard;
use mcu_metrics::MetricsError;

#[test]
fn test_every_id_dispatches_to_its_kind() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform());
    engine.initialize().unwrap();

    for id in 0..10 {
        let reading = engine.metric_by_id(id).unwrap();
        assert_eq!(reading.value.kind().id(), id);
    }
}

#[test]
fn test_unknown_id_is_invalid_argument() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform());
    engine.initialize().unwrap();

    assert!(matches!(
        engine.metric_by_id(10),
        Err(MetricsError::InvalidArgument(_))
    ));
    assert!(matches!(
        engine.metric_by_id(u32::MAX),
        Err(MetricsError::InvalidArgument(_))
    ));
}

#[test]
fn test_dispatch_before_initialize_is_invalid_state() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform());

    assert!(matches!(
        engine.metric(MetricKind::ErrorCount),
        Err(MetricsError::InvalidState(_))
    ));
    assert!(matches!(
        engine.metric_by_id(99),
        Err(MetricsError::InvalidState(_))
    ));
}

#[test]
fn test_dispatch_carries_soft_failures() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform_without_sensor());
    engine.initialize().unwrap();
    board.disconnect();

    let signal = engine.metric(MetricKind::WifiSignal).unwrap();
    assert_eq!(signal.value, MetricValue::WifiSignal(0));
    assert!(!signal.is_ok());

    let status = engine.metric(MetricKind::WifiStatus).unwrap();
    assert_eq!(status.value, MetricValue::WifiStatus(WifiStatus::Disconnected));
    assert!(status.is_ok());

    let temperature = engine.metric(MetricKind::Temperature).unwrap();
    assert!(matches!(temperature.value, MetricValue::Temperature(t) if t.is_nan()));
}

#[test]
fn test_report_over_all_metrics() {
    let board = FakeBoard::new();
    let mut engine = MetricsEngine::new(board.platform_without_sensor());
    engine.initialize().unwrap();

    let report = collect_report(&mut engine, &MetricKind::ALL).unwrap();
    assert_eq!(report.entries.len(), MetricKind::ALL.len());
    assert_eq!(report.error_count(), 1);
    assert!(!report.entry(MetricKind::Temperature).unwrap().is_ok());

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["entries"][0]["metric"], "cpu_usage");
    assert_eq!(json["entries"][0]["value"], 0.0);
}
