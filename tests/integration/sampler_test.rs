use mcu_metrics::core::metrics::{MetricKind, MetricValue, MetricsEngine};
use mcu_metrics::core::sampler::{run_sampler, SamplerConfig};
use mcu_metrics::platform::fake::{FakeBoard, SchedulerStep};
use mcu_metrics::MetricsError;
use std::time::Duration;
use tokio::sync::broadcast;

fn started_engine(board: &FakeBoard) -> MetricsEngine {
    let mut engine = MetricsEngine::new(board.platform());
    engine.initialize().unwrap();
    engine
}

#[tokio::test]
async fn test_reports_carry_cpu_and_uptime() {
    let board = FakeBoard::simulated(SchedulerStep {
        total: 1000,
        idle: 650,
    });
    let mut engine = started_engine(&board);

    let config = SamplerConfig {
        metrics: vec![MetricKind::CpuUsage, MetricKind::Uptime],
        interval: Duration::from_millis(20),
        max_reports: Some(2),
    };

    let (_tx, rx) = broadcast::channel(1);
    let mut reports = Vec::new();
    let emitted = run_sampler(&mut engine, &config, rx, |report| reports.push(report.clone()))
        .await
        .unwrap();

    assert_eq!(emitted, 2);
    for report in &reports {
        assert_eq!(report.error_count(), 0);
        let cpu = report.entry(MetricKind::CpuUsage).unwrap();
        assert_eq!(cpu.value, Some(MetricValue::CpuUsage(35.0)));
    }

    let uptime = |i: usize| match reports[i].entry(MetricKind::Uptime).unwrap().value {
        Some(MetricValue::Uptime(ms)) => ms,
        other => panic!("unexpected uptime value {:?}", other),
    };
    assert!(uptime(1) >= uptime(0));
}

#[tokio::test]
async fn test_zero_interval_is_rejected() {
    let board = FakeBoard::new();
    let mut engine = started_engine(&board);

    let config = SamplerConfig {
        metrics: vec![MetricKind::Uptime],
        interval: Duration::ZERO,
        max_reports: Some(1),
    };

    let (_tx, rx) = broadcast::channel(1);
    let err = run_sampler(&mut engine, &config, rx, |_| {}).await.unwrap_err();
    assert!(matches!(err, MetricsError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_shutdown_from_another_task() {
    let board = FakeBoard::new();
    let mut engine = started_engine(&board);

    let config = SamplerConfig {
        metrics: vec![MetricKind::ErrorCount],
        interval: Duration::from_millis(5),
        max_reports: None,
    };

    let (tx, rx) = broadcast::channel(1);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(60)).await;
        let _ = tx.send(());
    });

    let emitted = run_sampler(&mut engine, &config, rx, |_| {}).await.unwrap();
    assert!(emitted >= 1);
    assert!(engine.is_initialized());
}
