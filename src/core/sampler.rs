//! Periodic sampling loop.
//!
//! Drives an initialized [`MetricsEngine`] on a Tokio interval and hands each
//! report to a callback until the report budget runs out or a shutdown
//! signal arrives.

use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::core::metrics::{MetricKind, MetricsEngine};
use crate::core::report::{collect_report, MetricsReport};
use crate::error::{MetricsError, Result};

/// What to sample and how often
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    pub metrics: Vec<MetricKind>,
    pub interval: Duration,
    /// Stop after this many reports; run until shutdown when `None`
    pub max_reports: Option<u64>,
}

/// Run the sampling loop and return the number of reports emitted.
///
/// The first report is taken one interval after start so CPU usage already
/// has a baseline. Each report with at least one failed metric bumps the
/// engine's error tally once. A hard failure ends the loop with that error.
pub async fn run_sampler<F>(
    engine: &mut MetricsEngine,
    config: &SamplerConfig,
    mut shutdown: broadcast::Receiver<()>,
    mut emit: F,
) -> Result<u64>
where
    F: FnMut(&MetricsReport),
{
    if config.interval.is_zero() {
        return Err(MetricsError::invalid_argument("sampling interval must be non-zero"));
    }

    if config.metrics.contains(&MetricKind::CpuUsage) {
        engine.cpu_usage()?;
    }

    let mut ticker = interval_at(Instant::now() + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut emitted = 0u64;

    loop {
        if config.max_reports.is_some_and(|max| emitted >= max) {
            break;
        }

        tokio::select! {
            _ = ticker.tick() => {
                let report = collect_report(engine, &config.metrics)?;
                if report.error_count() > 0 {
                    log::debug!("{} metrics failed in this report", report.error_count());
                    engine.increment_error_count()?;
                }
                emit(&report);
                emitted += 1;
            }
            _ = shutdown.recv() => {
                log::info!("Sampling stopped after {} reports", emitted);
                break;
            }
        }
    }

    Ok(emitted)
}
