//! Periodic metrics reporting until interrupted.

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::*;
use std::time::Duration;
use tokio::sync::broadcast;

use crate::core::report::MetricsReport;
use crate::core::sampler::{run_sampler, SamplerConfig};
use crate::ui::format_report_line;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    let metrics = super::selected_metrics(matches, &config)?;
    let json_output = matches.get_flag("json");

    let interval_ms = matches
        .get_one::<u64>("interval")
        .copied()
        .unwrap_or(config.sample_interval_ms);

    let sampler_config = SamplerConfig {
        metrics,
        interval: Duration::from_millis(interval_ms),
        max_reports: matches.get_one::<u64>("count").copied(),
    };

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let handler_tx = shutdown_tx.clone();
    ctrlc::set_handler(move || {
        let _ = handler_tx.send(());
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .thread_name("metrics-sampler")
        .build()
        .context("Failed to build sampling runtime")?;

    let mut engine = super::start_engine(&config)?;

    if !json_output {
        println!(
            "{}",
            format!("Sampling every {} ms, press Ctrl+C to stop", interval_ms).dimmed()
        );
    }

    let emit = |report: &MetricsReport| {
        if json_output {
            match serde_json::to_string(report) {
                Ok(line) => println!("{}", line),
                Err(e) => log::error!("Failed to serialize report: {}", e),
            }
        } else {
            println!("{} {}", format!("[{}]", report.timestamp).dimmed(), format_report_line(report));
        }
    };

    let result = runtime.block_on(run_sampler(&mut engine, &sampler_config, shutdown_rx, emit));
    engine.deinitialize()?;

    let emitted = result.context("Sampling failed")?;
    log::info!("Emitted {} reports", emitted);

    // Keep the sender alive until the loop has finished
    drop(shutdown_tx);
    Ok(())
}
