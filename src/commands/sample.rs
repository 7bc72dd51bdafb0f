//! One-shot metrics report.

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::time::Duration;

use crate::core::metrics::MetricKind;
use crate::core::report::collect_report;
use crate::ui::print_report;

/// Default window between the baseline and the reported CPU sample
const DEFAULT_CPU_WINDOW_MS: u64 = 250;

pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = super::load_config(matches)?;
    let metrics = super::selected_metrics(matches, &config)?;
    let json_output = matches.get_flag("json");
    let window_ms = matches
        .get_one::<u64>("window")
        .copied()
        .unwrap_or(DEFAULT_CPU_WINDOW_MS);

    let mut engine = super::start_engine(&config)?;

    // CPU usage needs a baseline sample before it can report anything
    if metrics.contains(&MetricKind::CpuUsage) {
        engine
            .cpu_usage()
            .context("Failed to take CPU usage baseline")?;
        std::thread::sleep(Duration::from_millis(window_ms));
    }

    let report = collect_report(&mut engine, &metrics).context("Failed to collect metrics")?;
    engine.deinitialize()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}
