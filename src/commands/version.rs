use anyhow::Result;

use crate::core::metrics::MetricsEngine;

pub fn execute() -> Result<()> {
    println!("mcu-metrics version {}", MetricsEngine::version());
    Ok(())
}
