// Command handlers module
pub mod completions;
pub mod config;
pub mod reasons;
pub mod sample;
pub mod version;
pub mod watch;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::config::Config;
use crate::core::metrics::{MetricKind, MetricsEngine};
use crate::platform::build_platform;

// Re-exports for cleaner imports
pub use reasons::execute as reasons;
pub use sample::execute as sample;
pub use version::execute as version;
pub use watch::execute as watch;

/// Load the configuration and apply the `--platform` override, if any
pub(crate) fn load_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = Config::load()?;

    if let Some(platform) = matches.get_one::<String>("platform") {
        config.platform = platform
            .parse()
            .with_context(|| format!("Invalid --platform value '{}'", platform))?;
    }

    Ok(config)
}

/// Metrics named with `--metric`, or the configured set
pub(crate) fn selected_metrics(matches: &ArgMatches, config: &Config) -> Result<Vec<MetricKind>> {
    match matches.get_many::<String>("metric") {
        Some(names) => names
            .map(|name| name.parse::<MetricKind>().map_err(anyhow::Error::from))
            .collect(),
        None => Ok(config.metrics.clone()),
    }
}

/// Build an engine on the configured platform and initialize it
pub(crate) fn start_engine(config: &Config) -> Result<MetricsEngine> {
    let mut engine = MetricsEngine::with_options(build_platform(config), config.engine_options());
    engine
        .initialize()
        .context("Failed to initialize metrics engine")?;
    Ok(engine)
}
