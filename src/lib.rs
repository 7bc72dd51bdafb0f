// mcu-metrics library - public API

pub mod error;
pub use error::{MetricsError, PlatformError, Result};

pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

pub use crate::core::config::Config;
pub use crate::core::metrics::{MetricKind, MetricValue, MetricsEngine, Reading};

/// Initialize logging; `RUST_LOG` overrides the default `info` level
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
