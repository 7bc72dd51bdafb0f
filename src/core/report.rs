//! Periodic reporting over the metric registry.
//!
//! A report walks a list of [`MetricKind`]s through the engine's generic
//! dispatch and records, for each one, the value and any error. Reports are
//! handed to the caller; nothing is kept or transmitted here.

use serde::Serialize;

use crate::core::metrics::{MetricKind, MetricValue, MetricsEngine};
use crate::error::{MetricsError, Result};

/// Outcome of a single metric within a report
#[derive(Debug, Clone, Serialize)]
pub struct MetricEntry {
    pub metric: MetricKind,
    /// Live value, or the fallback substituted on a soft failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<MetricValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MetricEntry {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// One pass over the requested metrics
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Unix timestamp of the host, when one is available
    pub timestamp: i64,
    pub engine_version: &'static str,
    pub entries: Vec<MetricEntry>,
}

impl MetricsReport {
    pub fn entry(&self, kind: MetricKind) -> Option<&MetricEntry> {
        self.entries.iter().find(|e| e.metric == kind)
    }

    pub fn error_count(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_ok()).count()
    }
}

/// Read every metric in `kinds`, in order.
///
/// Per-metric failures are recorded in the entry. Hard failures, such as an
/// uninitialized engine, abort the whole report.
pub fn collect_report(engine: &mut MetricsEngine, kinds: &[MetricKind]) -> Result<MetricsReport> {
    if !engine.is_initialized() {
        return Err(MetricsError::not_initialized());
    }

    let mut entries = Vec::with_capacity(kinds.len());

    for &kind in kinds {
        let entry = match engine.metric(kind) {
            Ok(reading) => MetricEntry {
                metric: kind,
                value: Some(reading.value),
                error: reading.error.map(|e| e.to_string()),
            },
            Err(e) if e.is_hard() => return Err(e),
            Err(e) => {
                log::debug!("Metric {} failed: {}", kind, e);
                MetricEntry {
                    metric: kind,
                    value: None,
                    error: Some(e.to_string()),
                }
            }
        };
        entries.push(entry);
    }

    Ok(MetricsReport {
        timestamp: chrono::Utc::now().timestamp(),
        engine_version: MetricsEngine::version(),
        entries,
    })
}
