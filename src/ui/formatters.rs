use chrono::{DateTime, Local, Utc};
use colored::*;

use crate::core::metrics::{MetricKind, MetricValue, ResetCause, WifiStatus};
use crate::core::report::{MetricEntry, MetricsReport};

/// Format milliseconds since boot as `1d 02h 03m 04s`
pub fn format_uptime(ms: u64) -> String {
    let secs = ms / 1000;
    let (days, hours, minutes, seconds) = (
        secs / 86_400,
        (secs % 86_400) / 3600,
        (secs % 3600) / 60,
        secs % 60,
    );

    if days > 0 {
        format!("{}d {:02}h {:02}m {:02}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}.{:03}s", seconds, ms % 1000)
    }
}

/// Format a Unix timestamp in local time (YYYY-MM-DD HH:MM:SS)
pub fn format_timestamp(timestamp: i64) -> String {
    match DateTime::<Utc>::from_timestamp(timestamp, 0) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => timestamp.to_string(),
    }
}

/// Plain-text rendering of a metric value, with its unit
pub fn format_value(value: &MetricValue) -> String {
    let unit = value.kind().unit();
    match value {
        MetricValue::CpuUsage(v) => format!("{:.1}{}", v, unit),
        MetricValue::Uptime(ms) => format_uptime(*ms),
        MetricValue::WifiSignal(rssi) => format!("{} {}", rssi, unit),
        MetricValue::WifiStatus(status) => status.to_string(),
        MetricValue::Temperature(t) if t.is_nan() => "n/a".to_string(),
        MetricValue::Temperature(t) => format!("{:.1}{}", t, unit),
        MetricValue::BrownoutCount(n) | MetricValue::ErrorCount(n) => n.to_string(),
        MetricValue::RebootReason(reason) => reason.to_string(),
        MetricValue::WifiDataRate(rate) => format!("{:.1} {}", rate, unit),
        MetricValue::LogLevel(level) => level.to_string(),
    }
}

/// Colored rendering with warning/critical thresholds
pub fn colorize_value(value: &MetricValue) -> ColoredString {
    let text = format_value(value);
    match value {
        MetricValue::CpuUsage(v) if *v >= 90.0 => text.red().bold(),
        MetricValue::CpuUsage(v) if *v >= 75.0 => text.yellow(),
        MetricValue::Temperature(t) if *t >= 90.0 => text.red().bold(),
        MetricValue::Temperature(t) if *t >= 75.0 => text.yellow(),
        MetricValue::WifiSignal(rssi) if *rssi != 0 && *rssi < -80 => text.yellow(),
        MetricValue::WifiStatus(WifiStatus::Connected) => text.green(),
        MetricValue::WifiStatus(_) => text.yellow(),
        MetricValue::BrownoutCount(n) | MetricValue::ErrorCount(n) if *n > 0 => text.red(),
        MetricValue::RebootReason(reason) if reason.cause != Some(ResetCause::PowerOn) => {
            text.yellow()
        }
        _ => text.normal(),
    }
}

fn label(kind: MetricKind) -> ColoredString {
    format!("{:<16}", kind.name().replace('_', " ")).cyan()
}

fn print_entry(entry: &MetricEntry) {
    let value = match &entry.value {
        Some(value) => colorize_value(value).to_string(),
        None => "-".dimmed().to_string(),
    };

    match &entry.error {
        None => println!("  {} {}", label(entry.metric), value),
        Some(err) => println!(
            "  {} {}  {}",
            label(entry.metric),
            value,
            format!("({})", err).dimmed()
        ),
    }
}

/// Print a report as an aligned, colored list
pub fn print_report(report: &MetricsReport) {
    println!(
        "{} {}",
        "DEVICE METRICS".bold().bright_cyan(),
        format!("@ {}", format_timestamp(report.timestamp)).dimmed()
    );
    println!("{}", "=".repeat(60));

    for entry in &report.entries {
        print_entry(entry);
    }
}

/// Single-line rendering for periodic output
pub fn format_report_line(report: &MetricsReport) -> String {
    report
        .entries
        .iter()
        .map(|entry| {
            let value = entry
                .value
                .as_ref()
                .map(format_value)
                .unwrap_or_else(|| "-".to_string());
            format!("{}={}", entry.metric, value)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
