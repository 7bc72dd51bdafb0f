// UI and formatting module

pub mod formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{
    colorize_value, format_report_line, format_timestamp, format_uptime, format_value,
    print_report,
};
