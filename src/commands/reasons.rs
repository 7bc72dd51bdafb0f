use anyhow::Result;
use colored::*;

use crate::core::metrics::{ResetCause, UNKNOWN_REASON_LABEL};

/// Print the reset-cause label table
pub fn execute() -> Result<()> {
    println!("{}", "RESET CAUSES".bold().bright_cyan());
    println!("{}", "=".repeat(40));

    for cause in ResetCause::ALL {
        println!("  {:>3}  {}", cause.code().to_string().cyan(), cause.label());
    }

    println!(
        "  {:>3}  {}",
        "*".dimmed(),
        UNKNOWN_REASON_LABEL.dimmed()
    );
    Ok(())
}
