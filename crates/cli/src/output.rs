//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use gpuscope_lib::aggregate::PhaseCounts;
use gpuscope_lib::models::PriorityBand;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Color a priority band
pub fn color_priority_band(band: PriorityBand) -> String {
    let name = band.as_str();
    match band {
        PriorityBand::System => name.magenta().to_string(),
        PriorityBand::High => name.yellow().to_string(),
        PriorityBand::Normal => name.to_string(),
    }
}

/// Compact running/pending/failed phase summary, e.g. "3/1/0"
pub fn format_phase_counts(counts: &PhaseCounts) -> String {
    format!("{}/{}/{}", counts.running, counts.pending, counts.failed)
}

/// Color a whole-percent utilization value by load level
pub fn color_utilization(pct: u64) -> String {
    let formatted = format!("{}%", pct);
    if pct >= 90 {
        formatted.red().to_string()
    } else if pct >= 70 {
        formatted.yellow().to_string()
    } else {
        formatted.green().to_string()
    }
}

/// Apply the utilization color to an arbitrary string (used for the bar)
pub fn colorize_by_utilization(text: &str, pct: u64) -> String {
    if pct >= 90 {
        text.red().to_string()
    } else if pct >= 70 {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}
