use colored::{ColoredString, Colorize};

use crate::domain::value_objects::severity::Severity;

#[must_use]
pub fn progress_bar(value: f64, width: usize) -> String {
    let ratio = (value / 100.0).clamp(0.0, 1.0);
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let bar_filled = "█".repeat(filled);
    let bar_empty = "░".repeat(empty);

    let colored_bar = if value >= 90.0 {
        bar_filled.red().bold()
    } else if value >= 70.0 {
        bar_filled.yellow()
    } else {
        bar_filled.green()
    };

    format!("{colored_bar}{bar_empty}")
}

/// Formats a reading with its unit, colored by the alert it raised
/// (green when none).
#[must_use]
pub fn colorize_reading(value: f64, unit: &str, severity: Severity) -> ColoredString {
    let text = format!("{value:.1}{unit}");
    match severity {
        Severity::Critical => text.red().bold(),
        Severity::High => text.red(),
        Severity::Medium => text.yellow(),
        Severity::Low => text.yellow().dimmed(),
        Severity::None => text.green(),
    }
}

#[must_use]
pub fn severity_label(severity: Severity) -> ColoredString {
    let text = format!("[{severity}]");
    match severity {
        Severity::Critical => text.red().bold(),
        Severity::High => text.red(),
        Severity::Medium => text.yellow(),
        Severity::Low => text.yellow().dimmed(),
        Severity::None => text.green(),
    }
}

pub fn print_section_header(title: &str) {
    println!("{}", title.bold().cyan());
    let display_width = title.chars().count();
    println!("{}", "─".repeat(display_width).cyan());
}
