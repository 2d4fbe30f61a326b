//! Terminal output
//!
//! Diagnostics go to stderr so stdout only carries the report.

use owo_colors::OwoColorize;
use std::time::Duration;

/// Print a red `✗`-prefixed line to stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a yellow `⚠`-prefixed line to stderr
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// `420ms`, `5.5s` or `2m 5s`
pub fn format_duration(duration: Duration) -> String {
    match duration.as_millis() {
        ms @ 0..1_000 => format!("{ms}ms"),
        1_000..60_000 => format!("{:.1}s", duration.as_secs_f64()),
        _ => {
            let secs = duration.as_secs();
            format!("{}m {}s", secs / 60, secs % 60)
        }
    }
}

/// `1 file`, `3 files`
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    let noun = if count == 1 { singular } else { plural };
    format!("{count} {noun}")
}

/// One matched date, with weekend days marked
pub fn format_date_line(date: &str, is_working_day: bool) -> String {
    if is_working_day {
        date.to_string()
    } else {
        format!("{date} (weekend)")
    }
}

/// The one-line summary of a run
pub fn format_summary(total_days: usize, working_days: usize) -> String {
    format!("You have been in the office on {total_days} day(s) of which {working_days} have been working days.")
}
