use colored::*;
use tracing::info;

pub const TOTAL_WIDTH: usize = 48;

pub fn header(msg: &str, quiet: bool) {
    if quiet {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    info!("{line}");
}

pub fn summary(msg: &str, quiet: bool) {
    if quiet {
        return;
    }
    info!("{}", msg.bright_black());
}

/// Results go to stdout, alone on their line, so scripts can capture them.
pub fn result(value: &str) {
    println!("{value}");
}
