use std::io::Write;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

fn print_status(style: Style, label: &str, message: &str) {
    let _ = writeln!(std::io::stderr(), "{:>12} {message}", style.apply_to(label));
}

/// Report a step of the run on stderr, e.g. `  Collecting prisma from /app/node_modules`.
///
/// The label is right-aligned to 12 columns in bold green.
pub fn status(label: &str, message: &str) {
    print_status(Style::new().green().bold(), label, message);
}

/// Report a finding that needs no action (bold cyan label).
pub fn status_info(label: &str, message: &str) {
    print_status(Style::new().cyan().bold(), label, message);
}

/// Report a suspicious input that does not stop the run (bold yellow label).
pub fn status_warn(label: &str, message: &str) {
    print_status(Style::new().yellow().bold(), label, message);
}

/// Create a progress bar with the given length and message for determinate progress.
///
/// The bar draws to stderr and stays hidden when stderr is not a terminal.
pub fn progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    if let Ok(style) =
        ProgressStyle::default_bar().template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
    {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.set_message(message.to_string());
    pb
}
