//! Terminal output primitives.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use transformer_compiler::diagnostic::Diagnostic;

pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const MAGENTA: Color = Color::Color256(201);
    pub const NEON_GREEN: Color = Color::Color256(82);
    pub const DIM: Color = Color::Color256(240);
}

pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}"; // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}"; // ◉
    pub const TRIANGLE: &str = "\u{25B8}"; // ▸
    pub const DOT: &str = "\u{00B7}"; // ·
}

fn status(symbol: &str, color: console::Color, msg: impl std::fmt::Display) {
    println!("  {} {}", style(symbol).fg(color), msg);
}

pub fn success(msg: &str) {
    status(symbols::TARGET_FILLED, colors::NEON_GREEN, msg);
}

pub fn info(msg: &str) {
    status(symbols::DIAMOND_OUTLINE, colors::CYAN, msg);
}

/// Secondary detail line.
pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

/// Spinner shown while a package is loaded and analyzed.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("\u{25CE}\u{25C9}\u{25CE}\u{25C9}") // ◎◉◎◉
        .template("  {spinner:.cyan} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(150));
    pb
}

/// Heading printed above a list of rule violations.
pub fn violations_header(count: usize) {
    println!();
    status(
        symbols::DIAMOND,
        colors::MAGENTA,
        style(violations_title(count)).fg(colors::MAGENTA).bold(),
    );
    println!();
}

fn violations_title(count: usize) -> String {
    let noun = if count == 1 { "violation" } else { "violations" };
    format!("{} transformer rule {}", count, noun)
}

pub fn no_violations() {
    status(
        symbols::TARGET_FILLED,
        colors::NEON_GREEN,
        style("No transformer rule violations.").bold(),
    );
}

/// Formats one diagnostic as `location  CODE  message`.
pub fn diagnostic_line(diagnostic: &Diagnostic) -> String {
    format!(
        "{}  {}  {}",
        diagnostic.location,
        diagnostic.code(),
        diagnostic.message()
    )
}

/// Print a diagnostic
pub fn diagnostic(diagnostic: &Diagnostic) {
    println!(
        "  {} {}  {}  {}",
        style(symbols::DIAMOND).fg(colors::MAGENTA),
        style(&diagnostic.location).fg(colors::DIM),
        style(diagnostic.code()).fg(colors::MAGENTA).bold(),
        diagnostic.message()
    );
}

/// Print a transformer function that will be exposed
pub fn transformer_line(name: &str) {
    println!(
        "  {}   {}  {}",
        style(symbols::TRIANGLE).fg(colors::CYAN),
        style("POST").fg(colors::DIM),
        style(format!("/{}", name)).bold()
    );
}

/// Print timing information
pub fn timing(label: &str, duration_ms: u128) {
    status(symbols::DIAMOND_OUTLINE, colors::CYAN, format!("{} in {}ms", label, duration_ms));
}
