use std::path::Path;
use std::time::Duration;

use colored::*;
use unicode_width::UnicodeWidthStr;

use crate::terminal::{banner, colors};

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 14;

/// Writes `msg` as is. Goes through `tracing` so it never tears a progress bar.
pub fn print(msg: &str) {
    tracing::info!(target: "scopr::print", raw_msg = msg);
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let title: String = format!("⟦ SCOPR v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&framed(&title.bright_green().bold().to_string(), '═'));
    banner::print();
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    print(&framed(&title.bright_green().to_string(), '─'));
}

/// Heavy rule across the full width; closes a summary block.
pub fn fat_separator() {
    print(&rule('═', TOTAL_WIDTH));
}

/// `key......: value`, keys padded to a common width.
pub fn aligned_line(key: &str, value: ColoredString) {
    let line: String = format!(
        "{} {} {}",
        ">".color(colors::SEPARATOR),
        dotted_key(key),
        value
    );
    print(&line);
}

pub fn centerln(msg: &str) {
    let pad: String = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{pad}{msg}"));
}

pub fn path_value(path: &Path) -> ColoredString {
    path.display().to_string().color(colors::PATH)
}

pub fn elapsed_value(elapsed: Duration) -> ColoredString {
    format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow()
}

fn rule(fill: char, width: usize) -> String {
    fill.to_string().repeat(width).color(colors::SEPARATOR).to_string()
}

/// Centers an already styled `title` between two runs of `fill`.
fn framed(title: &str, fill: char) -> String {
    let bare: String = console::strip_ansi_codes(title).into_owned();
    let width: usize = UnicodeWidthStr::width(bare.as_str());
    let remaining: usize = TOTAL_WIDTH.saturating_sub(width);
    let left: usize = remaining / 2;
    format!("{}{}{}", rule(fill, left), title, rule(fill, remaining - left))
}

fn dotted_key(key: &str) -> String {
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.len()));
    format!(
        "{}{}{}",
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
