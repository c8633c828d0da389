use std::sync::LazyLock;

use regex::Regex;

static TOKEN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\*\.)?(?:[a-zA-Z0-9-]+\.)+[a-zA-Z]{2,}").expect("token shape is a valid regex")
});

/// Finds every domain-shaped substring of `text`.
///
/// Only the shape is checked: an optional `*.` marker, one or more `label.`
/// segments and an alphabetic suffix of at least two letters. Whether a match
/// is a usable hostname is up to the normalizer.
pub fn extract(text: &str) -> impl Iterator<Item = &str> {
    TOKEN_SHAPE.find_iter(text).map(|found| found.as_str())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
