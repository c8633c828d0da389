use indicatif::ProgressStyle;
use scopr_common::probe::Protocol;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

pub fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.blue} {msg:<12} [{bar:32.green/bright_black}] {pos}/{len} {elapsed:.dim}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .tick_strings(TICKS)
    .progress_chars("━╸─")
}

/// A progress bar span sized for one protocol pass. The bar is drawn while
/// the span is entered and removed once it closes.
pub fn pass_span(protocol: Protocol, port: u16, total: usize) -> Span {
    let span: Span = info_span!("pass", indicatif.pb_show = true);
    span.pb_set_length(total as u64);
    let label: String = match port {
        0 => protocol.to_string(),
        _ => format!("{protocol}:{port}"),
    };
    span.pb_set_message(&label);
    span
}
