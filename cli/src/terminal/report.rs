use colored::*;
use scopr_common::{
    probe::{ProbeOutcome, ProbeResult, Protocol},
    success,
};
use scopr_core::pipeline::{PassSummary, Reporter};
use tracing::span::EnteredSpan;
use tracing::debug;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::{colors, print, progress};

/// Drives a progress bar per pass and logs each host as it comes up.
pub struct TerminalReporter {
    quiet: u8,
    pass: Option<EnteredSpan>,
}

impl TerminalReporter {
    pub fn new(quiet: u8) -> Self {
        Self { quiet, pass: None }
    }
}

impl Reporter for TerminalReporter {
    fn pass_started(&mut self, protocol: Protocol, port: u16, total: usize) {
        self.pass = None;
        print::header(&format!("{protocol} pass"), self.quiet);
        self.pass = Some(progress::pass_span(protocol, port, total).entered());
    }

    fn probe_finished(&mut self, result: &ProbeResult) {
        if let Some(span) = &self.pass {
            span.pb_inc(1);
        }

        match &result.outcome {
            ProbeOutcome::Reachable if self.quiet == 0 => {
                let target: ColoredString = result.target.to_string().color(colors::HOST);
                match result.target.protocol {
                    Protocol::Resolve => success!("{target} resolves"),
                    _ => success!("{target} is active"),
                }
            }
            ProbeOutcome::Reachable => {}
            ProbeOutcome::Unreachable(failure) => debug!("{} ({}): {failure}", result.target, result.target.protocol),
        }
    }

    fn pass_finished(&mut self, summary: &PassSummary) {
        self.pass = None;

        let active: ColoredString = format!("{}/{}", summary.active, summary.probed).bold().green();
        if self.quiet > 0 {
            success!(
                "{}: {active} hosts active in {}",
                summary.protocol,
                print::elapsed_value(summary.elapsed)
            );
            return;
        }

        print::aligned_line("Protocol", summary.protocol.to_string().color(colors::ACCENT));
        if summary.port != 0 {
            print::aligned_line("Port", summary.port.to_string().color(colors::PORT));
        }
        print::aligned_line("Active", active);
        if let Some(output) = &summary.output {
            print::aligned_line("Written to", print::path_value(output));
        }
        print::aligned_line("Elapsed", print::elapsed_value(summary.elapsed));
    }
}
