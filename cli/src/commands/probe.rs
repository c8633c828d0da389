use std::path::Path;
use std::time::Duration;

use colored::*;
use scopr_common::{config::Config, success};
use scopr_core::pipeline::{self, PassSummary};

use crate::terminal::{print, report::TerminalReporter};

pub async fn probe(
    input: &Path,
    out_dir: &Path,
    cfg: &Config,
    quiet: u8,
) -> anyhow::Result<Vec<PassSummary>> {
    let mut reporter: TerminalReporter = TerminalReporter::new(quiet);
    let summaries: Vec<PassSummary> = pipeline::probe(input, out_dir, cfg, &mut reporter).await?;

    print_summary(&summaries, quiet);
    Ok(summaries)
}

fn print_summary(summaries: &[PassSummary], quiet: u8) {
    let total_time: Duration = summaries.iter().map(|summary| summary.elapsed).sum();
    let counts: String = summaries
        .iter()
        .map(|summary| format!("{} {}", summary.active.to_string().bold().green(), summary.protocol))
        .collect::<Vec<String>>()
        .join(", ");
    let output: ColoredString =
        format!("Probe Complete: {counts} in {}", print::elapsed_value(total_time)).normal();

    match quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output);
            print::fat_separator();
        }
        _ => success!("{}", output),
    }
}
