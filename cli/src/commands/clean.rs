use colored::*;
use scopr_common::{config::Config, success};
use scopr_core::pipeline::{self, CleanSummary};

use crate::commands::CleanArgs;
use crate::terminal::{colors, print, report::TerminalReporter};

pub async fn clean(args: &CleanArgs, cfg: &Config, quiet: u8) -> anyhow::Result<CleanSummary> {
    let mut reporter: TerminalReporter = TerminalReporter::new(quiet);
    let summary: CleanSummary =
        pipeline::clean(&args.programs, &args.output, args.resolve, cfg, &mut reporter).await?;

    print_summary(&summary, quiet);
    Ok(summary)
}

fn print_summary(summary: &CleanSummary, quiet: u8) {
    let written: ColoredString = format!("{} hosts", summary.written).bold().green();

    if quiet > 0 {
        success!(
            "Clean complete: {written} written to {} in {}",
            print::path_value(&summary.output),
            print::elapsed_value(summary.elapsed)
        );
        return;
    }

    print::header("scope cleaned", quiet);
    print::aligned_line("Programs", summary.programs.to_string().color(colors::ACCENT));
    print::aligned_line("Candidates", summary.candidates.to_string().color(colors::ACCENT));
    print::aligned_line("Wildcards", summary.wildcards.to_string().color(colors::ACCENT));
    print::aligned_line("Expanded", summary.expanded.to_string().color(colors::ACCENT));
    print::aligned_line("Written", written);
    print::aligned_line("Output", print::path_value(&summary.output));
    print::aligned_line("Elapsed", print::elapsed_value(summary.elapsed));
}
