use std::path::PathBuf;

use scopr_common::{config::Config, info};

use crate::commands::{CleanArgs, RunArgs, clean, probe};
use crate::terminal::print;

/// Cleans into `<out_dir>/domains.txt`, then probes that list.
pub async fn run(args: &RunArgs, cfg: &Config, quiet: u8) -> anyhow::Result<()> {
    let domains: PathBuf = args.out_dir.join("domains.txt");
    let clean_args: CleanArgs = CleanArgs {
        programs: args.programs.clone(),
        output: domains.clone(),
        resolve: args.resolve,
        scope: args.scope.clone(),
        network: args.network.clone(),
    };

    clean::clean(&clean_args, cfg, quiet).await?;

    print::header("starting probes", quiet);
    info!("probing hosts listed in {}", domains.display());
    probe::probe(&domains, &args.out_dir, cfg, quiet).await?;
    Ok(())
}
