mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, build_config, clean, probe, run};
use scopr_common::{config::Config, error};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.quiet, commands.verbose);
    print::banner(commands.no_banner, commands.quiet);

    match dispatch(commands.command, commands.quiet).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(command: Commands, quiet: u8) -> anyhow::Result<()> {
    match command {
        Commands::Clean(args) => {
            let cfg: Config = build_config(&args.scope, &args.network)?;
            print::header("cleaning scope", quiet);
            clean::clean(&args, &cfg, quiet).await?;
            Ok(())
        }
        Commands::Probe(args) => {
            let cfg: Config = build_config(&args.scope, &args.network)?;
            print::header("getting ready to probe", quiet);
            probe::probe(&args.input, &args.out_dir, &cfg, quiet).await?;
            Ok(())
        }
        Commands::Run(args) => {
            let cfg: Config = build_config(&args.scope, &args.network)?;
            print::header("cleaning scope", quiet);
            run::run(&args, &cfg, quiet).await
        }
    }
}
