pub mod clean;
pub mod probe;
pub mod run;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use scopr_common::{
    config::{Config, DEFAULT_RESOLVE_WORKERS, DEFAULT_WORKERS, HostPin, PortMap},
    scope::domain::Denylist,
};

#[derive(Parser)]
#[command(name = "scopr", version)]
#[command(about = "Turns bug bounty scope listings into live HTTP, HTTPS and SSH targets.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Less output: -q hides banners and per-host lines, -qq keeps only warnings
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show why hosts were rejected or found unreachable
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip the startup banner
    #[arg(long, global = true)]
    pub no_banner: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract, normalize and expand scope entries into a host list
    #[command(alias = "c")]
    Clean(CleanArgs),
    /// Probe a host list for HTTP, HTTPS and SSH
    #[command(alias = "p")]
    Probe(ProbeArgs),
    /// Clean, then probe the freshly written host list
    #[command(alias = "r")]
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    /// Scraped scope listing
    #[arg(short, long, default_value = "programs.json")]
    pub programs: PathBuf,

    /// Where the host list is written
    #[arg(short, long, default_value = "domains.txt")]
    pub output: PathBuf,

    /// Keep only hosts that resolve to an IPv4 address
    #[arg(long)]
    pub resolve: bool,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub network: NetworkArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ProbeArgs {
    /// Host list, one per line
    #[arg(short, long, default_value = "domains.txt")]
    pub input: PathBuf,

    /// Directory for http.txt, https.txt and ssh.txt
    #[arg(short = 'd', long, default_value = ".")]
    pub out_dir: PathBuf,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub network: NetworkArgs,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Scraped scope listing
    #[arg(short, long, default_value = "programs.json")]
    pub programs: PathBuf,

    /// Directory for domains.txt and the per-protocol files
    #[arg(short = 'd', long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Keep only hosts that resolve to an IPv4 address before probing
    #[arg(long)]
    pub resolve: bool,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub network: NetworkArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ScopeArgs {
    /// Extra subdomain label tried for every wildcard (repeatable)
    #[arg(long = "label", value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Extra denylist substring; a leading '^' anchors it to the start (repeatable)
    #[arg(long = "deny", value_name = "PATTERN")]
    pub deny: Vec<String>,

    /// Use only the given denylist entries instead of the built-in ones
    #[arg(long)]
    pub no_default_deny: bool,
}

#[derive(Args, Debug, Clone)]
pub struct NetworkArgs {
    #[arg(long, default_value_t = 80)]
    pub http_port: u16,

    #[arg(long, default_value_t = 443)]
    pub https_port: u16,

    #[arg(long, default_value_t = 22)]
    pub ssh_port: u16,

    /// Seconds before a single check gives up
    #[arg(short, long, default_value_t = 3, value_name = "SECS")]
    pub timeout: u64,

    /// Concurrent service checks
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Concurrent lookups for --resolve
    #[arg(long, default_value_t = DEFAULT_RESOLVE_WORKERS)]
    pub resolve_workers: usize,

    /// Answer lookups of HOST with IPV4 instead of asking DNS (repeatable)
    #[arg(long = "pin", value_name = "HOST=IPV4")]
    pub pins: Vec<HostPin>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Folds the shared flag groups into a single run configuration.
pub fn build_config(scope: &ScopeArgs, network: &NetworkArgs) -> anyhow::Result<Config> {
    let mut cfg: Config = Config {
        timeout: Duration::from_secs(network.timeout.max(1)),
        workers: network.workers,
        resolve_workers: network.resolve_workers,
        ports: PortMap {
            http: network.http_port,
            https: network.https_port,
            ssh: network.ssh_port,
        },
        ..Config::default()
    };

    cfg.labels
        .extend(&scope.labels)
        .context("invalid --label value")?;

    if scope.no_default_deny {
        cfg.denylist = Denylist::new(&scope.deny);
    } else {
        for entry in &scope.deny {
            cfg.denylist.push(entry);
        }
    }

    for pin in &network.pins {
        cfg.pin(pin.clone());
    }

    Ok(cfg)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
