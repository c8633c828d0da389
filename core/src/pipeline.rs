//! # Pipeline
//!
//! The two batch phases of a run:
//!
//! 1. **clean**: `programs.json` → candidates → expanded hosts → (optional
//!    resolve filter) → `domains.txt`.
//! 2. **probe**: `domains.txt` → one pass per service → `http.txt`,
//!    `https.txt`, `ssh.txt`.
//!
//! Passes run one after the other and each writes its file as soon as it
//! completes, so an interrupted run keeps every finished protocol's output.
//! Progress is reported through a [`Reporter`] so the terminal layer stays
//! out of this crate.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use scopr_common::{
    config::Config,
    probe::{LivenessCheck, ProbeResult, ProbeTarget, Protocol},
    scope::{
        domain::{Candidate, NormalizedDomain},
        record::{self, ScopeBook},
    },
};

use crate::aggregator::{self, ActiveSet};
use crate::hosts;
use crate::prober::Prober;

/// Receives progress events. Every method defaults to doing nothing.
pub trait Reporter {
    fn pass_started(&mut self, _protocol: Protocol, _port: u16, _total: usize) {}
    fn probe_finished(&mut self, _result: &ProbeResult) {}
    fn pass_finished(&mut self, _summary: &PassSummary) {}
}

/// A reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent {}

#[derive(Debug, Clone)]
pub struct CleanSummary {
    pub programs: usize,
    pub candidates: usize,
    pub wildcards: usize,
    pub expanded: usize,
    pub written: usize,
    pub output: PathBuf,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct PassSummary {
    pub protocol: Protocol,
    pub port: u16,
    pub probed: usize,
    pub active: usize,
    pub output: Option<PathBuf>,
    pub elapsed: Duration,
}

/// Runs the clean phase and writes `output`.
///
/// With `resolve` set, only hosts that resolve to an IPv4 address are kept.
pub async fn clean(
    programs: &Path,
    output: &Path,
    resolve: bool,
    cfg: &Config,
    reporter: &mut dyn Reporter,
) -> anyhow::Result<CleanSummary> {
    let start: Instant = Instant::now();
    let book: ScopeBook = ScopeBook::load(programs)?;

    let candidates: BTreeSet<Candidate> = hosts::candidates_from_book(&book, &cfg.normalizer());
    let wildcards: usize = candidates.iter().filter(|c| c.is_wildcard()).count();
    let expanded: BTreeSet<NormalizedDomain> = hosts::expand_all(&candidates, &cfg.expander());

    let kept: Vec<String> = if resolve {
        let check: Arc<dyn LivenessCheck> = scopr_protocols::check_for(Protocol::Resolve, cfg)?;
        let prober: Prober = Prober::for_resolution(cfg);
        let summary: (ActiveSet, PassSummary) =
            run_pass(&prober, check, &expanded, Protocol::Resolve.default_port(), reporter).await;
        reporter.pass_finished(&summary.1);
        summary.0.entries().map(str::to_string).collect()
    } else {
        expanded.iter().map(NormalizedDomain::to_string).collect()
    };

    ensure_parent(output)?;
    aggregator::write_lines(output, &kept)?;

    Ok(CleanSummary {
        programs: book.len(),
        candidates: candidates.len(),
        wildcards,
        expanded: expanded.len(),
        written: kept.len(),
        output: output.to_path_buf(),
        elapsed: start.elapsed(),
    })
}

/// Runs the probe phase over the host list at `input`, writing one file per
/// service into `out_dir`.
pub async fn probe(
    input: &Path,
    out_dir: &Path,
    cfg: &Config,
    reporter: &mut dyn Reporter,
) -> anyhow::Result<Vec<PassSummary>> {
    let lines: Vec<String> = record::read_host_lines(input)?;
    let hosts: BTreeSet<NormalizedDomain> = hosts::hosts_from_lines(&lines, cfg);

    let mut checks: Vec<Arc<dyn LivenessCheck>> = Vec::with_capacity(Protocol::SERVICES.len());
    for protocol in Protocol::SERVICES {
        checks.push(scopr_protocols::check_for(protocol, cfg)?);
    }

    probe_hosts(&hosts, checks, out_dir, cfg, reporter).await
}

/// Probes `hosts` with each check in turn and persists each active set
/// before starting the next pass.
pub async fn probe_hosts(
    hosts: &BTreeSet<NormalizedDomain>,
    checks: Vec<Arc<dyn LivenessCheck>>,
    out_dir: &Path,
    cfg: &Config,
    reporter: &mut dyn Reporter,
) -> anyhow::Result<Vec<PassSummary>> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory '{}'", out_dir.display()))?;

    let prober: Prober = Prober::for_services(cfg);
    let mut summaries: Vec<PassSummary> = Vec::with_capacity(checks.len());

    for check in checks {
        let port: u16 = cfg.ports.port_for(check.protocol());
        let (active, mut summary) = run_pass(&prober, check, hosts, port, reporter).await;

        summary.output = Some(active.write_to_dir(out_dir)?);
        reporter.pass_finished(&summary);
        summaries.push(summary);
    }

    Ok(summaries)
}

async fn run_pass(
    prober: &Prober,
    check: Arc<dyn LivenessCheck>,
    hosts: &BTreeSet<NormalizedDomain>,
    port: u16,
    reporter: &mut dyn Reporter,
) -> (ActiveSet, PassSummary) {
    let start: Instant = Instant::now();
    let protocol: Protocol = check.protocol();
    let targets: Vec<ProbeTarget> = hosts
        .iter()
        .map(|host| ProbeTarget::new(host.clone(), protocol, port))
        .collect();
    let probed: usize = targets.len();

    reporter.pass_started(protocol, port, probed);

    let mut active: ActiveSet = ActiveSet::new(protocol);
    prober
        .probe(check, targets, |result| {
            active.insert(result);
            reporter.probe_finished(result);
        })
        .await;

    let summary: PassSummary = PassSummary {
        protocol,
        port,
        probed,
        active: active.len(),
        output: None,
        elapsed: start.elapsed(),
    };
    (active, summary)
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory '{}'", parent.display()))?;
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
