//! # Liveness Prober
//!
//! Fans a batch of [`ProbeTarget`]s out over a fixed-size worker pool.
//!
//! Every target is submitted up front; a semaphore caps how many checks run at
//! once. Each check runs in its own task under the configured timeout, so a
//! slow, failing or panicking check only ever affects its own result. Results
//! flow through a channel into a single collecting loop, in completion order.

use std::sync::Arc;
use std::time::Duration;

use scopr_common::{
    config::Config,
    error::ProbeFailure,
    probe::{LivenessCheck, ProbeOutcome, ProbeResult, ProbeTarget},
    warn,
};
use tokio::sync::{Semaphore, mpsc};
use tokio::time::timeout;

#[derive(Debug, Clone, Copy)]
pub struct Prober {
    workers: usize,
    timeout: Duration,
}

impl Prober {
    pub fn new(workers: usize, timeout: Duration) -> Self {
        Self {
            workers: workers.max(1),
            timeout,
        }
    }

    /// Pool sized for service probes.
    pub fn for_services(cfg: &Config) -> Self {
        Self::new(cfg.workers, cfg.timeout)
    }

    /// Pool sized for the resolve-only filter.
    pub fn for_resolution(cfg: &Config) -> Self {
        Self::new(cfg.resolve_workers, cfg.timeout)
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Checks every target and returns exactly one result per target.
    ///
    /// `on_result` sees each result as it is collected.
    pub async fn probe<F>(
        &self,
        check: Arc<dyn LivenessCheck>,
        targets: Vec<ProbeTarget>,
        mut on_result: F,
    ) -> Vec<ProbeResult>
    where
        F: FnMut(&ProbeResult),
    {
        let permits: Arc<Semaphore> = Arc::new(Semaphore::new(self.workers));
        let (tx, mut rx) = mpsc::unbounded_channel::<ProbeResult>();
        let total: usize = targets.len();

        for target in targets {
            let permits: Arc<Semaphore> = permits.clone();
            let check: Arc<dyn LivenessCheck> = check.clone();
            let tx = tx.clone();
            let probe_timeout: Duration = self.timeout;

            tokio::spawn(async move {
                let outcome: ProbeOutcome = match permits.acquire_owned().await {
                    Ok(_permit) => run_isolated(check, &target, probe_timeout).await,
                    Err(e) => ProbeOutcome::Unreachable(ProbeFailure::TaskFailed(e.to_string())),
                };
                let _ = tx.send(ProbeResult::new(target, outcome));
            });
        }
        drop(tx);

        let mut results: Vec<ProbeResult> = Vec::with_capacity(total);
        while let Some(result) = rx.recv().await {
            on_result(&result);
            results.push(result);
        }
        results
    }
}

/// Runs one check in its own task so a panic stays at the task boundary.
async fn run_isolated(
    check: Arc<dyn LivenessCheck>,
    target: &ProbeTarget,
    probe_timeout: Duration,
) -> ProbeOutcome {
    let task_target: ProbeTarget = target.clone();
    let handle = tokio::spawn(async move { timeout(probe_timeout, check.check(&task_target)).await });

    match handle.await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(_elapsed)) => ProbeOutcome::Unreachable(ProbeFailure::Timeout(probe_timeout)),
        Err(e) => {
            warn!("{} probe of {target} failed: {e}", target.protocol);
            ProbeOutcome::Unreachable(ProbeFailure::TaskFailed(e.to_string()))
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
