//! Test doubles shared by the core unit tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use scopr_common::{
    error::ProbeFailure,
    probe::{LivenessCheck, ProbeOutcome, ProbeTarget, Protocol},
    scope::domain::{Candidate, NormalizedDomain, Normalizer},
};

pub fn host(name: &str) -> NormalizedDomain {
    match Normalizer::default().normalize(name) {
        Some(Candidate::Domain(domain)) => domain,
        other => panic!("{name} did not normalize to a domain: {other:?}"),
    }
}

/// A check whose behavior per host is scripted up front.
///
/// Hosts are reachable unless listed as down, stalled or panicking.
pub struct ScriptedCheck {
    protocol: Protocol,
    down: HashSet<String>,
    stalled: HashSet<String>,
    panicking: HashSet<String>,
    delay: Duration,
    in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl ScriptedCheck {
    pub fn new(protocol: Protocol) -> Self {
        Self {
            protocol,
            down: HashSet::new(),
            stalled: HashSet::new(),
            panicking: HashSet::new(),
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn down(mut self, host: &str) -> Self {
        self.down.insert(host.to_string());
        self
    }

    pub fn stall(mut self, host: &str) -> Self {
        self.stalled.insert(host.to_string());
        self
    }

    pub fn panic_on(mut self, host: &str) -> Self {
        self.panicking.insert(host.to_string());
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl LivenessCheck for ScriptedCheck {
    fn protocol(&self) -> Protocol {
        self.protocol
    }

    async fn check(&self, target: &ProbeTarget) -> ProbeOutcome {
        let now: usize = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let host: &str = target.host.as_str();
        if self.stalled.contains(host) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        if self.panicking.contains(host) {
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            panic!("scripted failure for {host}");
        }
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.down.contains(host) {
            ProbeOutcome::Unreachable(ProbeFailure::Connection("connection refused".to_string()))
        } else {
            ProbeOutcome::Reachable
        }
    }
}
