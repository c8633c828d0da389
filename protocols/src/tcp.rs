use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use scopr_common::{
    config::Config,
    error::ProbeFailure,
    probe::{LivenessCheck, ProbeOutcome, ProbeTarget, Protocol},
};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use crate::dns;

/// Reachable iff a TCP handshake to the target port completes.
///
/// No bytes are exchanged; the stream is dropped as soon as it connects.
/// When a host resolves to several addresses they are dialed in order and
/// share one timeout budget, so a black-holed first address still leaves
/// time for the rest.
pub struct TcpConnectCheck {
    protocol: Protocol,
    timeout: Duration,
    pins: HashMap<String, Ipv4Addr>,
}

impl TcpConnectCheck {
    pub fn new(protocol: Protocol, cfg: &Config) -> Self {
        Self {
            protocol,
            timeout: cfg.timeout,
            pins: cfg.pins.clone(),
        }
    }
}

#[async_trait]
impl LivenessCheck for TcpConnectCheck {
    fn protocol(&self) -> Protocol {
        self.protocol
    }

    async fn check(&self, target: &ProbeTarget) -> ProbeOutcome {
        let addrs: Vec<SocketAddr> =
            match dns::resolve_ipv4(target.host.as_str(), target.port, &self.pins).await {
                Ok(addrs) => addrs,
                Err(failure) => return ProbeOutcome::Unreachable(failure),
            };

        match connect_any(&addrs, self.timeout).await {
            Ok(addr) => {
                trace!("{} handshake with {addr} completed", self.protocol);
                ProbeOutcome::Reachable
            }
            Err(failure) => ProbeOutcome::Unreachable(failure),
        }
    }
}

/// Splits `budget` evenly over `count` attempts.
fn per_attempt(budget: Duration, count: usize) -> Duration {
    let count: u32 = u32::try_from(count.max(1)).unwrap_or(u32::MAX);
    budget / count
}

/// Dials `addrs` in order until one accepts, spending at most `budget`.
async fn connect_any(addrs: &[SocketAddr], budget: Duration) -> Result<SocketAddr, ProbeFailure> {
    let slice: Duration = per_attempt(budget, addrs.len());

    let mut last_failure: ProbeFailure = ProbeFailure::Unresolved;
    for addr in addrs {
        match handshake(*addr, slice).await {
            Ok(()) => return Ok(*addr),
            Err(failure) => {
                trace!("handshake with {addr} failed: {failure}");
                last_failure = failure;
            }
        }
    }
    Err(last_failure)
}

async fn handshake(addr: SocketAddr, probe_timeout: Duration) -> Result<(), ProbeFailure> {
    match timeout(probe_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_stream)) => Ok(()),
        Ok(Err(e)) => Err(ProbeFailure::Connection(e.to_string())),
        Err(_elapsed) => Err(ProbeFailure::Timeout(probe_timeout)),
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
