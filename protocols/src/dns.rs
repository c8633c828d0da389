use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use async_trait::async_trait;
use scopr_common::{
    config::Config,
    error::ProbeFailure,
    probe::{LivenessCheck, ProbeOutcome, ProbeTarget, Protocol},
};
use tokio::net::lookup_host;

/// Resolves `host` to IPv4 socket addresses, honoring pins first.
pub async fn resolve_ipv4(
    host: &str,
    port: u16,
    pins: &HashMap<String, Ipv4Addr>,
) -> Result<Vec<SocketAddr>, ProbeFailure> {
    if let Some(addr) = pins.get(host) {
        return Ok(vec![SocketAddr::new(IpAddr::V4(*addr), port)]);
    }

    let addrs: Vec<SocketAddr> = lookup_host((host, port))
        .await
        .map_err(|_| ProbeFailure::Unresolved)?
        .filter(SocketAddr::is_ipv4)
        .collect();

    if addrs.is_empty() {
        return Err(ProbeFailure::Unresolved);
    }
    Ok(addrs)
}

/// Reachable iff the host resolves to at least one IPv4 address.
pub struct ResolveCheck {
    pins: HashMap<String, Ipv4Addr>,
}

impl ResolveCheck {
    pub fn new(cfg: &Config) -> Self {
        Self {
            pins: cfg.pins.clone(),
        }
    }
}

#[async_trait]
impl LivenessCheck for ResolveCheck {
    fn protocol(&self) -> Protocol {
        Protocol::Resolve
    }

    async fn check(&self, target: &ProbeTarget) -> ProbeOutcome {
        match resolve_ipv4(target.host.as_str(), target.port, &self.pins).await {
            Ok(_) => ProbeOutcome::Reachable,
            Err(failure) => ProbeOutcome::Unreachable(failure),
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
