//! # Liveness Probe Model
//!
//! Protocols, probe targets and their outcomes, plus the [`LivenessCheck`]
//! trait that each protocol implementation provides.

use std::fmt;

use async_trait::async_trait;

use crate::error::ProbeFailure;
use crate::scope::domain::NormalizedDomain;

/// A service checked for every host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Protocol {
    /// Plaintext web.
    Http,
    /// Encrypted web, certificates not verified.
    Https,
    /// Remote shell, checked with a bare TCP connect.
    Ssh,
    /// Name resolution only. Used to filter hosts before writing `domains.txt`.
    Resolve,
}

impl Protocol {
    /// The services that get an active set of their own.
    pub const SERVICES: [Protocol; 3] = [Protocol::Http, Protocol::Https, Protocol::Ssh];

    pub fn default_port(self) -> u16 {
        match self {
            Protocol::Http => 80,
            Protocol::Https => 443,
            Protocol::Ssh => 22,
            Protocol::Resolve => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Ssh => "ssh",
            Protocol::Resolve => "dns",
        }
    }

    pub fn output_file(self) -> Option<&'static str> {
        match self {
            Protocol::Http => Some("http.txt"),
            Protocol::Https => Some("https.txt"),
            Protocol::Ssh => Some("ssh.txt"),
            Protocol::Resolve => None,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One host to check with one protocol on one port.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTarget {
    pub host: NormalizedDomain,
    pub protocol: Protocol,
    pub port: u16,
}

impl ProbeTarget {
    pub fn new(host: NormalizedDomain, protocol: Protocol, port: u16) -> Self {
        Self { host, protocol, port }
    }

    /// Target on the protocol's conventional port.
    pub fn with_default_port(host: NormalizedDomain, protocol: Protocol) -> Self {
        let port: u16 = protocol.default_port();
        Self::new(host, protocol, port)
    }

    pub fn uses_default_port(&self) -> bool {
        self.port == self.protocol.default_port()
    }

    /// Line written to the active set: the bare host, or `host:port` when the
    /// port is not the protocol's default.
    pub fn entry(&self) -> String {
        if self.uses_default_port() {
            self.host.to_string()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.protocol {
            Protocol::Resolve => write!(f, "{}", self.host),
            _ => write!(f, "{}:{}", self.host, self.port),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable(ProbeFailure),
}

impl ProbeOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, ProbeOutcome::Reachable)
    }
}

/// The single verdict for one (host, protocol) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub target: ProbeTarget,
    pub outcome: ProbeOutcome,
}

impl ProbeResult {
    pub fn new(target: ProbeTarget, outcome: ProbeOutcome) -> Self {
        Self { target, outcome }
    }

    pub fn is_reachable(&self) -> bool {
        self.outcome.is_reachable()
    }
}

/// Decides whether one target answers on its protocol.
///
/// Implementations never fail: every problem is reported as
/// [`ProbeOutcome::Unreachable`]. The caller bounds the call with its own
/// timeout.
#[async_trait]
pub trait LivenessCheck: Send + Sync {
    fn protocol(&self) -> Protocol;

    async fn check(&self, target: &ProbeTarget) -> ProbeOutcome;
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
