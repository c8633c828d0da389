use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::time::Duration;

use crate::probe::Protocol;
use crate::scope::domain::{Denylist, Normalizer};
use crate::scope::wildcard::{Expander, LabelDictionary};

/// Per-check bound for requests and connection attempts.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);
/// Worker pool size for service probes.
pub const DEFAULT_WORKERS: usize = 20;
/// Worker pool size for the cheaper resolve-only filter.
pub const DEFAULT_RESOLVE_WORKERS: usize = 100;

/// Effective port per service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMap {
    pub http: u16,
    pub https: u16,
    pub ssh: u16,
}

impl PortMap {
    pub fn port_for(&self, protocol: Protocol) -> u16 {
        match protocol {
            Protocol::Http => self.http,
            Protocol::Https => self.https,
            Protocol::Ssh => self.ssh,
            Protocol::Resolve => protocol.default_port(),
        }
    }
}

impl Default for PortMap {
    fn default() -> Self {
        Self {
            http: Protocol::Http.default_port(),
            https: Protocol::Https.default_port(),
            ssh: Protocol::Ssh.default_port(),
        }
    }
}

/// `host=address`: answer every lookup of `host` with `address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPin {
    pub host: String,
    pub addr: Ipv4Addr,
}

impl FromStr for HostPin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((host, addr)) = s.split_once('=') else {
            return Err(format!("invalid pin '{s}': expected HOST=IPV4"));
        };

        let host: String = host.trim().to_lowercase();
        if host.is_empty() {
            return Err(format!("invalid pin '{s}': host is empty"));
        }

        let addr: Ipv4Addr = addr
            .trim()
            .parse::<Ipv4Addr>()
            .map_err(|e| format!("invalid pin address '{}': {e}", addr.trim()))?;

        Ok(HostPin { host, addr })
    }
}

/// Everything the pipeline needs, built once by the CLI and passed down by
/// reference.
#[derive(Debug, Clone)]
pub struct Config {
    pub timeout: Duration,
    pub workers: usize,
    pub resolve_workers: usize,
    pub ports: PortMap,
    pub labels: LabelDictionary,
    pub denylist: Denylist,
    pub pins: HashMap<String, Ipv4Addr>,
}

impl Config {
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.denylist.clone())
    }

    pub fn expander(&self) -> Expander<'_> {
        Expander::new(&self.labels)
    }

    pub fn pin(&mut self, pin: HostPin) {
        self.pins.insert(pin.host, pin.addr);
    }

    pub fn pinned(&self, host: &str) -> Option<Ipv4Addr> {
        self.pins.get(host).copied()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            workers: DEFAULT_WORKERS,
            resolve_workers: DEFAULT_RESOLVE_WORKERS,
            ports: PortMap::default(),
            labels: LabelDictionary::default(),
            denylist: Denylist::default(),
            pins: HashMap::new(),
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
