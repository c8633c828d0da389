//! # scopr protocols
//!
//! Concrete [`LivenessCheck`] implementations, one per protocol:
//!
//! * [`http::HttpCheck`]: plaintext and encrypted web (status < 400).
//! * [`tcp::TcpConnectCheck`]: remote shell (TCP handshake only).
//! * [`dns::ResolveCheck`]: name resolution only.

use std::sync::Arc;

use scopr_common::config::Config;
use scopr_common::probe::{LivenessCheck, Protocol};

pub mod dns;
pub mod http;
pub mod tcp;

/// Builds the check used for `protocol` under `cfg`.
pub fn check_for(protocol: Protocol, cfg: &Config) -> anyhow::Result<Arc<dyn LivenessCheck>> {
    let check: Arc<dyn LivenessCheck> = match protocol {
        Protocol::Http | Protocol::Https => Arc::new(http::HttpCheck::new(protocol, cfg)?),
        Protocol::Ssh => Arc::new(tcp::TcpConnectCheck::new(protocol, cfg)),
        Protocol::Resolve => Arc::new(dns::ResolveCheck::new(cfg)),
    };
    Ok(check)
}
