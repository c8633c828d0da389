//! Web liveness over plaintext and encrypted HTTP.
//!
//! A host is reachable when it answers a `GET /` with a status below 400.
//! Redirects are not followed, so a 3xx is itself the positive signal.
//! Certificates are never verified: the question is whether something
//! answers, not whether it can be trusted.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, redirect};
use scopr_common::{
    config::Config,
    error::ProbeFailure,
    probe::{LivenessCheck, ProbeOutcome, ProbeTarget, Protocol},
};
use tracing::trace;

const USER_AGENT: &str = concat!("scopr/", env!("CARGO_PKG_VERSION"));

pub struct HttpCheck {
    protocol: Protocol,
    client: Client,
    timeout: Duration,
}

impl HttpCheck {
    pub fn new(protocol: Protocol, cfg: &Config) -> anyhow::Result<Self> {
        anyhow::ensure!(
            matches!(protocol, Protocol::Http | Protocol::Https),
            "{protocol} is not a web protocol"
        );

        let mut builder: ClientBuilder = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(cfg.timeout)
            .connect_timeout(cfg.timeout)
            .redirect(redirect::Policy::none())
            .local_address(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            .pool_max_idle_per_host(0);

        if protocol == Protocol::Https {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Port 0 keeps the port from the request URL.
        for (host, addr) in &cfg.pins {
            builder = builder.resolve(host, SocketAddr::new(IpAddr::V4(*addr), 0));
        }

        let client: Client = builder
            .build()
            .with_context(|| format!("building {protocol} client"))?;

        Ok(Self {
            protocol,
            client,
            timeout: cfg.timeout,
        })
    }

    fn url(&self, target: &ProbeTarget) -> String {
        format!("{}://{}:{}/", self.protocol.name(), target.host, target.port)
    }
}

#[async_trait]
impl LivenessCheck for HttpCheck {
    fn protocol(&self) -> Protocol {
        self.protocol
    }

    async fn check(&self, target: &ProbeTarget) -> ProbeOutcome {
        let url: String = self.url(target);
        trace!("GET {url}");
        match self.client.get(&url).send().await {
            Ok(response) => classify_status(response.status().as_u16()),
            Err(e) if e.is_timeout() => ProbeOutcome::Unreachable(ProbeFailure::Timeout(self.timeout)),
            Err(e) => ProbeOutcome::Unreachable(ProbeFailure::Connection(e.to_string())),
        }
    }
}

fn classify_status(status: u16) -> ProbeOutcome {
    if status < 400 {
        ProbeOutcome::Reachable
    } else {
        ProbeOutcome::Unreachable(ProbeFailure::Status(status))
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
