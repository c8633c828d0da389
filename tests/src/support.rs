#![cfg(test)]
//! Loopback fixtures standing in for remote services.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use scopr_common::config::{Config, HostPin};
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::{ServerConfig, ServerConnection, StreamOwned};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// How the web fixture answers a given `Host`.
#[derive(Debug, Clone, Copy)]
pub enum Route {
    Status(&'static str),
    Hang,
}

/// Serves one canned response per virtual host. Unknown hosts get a 404.
pub async fn web_server(routes: &[(&str, Route)]) -> anyhow::Result<u16> {
    let listener: TcpListener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let port: u16 = listener.local_addr()?.port();
    let routes: HashMap<String, Route> = routes
        .iter()
        .map(|(host, route)| (host.to_string(), *route))
        .collect();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let routes: HashMap<String, Route> = routes.clone();
            tokio::spawn(async move {
                let _ = answer(stream, &routes).await;
            });
        }
    });

    Ok(port)
}

async fn answer(mut stream: TcpStream, routes: &HashMap<String, Route>) -> anyhow::Result<()> {
    let mut request: Vec<u8> = Vec::new();
    let mut buf: [u8; 1024] = [0; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n: usize = stream.read(&mut buf).await?;
        if n == 0 {
            return Ok(());
        }
        request.extend_from_slice(&buf[..n]);
    }

    let request: String = String::from_utf8_lossy(&request).to_lowercase();
    let host: &str = request
        .lines()
        .find_map(|line| line.strip_prefix("host:"))
        .map(|value| value.trim().split(':').next().unwrap_or_default())
        .unwrap_or_default();

    match routes.get(host).copied().unwrap_or(Route::Status("404 Not Found")) {
        Route::Hang => {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        Route::Status(status) => {
            let response: String = format!(
                "HTTP/1.1 {status}\r\nLocation: /elsewhere\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            );
            stream.write_all(response.as_bytes()).await?;
            stream.shutdown().await?;
        }
    }
    Ok(())
}

/// Accepts connections and never says a word, like a TLS port behind a
/// black hole.
pub async fn silent_server() -> anyhow::Result<u16> {
    let listener: TcpListener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let port: u16 = listener.local_addr()?.port();

    tokio::spawn(async move {
        let mut held: Vec<TcpStream> = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });

    Ok(port)
}

/// Answers `200 OK` over TLS with a freshly minted self-signed certificate
/// for `host`, the kind no client would trust by default.
pub fn tls_server(host: &str) -> anyhow::Result<u16> {
    let cert: rcgen::Certificate = rcgen::generate_simple_self_signed(vec![host.to_string()])?;
    let chain: Vec<CertificateDer<'static>> = vec![CertificateDer::from(cert.serialize_der()?)];
    let key: PrivateKeyDer<'static> =
        PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(cert.serialize_private_key_der()));

    let tls: Arc<ServerConfig> = Arc::new(
        ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
            .with_safe_default_protocol_versions()?
            .with_no_client_auth()
            .with_single_cert(chain, key)?,
    );

    let listener: std::net::TcpListener = std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0))?;
    let port: u16 = listener.local_addr()?.port();

    std::thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let tls: Arc<ServerConfig> = Arc::clone(&tls);
            std::thread::spawn(move || {
                let _ = answer_tls(stream, tls);
            });
        }
    });

    Ok(port)
}

fn answer_tls(tcp: std::net::TcpStream, tls: Arc<ServerConfig>) -> anyhow::Result<()> {
    tcp.set_read_timeout(Some(Duration::from_secs(5)))?;
    let mut stream: StreamOwned<ServerConnection, std::net::TcpStream> =
        StreamOwned::new(ServerConnection::new(tls)?, tcp);

    let mut request: Vec<u8> = Vec::new();
    let mut buf: [u8; 1024] = [0; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n: usize = stream.read(&mut buf)?;
        if n == 0 {
            return Ok(());
        }
        request.extend_from_slice(&buf[..n]);
    }

    stream.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n")?;
    stream.conn.send_close_notify();
    stream.flush()?;
    Ok(())
}

/// Accepts and immediately drops connections. A TCP handshake is all the
/// shell check needs.
pub async fn shell_server() -> anyhow::Result<u16> {
    let listener: TcpListener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let port: u16 = listener.local_addr()?.port();

    tokio::spawn(async move { while listener.accept().await.is_ok() {} });

    Ok(port)
}

/// A loopback port with nothing listening on it.
pub async fn closed_port() -> anyhow::Result<u16> {
    let listener: TcpListener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    drop(listener);
    Ok(addr.port())
}

/// Short timeouts and every given host pinned to loopback.
pub fn loopback_config(hosts: &[&str]) -> Config {
    let mut cfg: Config = Config {
        timeout: Duration::from_millis(500),
        ..Config::default()
    };
    for host in hosts {
        cfg.pin(HostPin {
            host: host.to_string(),
            addr: Ipv4Addr::LOCALHOST,
        });
    }
    cfg
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}
