#![cfg(test)]
use std::fs;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use scopr_common::config::{Config, HostPin};
use scopr_common::error::ScoprError;
use scopr_common::probe::Protocol;
use scopr_core::pipeline::{self, PassSummary, Silent};

use crate::support::{self, Route};

/// A host that serves plain HTTP, black-holes TLS and accepts shell
/// connections shows up in http.txt and ssh.txt only.
#[tokio::test]
async fn probe_sorts_one_host_into_matching_protocols() {
    let dir = tempfile::tempdir().unwrap();
    let input: PathBuf = dir.path().join("domains.txt");
    fs::write(&input, "good.example.com\n").unwrap();

    let mut cfg: Config = support::loopback_config(&["good.example.com"]);
    cfg.ports.http = support::web_server(&[("good.example.com", Route::Status("200 OK"))])
        .await
        .unwrap();
    cfg.ports.https = support::silent_server().await.unwrap();
    cfg.ports.ssh = support::shell_server().await.unwrap();

    let summaries: Vec<PassSummary> = pipeline::probe(&input, dir.path(), &cfg, &mut Silent)
        .await
        .unwrap();

    let protocols: Vec<Protocol> = summaries.iter().map(|summary| summary.protocol).collect();
    assert_eq!(protocols, Protocol::SERVICES.to_vec());

    assert_eq!(
        support::read(&dir.path().join("http.txt")),
        format!("good.example.com:{}\n", cfg.ports.http)
    );
    assert_eq!(support::read(&dir.path().join("https.txt")), "");
    assert_eq!(
        support::read(&dir.path().join("ssh.txt")),
        format!("good.example.com:{}\n", cfg.ports.ssh)
    );
}

/// An untrusted certificate still proves the host is listening on HTTPS.
#[tokio::test]
async fn self_signed_https_host_counts_as_reachable() {
    let dir = tempfile::tempdir().unwrap();
    let input: PathBuf = dir.path().join("domains.txt");
    fs::write(&input, "good.example.com\n").unwrap();

    let mut cfg: Config = support::loopback_config(&["good.example.com"]);
    cfg.timeout = std::time::Duration::from_secs(3);
    cfg.ports.http = support::closed_port().await.unwrap();
    cfg.ports.https = support::tls_server("good.example.com").unwrap();
    cfg.ports.ssh = support::closed_port().await.unwrap();

    let summaries: Vec<PassSummary> = pipeline::probe(&input, dir.path(), &cfg, &mut Silent)
        .await
        .unwrap();

    let https: &PassSummary = summaries
        .iter()
        .find(|summary| summary.protocol == Protocol::Https)
        .unwrap();
    assert_eq!(https.active, 1);

    assert_eq!(support::read(&dir.path().join("http.txt")), "");
    assert_eq!(
        support::read(&dir.path().join("https.txt")),
        format!("good.example.com:{}\n", cfg.ports.https)
    );
    assert_eq!(support::read(&dir.path().join("ssh.txt")), "");
}

#[tokio::test]
async fn http_pass_counts_only_statuses_below_400() {
    let dir = tempfile::tempdir().unwrap();
    let input: PathBuf = dir.path().join("domains.txt");
    fs::write(&input, "ok.example.com\nmoved.example.com\nmissing.example.com\nbroken.example.com\n").unwrap();

    let hosts: [&str; 4] = [
        "ok.example.com",
        "moved.example.com",
        "missing.example.com",
        "broken.example.com",
    ];
    let mut cfg: Config = support::loopback_config(&hosts);
    cfg.ports.http = support::web_server(&[
        ("ok.example.com", Route::Status("200 OK")),
        ("moved.example.com", Route::Status("301 Moved Permanently")),
        ("missing.example.com", Route::Status("404 Not Found")),
        ("broken.example.com", Route::Status("500 Internal Server Error")),
    ])
    .await
    .unwrap();
    cfg.ports.https = support::closed_port().await.unwrap();
    cfg.ports.ssh = support::closed_port().await.unwrap();

    pipeline::probe(&input, dir.path(), &cfg, &mut Silent).await.unwrap();

    let port: u16 = cfg.ports.http;
    assert_eq!(
        support::read(&dir.path().join("http.txt")),
        format!("moved.example.com:{port}\nok.example.com:{port}\n")
    );
    assert_eq!(support::read(&dir.path().join("https.txt")), "");
    assert_eq!(support::read(&dir.path().join("ssh.txt")), "");
}

/// A stalled host and a host with nothing listening do not hold back or
/// change the result of a healthy one.
#[tokio::test]
async fn slow_and_dead_hosts_do_not_affect_others() {
    let dir = tempfile::tempdir().unwrap();
    let input: PathBuf = dir.path().join("domains.txt");
    fs::write(&input, "slow.example.com\ndead.example.com\ngood.example.com\n").unwrap();

    let mut cfg: Config = support::loopback_config(&["slow.example.com", "good.example.com"]);
    cfg.pin(HostPin {
        host: "dead.example.com".to_string(),
        addr: Ipv4Addr::new(127, 0, 0, 2),
    });
    cfg.ports.http = support::web_server(&[
        ("good.example.com", Route::Status("200 OK")),
        ("slow.example.com", Route::Hang),
        ("dead.example.com", Route::Status("200 OK")),
    ])
    .await
    .unwrap();
    cfg.ports.https = support::closed_port().await.unwrap();
    cfg.ports.ssh = support::shell_server().await.unwrap();

    let summaries: Vec<PassSummary> = pipeline::probe(&input, dir.path(), &cfg, &mut Silent)
        .await
        .unwrap();

    assert_eq!(summaries[0].probed, 3);
    assert_eq!(summaries[0].active, 1);
    assert_eq!(
        support::read(&dir.path().join("http.txt")),
        format!("good.example.com:{}\n", cfg.ports.http)
    );

    let ssh: String = support::read(&dir.path().join("ssh.txt"));
    assert!(ssh.contains("good.example.com"));
    assert!(ssh.contains("slow.example.com"));
}

#[tokio::test]
async fn empty_host_list_yields_three_empty_files() {
    let dir = tempfile::tempdir().unwrap();
    let input: PathBuf = dir.path().join("domains.txt");
    fs::write(&input, "").unwrap();
    let out_dir: PathBuf = dir.path().join("results");

    let summaries: Vec<PassSummary> = pipeline::probe(&input, &out_dir, &Config::default(), &mut Silent)
        .await
        .unwrap();

    assert!(summaries.iter().all(|summary| summary.active == 0));
    for file in ["http.txt", "https.txt", "ssh.txt"] {
        assert_eq!(support::read(&out_dir.join(file)), "");
    }
}

#[tokio::test]
async fn missing_host_list_fails_without_writing() {
    let dir = tempfile::tempdir().unwrap();

    let err = pipeline::probe(&dir.path().join("domains.txt"), dir.path(), &Config::default(), &mut Silent)
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ScoprError>(),
        Some(ScoprError::InputUnreadable { .. })
    ));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
