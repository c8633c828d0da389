#![cfg(test)]
use std::fs;
use std::path::PathBuf;

use scopr_common::config::Config;
use scopr_common::scope::wildcard::DEFAULT_LABELS;
use scopr_core::pipeline::{self, CleanSummary, Silent};

use crate::support;

fn write_programs(dir: &std::path::Path, json: &str) -> PathBuf {
    let path: PathBuf = dir.join("programs.json");
    fs::write(&path, json).unwrap();
    path
}

#[tokio::test]
async fn clean_expands_wildcards_and_drops_denylisted_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let programs: PathBuf = write_programs(
        dir.path(),
        r#"{
            "example": {
                "wildcards": ["https://*.Example.COM/path?x=1"],
                "notes": ["Mobile SDK at node.js-android-sdk.example.org is out of scope"]
            }
        }"#,
    );
    let output: PathBuf = dir.path().join("domains.txt");

    let summary: CleanSummary = pipeline::clean(&programs, &output, false, &Config::default(), &mut Silent)
        .await
        .unwrap();
    let written: String = support::read(&output);
    let lines: Vec<&str> = written.lines().collect();

    assert_eq!(summary.wildcards, 1);
    assert_eq!(lines.len(), DEFAULT_LABELS.len() + 1);
    assert!(lines.contains(&"example.com"));
    for label in DEFAULT_LABELS {
        assert!(lines.contains(&format!("{label}.example.com").as_str()));
    }
    assert!(lines.iter().all(|line| *line == line.to_lowercase()));
    assert!(!written.contains("https"));
    assert!(!written.contains('/'));
    assert!(!written.contains("example.org"));
}

#[tokio::test]
async fn clean_output_feeds_the_probe_phase() {
    let dir = tempfile::tempdir().unwrap();
    let programs: PathBuf = write_programs(
        dir.path(),
        r#"{ "acme": { "domains": ["Good.Example.com", "good.example.com:8443"] } }"#,
    );
    let domains: PathBuf = dir.path().join("domains.txt");

    let mut cfg: Config = support::loopback_config(&["good.example.com"]);
    cfg.ports.http = support::closed_port().await.unwrap();
    cfg.ports.https = support::closed_port().await.unwrap();
    cfg.ports.ssh = support::shell_server().await.unwrap();

    pipeline::clean(&programs, &domains, false, &cfg, &mut Silent).await.unwrap();
    assert_eq!(support::read(&domains), "good.example.com\n");

    pipeline::probe(&domains, dir.path(), &cfg, &mut Silent).await.unwrap();
    assert_eq!(
        support::read(&dir.path().join("ssh.txt")),
        format!("good.example.com:{}\n", cfg.ports.ssh)
    );
    assert_eq!(support::read(&dir.path().join("http.txt")), "");
}

#[tokio::test]
async fn resolve_filter_keeps_only_resolvable_hosts() {
    let dir = tempfile::tempdir().unwrap();
    let programs: PathBuf = write_programs(
        dir.path(),
        r#"{ "acme": { "domains": ["good.example.com", "ghost.invalid"] } }"#,
    );
    let output: PathBuf = dir.path().join("domains.txt");
    let cfg: Config = support::loopback_config(&["good.example.com"]);

    let summary: CleanSummary = pipeline::clean(&programs, &output, true, &cfg, &mut Silent)
        .await
        .unwrap();

    assert_eq!(summary.expanded, 2);
    assert_eq!(summary.written, 1);
    assert_eq!(support::read(&output), "good.example.com\n");
}

#[tokio::test]
async fn malformed_programs_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let programs: PathBuf = write_programs(dir.path(), "{ not json");
    let output: PathBuf = dir.path().join("domains.txt");

    let result = pipeline::clean(&programs, &output, false, &Config::default(), &mut Silent).await;

    assert!(result.is_err());
    assert!(!output.exists());
}
