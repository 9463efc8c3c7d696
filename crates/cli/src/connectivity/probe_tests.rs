// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tokio::net::TcpListener;
use yare::parameterized;

#[parameterized(
    explicit_port = { "ws://127.0.0.1:7890", Some("127.0.0.1:7890") },
    ws_default = { "ws://votes.example.org/", Some("votes.example.org:80") },
    wss_default = { "wss://votes.example.org", Some("votes.example.org:443") },
    with_path = { "ws://localhost:9000/sync", Some("localhost:9000") },
    unknown_scheme = { "ftp://votes.example.org", None },
    no_host = { "not a url", None },
)]
fn target_from_url_cases(url: &str, expected: Option<&str>) {
    assert_eq!(target_from_url(url).as_deref(), expected);
}

#[tokio::test]
async fn probe_once_reports_listener() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    assert!(probe_once(&addr, Duration::from_secs(1)).await);

    drop(listener);
    assert!(!probe_once(&addr, Duration::from_secs(1)).await);
}

#[tokio::test]
async fn probe_publishes_loss_of_reachability() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let config = ProbeConfig {
        interval: Duration::from_millis(20),
        timeout: Duration::from_millis(500),
    };
    let cancel = CancellationToken::new();
    let (mut rx, task) = spawn_tcp_probe(addr, config, cancel.clone()).await;
    assert!(*rx.borrow_and_update());

    drop(listener);
    tokio::time::timeout(Duration::from_secs(5), rx.changed())
        .await
        .expect("no change within 5s")
        .unwrap();
    assert!(!*rx.borrow());

    cancel.cancel();
    task.await.unwrap();
}

#[tokio::test]
async fn probe_stops_when_receivers_drop() {
    let config = ProbeConfig {
        interval: Duration::from_millis(10),
        timeout: Duration::from_millis(100),
    };
    let (rx, task) =
        spawn_tcp_probe("127.0.0.1:1".to_string(), config, CancellationToken::new()).await;
    drop(rx);
    tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("probe task kept running")
        .unwrap();
}
