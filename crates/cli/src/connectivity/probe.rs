// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! TCP reachability probe.
//!
//! Reachability is "a TCP connection to the remote authority succeeds
//! within the timeout". The result is published on a `watch` channel that
//! a [`ConnectivityMonitor`](super::ConnectivityMonitor) consumes.

use std::time::Duration;

use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::http::Uri;
use tokio_util::sync::CancellationToken;

/// Probe timing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        ProbeConfig {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(2),
        }
    }
}

/// Derive the `host:port` to probe from a `ws://` or `wss://` URL.
pub fn target_from_url(url: &str) -> Option<String> {
    let uri: Uri = url.parse().ok()?;
    let host = uri.host()?;
    let port = match uri.port_u16() {
        Some(port) => port,
        None => match uri.scheme_str()? {
            "ws" | "http" => 80,
            "wss" | "https" => 443,
            _ => return None,
        },
    };
    Some(format!("{host}:{port}"))
}

/// Attempt one connection to `target`.
pub async fn probe_once(target: &str, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect(target)).await,
        Ok(Ok(_))
    )
}

/// Probe `target` now, then every `config.interval`, publishing changes.
///
/// The returned receiver starts with the first probe's result. The task
/// stops when `cancel` fires or every receiver is dropped.
pub async fn spawn_tcp_probe(
    target: String,
    config: ProbeConfig,
    cancel: CancellationToken,
) -> (watch::Receiver<bool>, JoinHandle<()>) {
    let initial = probe_once(&target, config.timeout).await;
    tracing::debug!(target = %target, reachable = initial, "initial probe");
    let (tx, rx) = watch::channel(initial);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(config.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick is immediate and the initial probe already ran
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tx.closed() => break,
                _ = ticker.tick() => {
                    let reachable = probe_once(&target, config.timeout).await;
                    tx.send_if_modified(|current| {
                        if *current == reachable {
                            false
                        } else {
                            tracing::debug!(target = %target, reachable, "reachability changed");
                            *current = reachable;
                            true
                        }
                    });
                }
            }
        }
    });

    (rx, task)
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
