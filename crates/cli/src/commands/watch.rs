// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Long-running watcher: keeps the queue draining while this process lives.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::{get_lock_path, AdapterKind, Config};
use crate::connectivity::probe::{spawn_tcp_probe, target_from_url};
use crate::connectivity::{ConnectivityMonitor, MonitorOptions};
use crate::error::{Error, Result};
use crate::logging::setup_logging;
use crate::status::LogObserver;

use super::{open_engine, open_queue};

pub fn run(retry_secs: Option<u64>) -> Result<()> {
    let (queue_dir, config) = open_queue()?;

    // Held until return; one watcher per queue directory
    let _lock = acquire_lock(&queue_dir)?;

    setup_logging();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Runtime(e.to_string()))?;
    runtime.block_on(watch_queue(queue_dir, config, retry_secs))
}

/// Take the watcher lock for `queue_dir`.
///
/// Only lock contention means another watcher; any other failure is an I/O
/// error.
fn acquire_lock(queue_dir: &Path) -> Result<fs::File> {
    use fs2::FileExt;

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(get_lock_path(queue_dir))?;
    match file.try_lock_exclusive() {
        Ok(()) => Ok(file),
        Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
            Err(Error::WatcherRunning(queue_dir.display().to_string()))
        }
        Err(e) => Err(Error::Io(e)),
    }
}

/// `--retry-secs` overrides the config; 0 disables retries.
pub(crate) fn retry_interval(retry_secs: Option<u64>, config: &Config) -> Option<Duration> {
    match retry_secs {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => config.remote.retry_interval(),
    }
}

/// Reachability feed for the configured adapter.
///
/// The simulated remote never goes away, so its feed is constant. The task
/// returned keeps the feed's sender alive until `cancel` fires.
async fn reachability_source(
    config: &Config,
    force_offline: bool,
    cancel: CancellationToken,
) -> Result<(watch::Receiver<bool>, JoinHandle<()>)> {
    if force_offline || config.adapter == AdapterKind::Simulated {
        let (tx, rx) = watch::channel(!force_offline);
        let task = tokio::spawn(async move {
            cancel.cancelled().await;
            drop(tx);
        });
        return Ok((rx, task));
    }

    let target = target_from_url(&config.remote.url)
        .ok_or_else(|| Error::Config(format!("cannot derive host from '{}'", config.remote.url)))?;
    Ok(spawn_tcp_probe(target, config.remote.probe_config(), cancel).await)
}

async fn watch_queue(queue_dir: PathBuf, config: Config, retry_secs: Option<u64>) -> Result<()> {
    let cancel = CancellationToken::new();
    let (source, feed) = reachability_source(&config, crate::env::force_offline(), cancel.clone()).await?;
    let online = *source.borrow();

    let engine = open_engine(&config, &queue_dir, Arc::new(LogObserver), online)?;
    let retry_interval = retry_interval(retry_secs, &config);
    tracing::info!(
        adapter = engine.adapter().name(),
        online,
        retry_secs = retry_interval.map(|d| d.as_secs()),
        "watching {}",
        queue_dir.display()
    );

    // Drain whatever accumulated while nobody was watching
    if online {
        engine.flush().await;
    }

    let monitor = ConnectivityMonitor::register(
        engine.clone(),
        source,
        MonitorOptions { retry_interval },
    )?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");

    monitor.stop().await;
    cancel.cancel();
    if let Err(e) = feed.await {
        tracing::warn!("reachability feed ended abnormally: {}", e);
    }

    match engine.pending_count().await {
        Ok(0) => {}
        Ok(pending) => tracing::info!(pending, "votes still queued"),
        Err(e) => tracing::warn!("could not count pending votes: {}", e),
    }
    Ok(())
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
