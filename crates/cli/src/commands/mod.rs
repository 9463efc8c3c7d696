// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod clear;
pub mod export;
pub mod flush;
pub mod init;
pub mod purge;
pub mod stats;
pub mod submit;
pub mod verify;
pub mod watch;

#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::adapter::{SimulatedAdapter, SyncAdapter, TimeoutAdapter, WebSocketAdapter};
use crate::cli::OutputFormat;
use crate::config::{find_queue_dir, get_db_path, AdapterKind, Config};
use crate::connectivity::probe::{probe_once, target_from_url};
use crate::connectivity::Connectivity;
use crate::engine::QueueEngine;
use crate::error::{Error, Result};
use crate::status::{ChannelObserver, StatusObserver, SyncStatus};
use crate::store::QueueStore;

/// Engine type used by the CLI; the adapter is chosen by configuration.
pub type CliEngine = QueueEngine<Box<dyn SyncAdapter>>;

/// Run a future to completion on a fresh single-threaded runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| Error::Runtime(e.to_string()))?;
    Ok(runtime.block_on(future))
}

/// Helper to open the queue directory and its configuration.
pub fn open_queue() -> Result<(PathBuf, Config)> {
    let queue_dir = find_queue_dir()?;
    let config = Config::load(&queue_dir)?;
    Ok((queue_dir, config))
}

/// Build the adapter selected by `config`, bounded by its delivery timeout.
pub fn build_adapter(config: &Config) -> Box<dyn SyncAdapter> {
    let adapter: Box<dyn SyncAdapter> = match config.adapter {
        AdapterKind::Simulated => {
            let settings = config.simulation.to_simulation_config();
            Box::new(match config.simulation.seed {
                Some(seed) => SimulatedAdapter::with_seed(settings, seed),
                None => SimulatedAdapter::new(settings),
            })
        }
        AdapterKind::Websocket => Box::new(WebSocketAdapter::new(config.remote.url.clone())),
    };

    match config.remote.deliver_timeout() {
        Some(limit) => Box::new(TimeoutAdapter::new(adapter, limit)),
        None => adapter,
    }
}

/// Decide whether the remote is reachable right now.
///
/// The simulated remote is always reachable unless forced offline; a real
/// remote is probed once.
pub async fn initial_reachability(config: &Config, force_offline: bool) -> Result<bool> {
    if force_offline || crate::env::force_offline() {
        return Ok(false);
    }
    match config.adapter {
        AdapterKind::Simulated => Ok(true),
        AdapterKind::Websocket => {
            let target = target_from_url(&config.remote.url).ok_or_else(|| {
                Error::Config(format!("cannot derive host from '{}'", config.remote.url))
            })?;
            Ok(probe_once(&target, config.remote.probe_config().timeout).await)
        }
    }
}

/// Observer for commands that emit no statuses.
pub fn quiet() -> Arc<dyn StatusObserver> {
    Arc::new(|_: &SyncStatus| {})
}

/// Prints each status on stdout as it happens.
struct PrintObserver;

impl StatusObserver for PrintObserver {
    fn on_status(&self, status: &SyncStatus) {
        println!("{}", status);
    }
}

/// Where statuses go for a one-shot command.
///
/// Text output prints them live; JSON output collects them for the final
/// document.
pub fn observer_for(
    output: OutputFormat,
) -> (Arc<dyn StatusObserver>, Option<UnboundedReceiver<SyncStatus>>) {
    match output {
        OutputFormat::Text => (Arc::new(PrintObserver), None),
        OutputFormat::Json => {
            let (observer, rx) = ChannelObserver::new();
            (Arc::new(observer), Some(rx))
        }
    }
}

/// Drain statuses collected by [`observer_for`].
pub fn collected(rx: Option<UnboundedReceiver<SyncStatus>>) -> Vec<SyncStatus> {
    let mut statuses = Vec::new();
    if let Some(mut rx) = rx {
        while let Ok(status) = rx.try_recv() {
            statuses.push(status);
        }
    }
    statuses
}

/// Open the engine for the current queue directory.
pub fn open_engine(
    config: &Config,
    queue_dir: &std::path::Path,
    observer: Arc<dyn StatusObserver>,
    online: bool,
) -> Result<CliEngine> {
    let store = QueueStore::open(&get_db_path(queue_dir))?;
    Ok(QueueEngine::new(
        store,
        build_adapter(config),
        observer,
        Connectivity::new(online),
    ))
}
