// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Background task reacting to reachability changes.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::adapter::SyncAdapter;
use crate::engine::QueueEngine;
use crate::error::{Error, Result};
use crate::status::SyncStatus;

/// Options for [`ConnectivityMonitor::register`].
#[derive(Debug, Clone, Default)]
pub struct MonitorOptions {
    /// While online with pending votes, flush this often. `None` disables it.
    pub retry_interval: Option<Duration>,
}

/// Watches a reachability source on behalf of one engine.
pub struct ConnectivityMonitor;

impl ConnectivityMonitor {
    /// Spawn the monitor task for `engine`.
    ///
    /// On a transition to online the engine is marked online, `reconnected`
    /// is emitted and a flush runs. On a transition to offline the engine is
    /// marked offline and `went-offline` is emitted. Repeated values are
    /// ignored. The task ends when the handle is stopped or dropped, or when
    /// the source's sender goes away.
    ///
    /// An engine has at most one monitor at a time; registering a second one
    /// fails with [`Error::MonitorRegistered`] until the first has ended.
    pub fn register<A>(
        engine: QueueEngine<A>,
        source: watch::Receiver<bool>,
        options: MonitorOptions,
    ) -> Result<MonitorHandle>
    where
        A: SyncAdapter + 'static,
    {
        if !engine.claim_monitor() {
            return Err(Error::MonitorRegistered);
        }
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run(engine, source, options, cancel.clone()));
        Ok(MonitorHandle {
            cancel,
            task: Some(task),
        })
    }
}

/// Deregistration handle for a running monitor.
///
/// Dropping the handle stops the monitor. Flushes already started still run
/// to completion; `stop` waits for them.
pub struct MonitorHandle {
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Stop the monitor and wait for its task to finish.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("connectivity monitor ended abnormally: {}", e);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        match &self.task {
            Some(task) => task.is_finished(),
            None => true,
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn retry_timer(interval: Duration) -> Interval {
    let mut timer = tokio::time::interval_at(Instant::now() + interval, interval);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// Resolves on the next retry tick, or never if retries are disabled.
async fn next_retry(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn run<A>(
    engine: QueueEngine<A>,
    mut source: watch::Receiver<bool>,
    options: MonitorOptions,
    cancel: CancellationToken,
) where
    A: SyncAdapter + 'static,
{
    // Flushes run beside the loop so reachability changes are never held up
    // by a slow delivery. The engine serializes them.
    let mut flushes = JoinSet::new();

    let initial = *source.borrow_and_update();
    if apply(&engine, initial) {
        spawn_flush(&mut flushes, &engine);
    }

    let mut retry = options
        .retry_interval
        .filter(|d| !d.is_zero())
        .map(retry_timer);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            changed = source.changed() => {
                if changed.is_err() {
                    tracing::debug!("connectivity source closed");
                    break;
                }
                let online = *source.borrow_and_update();
                if apply(&engine, online) {
                    spawn_flush(&mut flushes, &engine);
                }
            }
            _ = next_retry(&mut retry) => {
                // A flush still running will pick up whatever is pending
                if !engine.is_online() || !flushes.is_empty() {
                    continue;
                }
                match engine.pending_count().await {
                    Ok(0) => {}
                    Ok(pending) => {
                        tracing::debug!(pending, "periodic retry");
                        spawn_flush(&mut flushes, &engine);
                    }
                    // flush reports the storage failure itself
                    Err(_) => spawn_flush(&mut flushes, &engine),
                }
            }
            Some(done) = flushes.join_next(), if !flushes.is_empty() => {
                if let Err(e) = done {
                    tracing::warn!("flush task ended abnormally: {}", e);
                }
            }
        }
    }

    while let Some(done) = flushes.join_next().await {
        if let Err(e) = done {
            tracing::warn!("flush task ended abnormally: {}", e);
        }
    }
    engine.release_monitor();
}

fn spawn_flush<A>(flushes: &mut JoinSet<()>, engine: &QueueEngine<A>)
where
    A: SyncAdapter + 'static,
{
    let engine = engine.clone();
    flushes.spawn(async move {
        engine.flush().await;
    });
}

/// Record a reachability value, acting only on an actual transition.
///
/// Returns true when the engine just came online and should flush.
fn apply<A: SyncAdapter>(engine: &QueueEngine<A>, online: bool) -> bool {
    let was_online = engine.connectivity().set_online(online);
    if was_online == online {
        return false;
    }

    if online {
        tracing::info!("remote reachable");
        engine.emit(SyncStatus::Reconnected);
    } else {
        tracing::info!("remote unreachable");
        engine.emit(SyncStatus::WentOffline);
    }
    online
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
