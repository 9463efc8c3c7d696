// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Status updates published by the queue engine and connectivity monitor.
//!
//! Observers are invoked synchronously, in emission order, and never while
//! the store is locked. An observer may therefore read queue stats from
//! another task without deadlocking the engine.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A state transition of the vote queue.
///
/// Consumers should ignore kinds they do not recognize; deserializing an
/// unknown `type` yields [`SyncStatus::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SyncStatus {
    /// A vote was durably stored.
    Queued { code: String },
    /// A vote was stored while offline; no delivery was attempted.
    QueuedOffline { code: String },
    /// A flush started delivering `count` pending votes.
    Syncing { count: usize },
    /// The remote accepted `count` votes and they were marked synced.
    Synced { count: usize },
    /// A flush failed; its votes stay pending for the next attempt.
    SyncFailed {
        error: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        count: Option<usize>,
    },
    /// Connectivity came back.
    Reconnected,
    /// Connectivity was lost.
    WentOffline,
    #[serde(other)]
    Unknown,
}

impl SyncStatus {
    /// Wire name of the status kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SyncStatus::Queued { .. } => "queued",
            SyncStatus::QueuedOffline { .. } => "queued-offline",
            SyncStatus::Syncing { .. } => "syncing",
            SyncStatus::Synced { .. } => "synced",
            SyncStatus::SyncFailed { .. } => "sync-failed",
            SyncStatus::Reconnected => "reconnected",
            SyncStatus::WentOffline => "went-offline",
            SyncStatus::Unknown => "unknown",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SyncStatus::SyncFailed { .. })
    }
}

fn votes(count: usize) -> &'static str {
    if count == 1 {
        "vote"
    } else {
        "votes"
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStatus::Queued { code } => write!(f, "vote {code} stored locally"),
            SyncStatus::QueuedOffline { code } => {
                write!(f, "offline: vote {code} queued until connectivity returns")
            }
            SyncStatus::Syncing { count } => write!(f, "syncing {count} {}", votes(*count)),
            SyncStatus::Synced { count } => {
                write!(f, "synced {count} {} to the server", votes(*count))
            }
            SyncStatus::SyncFailed {
                error,
                count: Some(count),
            } => write!(
                f,
                "sync failed for {count} {}: {error} (will retry)",
                votes(*count)
            ),
            SyncStatus::SyncFailed { error, count: None } => {
                write!(f, "sync failed: {error} (will retry)")
            }
            SyncStatus::Reconnected => write!(f, "connection restored"),
            SyncStatus::WentOffline => write!(f, "connection lost, votes will be queued"),
            SyncStatus::Unknown => write!(f, "unknown status"),
        }
    }
}

/// Receives status updates.
pub trait StatusObserver: Send + Sync {
    fn on_status(&self, status: &SyncStatus);
}

impl<F> StatusObserver for F
where
    F: Fn(&SyncStatus) + Send + Sync,
{
    fn on_status(&self, status: &SyncStatus) {
        self(status)
    }
}

/// Forwards statuses into an unbounded channel, preserving emission order.
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<SyncStatus>,
}

impl ChannelObserver {
    /// Create the observer and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SyncStatus>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ChannelObserver { tx }, rx)
    }
}

impl StatusObserver for ChannelObserver {
    fn on_status(&self, status: &SyncStatus) {
        // A dropped receiver just means nobody is listening anymore.
        let _ = self.tx.send(status.clone());
    }
}

/// Records every status as a tracing event.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl StatusObserver for LogObserver {
    fn on_status(&self, status: &SyncStatus) {
        if status.is_failure() {
            tracing::warn!(kind = status.kind(), "{}", status);
        } else {
            tracing::info!(kind = status.kind(), "{}", status);
        }
    }
}

/// Delivers each status to several observers in registration order.
#[derive(Default, Clone)]
pub struct FanOut {
    observers: Vec<Arc<dyn StatusObserver>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: impl StatusObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }
}

impl StatusObserver for FanOut {
    fn on_status(&self, status: &SyncStatus) {
        for observer in &self.observers {
            observer.on_status(status);
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
