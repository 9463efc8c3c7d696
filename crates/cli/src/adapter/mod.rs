// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Remote sync adapters.
//!
//! An adapter delivers a non-empty batch of pending votes to the remote
//! authority. Delivery is all-or-nothing per call: either the whole batch is
//! acknowledged or the call fails and every vote stays pending.
//!
//! # Implementations
//!
//! - [`SimulatedAdapter`] - variable latency and a small random failure rate
//! - [`WebSocketAdapter`] - JSON batches over a WebSocket to `vq-remote`
//! - [`TimeoutAdapter`] - bounds any adapter's delivery time
//!
//! Adapters may receive a vote more than once (a crash between delivery and
//! marking it synced), so the remote side must store votes idempotently.

mod simulated;
mod timeout;
mod websocket;

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use vq_core::QueueRecord;

pub use simulated::{SimulatedAdapter, SimulationConfig};
pub use timeout::TimeoutAdapter;
pub use websocket::WebSocketAdapter;

/// Error type for remote delivery.
///
/// Transient by nature: the engine reports it and retries later.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncTransportError {
    /// Could not reach the remote.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The remote is temporarily unable to accept votes.
    #[error("{0}")]
    Unavailable(String),

    /// The remote refused the batch.
    #[error("rejected by server: {0}")]
    Rejected(String),

    /// No acknowledgment within the configured limit.
    #[error("delivery timed out after {0:?}")]
    Timeout(Duration),

    /// The remote answered with something unexpected.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// Result type for adapter operations.
pub type AdapterResult<T> = Result<T, SyncTransportError>;

/// Acknowledgment of a delivered batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delivery {
    /// Votes the remote stored for the first time.
    pub accepted: usize,
    /// Votes the remote already held.
    pub duplicates: usize,
}

impl Delivery {
    pub fn accepted(accepted: usize) -> Self {
        Delivery {
            accepted,
            duplicates: 0,
        }
    }

    /// Number of votes covered by the acknowledgment.
    pub fn total(&self) -> usize {
        self.accepted + self.duplicates
    }
}

/// Future returned by [`SyncAdapter::deliver`].
pub type DeliveryFuture<'a> = Pin<Box<dyn Future<Output = AdapterResult<Delivery>> + Send + 'a>>;

/// Transport that delivers pending votes to the remote authority.
///
/// Swappable so tests can inject deterministic outcomes.
pub trait SyncAdapter: Send + Sync {
    /// Deliver a batch of pending votes.
    fn deliver<'a>(&'a self, batch: &'a [QueueRecord]) -> DeliveryFuture<'a>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

impl<A: SyncAdapter + ?Sized> SyncAdapter for Box<A> {
    fn deliver<'a>(&'a self, batch: &'a [QueueRecord]) -> DeliveryFuture<'a> {
        (**self).deliver(batch)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<A: SyncAdapter + ?Sized> SyncAdapter for std::sync::Arc<A> {
    fn deliver<'a>(&'a self, batch: &'a [QueueRecord]) -> DeliveryFuture<'a> {
        (**self).deliver(batch)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
mod simulated_tests;


#[cfg(test)]
mod websocket_tests;
