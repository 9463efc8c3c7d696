// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use vq_core::QueueRecord;

use super::{DeliveryFuture, SyncAdapter, SyncTransportError};

/// Fails a delivery that takes longer than `limit`.
///
/// A timed-out batch is treated like any other failure: it stays pending,
/// and the remote may still have stored it, which redelivery tolerates.
pub struct TimeoutAdapter<A> {
    inner: A,
    limit: Duration,
}

impl<A: SyncAdapter> TimeoutAdapter<A> {
    pub fn new(inner: A, limit: Duration) -> Self {
        TimeoutAdapter { inner, limit }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<A: SyncAdapter> SyncAdapter for TimeoutAdapter<A> {
    fn deliver<'a>(&'a self, batch: &'a [QueueRecord]) -> DeliveryFuture<'a> {
        Box::pin(async move {
            match tokio::time::timeout(self.limit, self.inner.deliver(batch)).await {
                Ok(result) => result,
                Err(_) => Err(SyncTransportError::Timeout(self.limit)),
            }
        })
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
