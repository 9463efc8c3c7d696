// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for adapter and engine tests.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use vq_core::{QueueRecord, VotePayload};

use super::{AdapterResult, Delivery, DeliveryFuture, SyncAdapter, SyncTransportError};

/// Create a pending record with the given id, enqueued `secs` after a fixed epoch.
pub fn make_record(id: &str, secs: i64) -> QueueRecord {
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap() + chrono::Duration::seconds(secs);
    QueueRecord::new(id, make_payload("e-2026", at), at)
}

/// Create a payload for `election_id` with one selection.
pub fn make_payload(election_id: &str, cast_at: chrono::DateTime<Utc>) -> VotePayload {
    let mut selections = BTreeMap::new();
    selections.insert("B1".to_string(), "A2".to_string());
    VotePayload::new(election_id, "Board Election", selections, cast_at)
}

/// Adapter with scripted outcomes that records every batch it sees.
///
/// Outcomes pushed with [`MockAdapter::push_outcome`] are consumed first;
/// afterwards each call succeeds unless [`MockAdapter::set_failing`] is on.
#[derive(Default)]
pub struct MockAdapter {
    scripted: Mutex<VecDeque<AdapterResult<()>>>,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// An adapter whose every call fails with `Unavailable`.
    pub fn failing() -> Self {
        let adapter = Self::default();
        adapter.set_failing(true);
        adapter
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn push_outcome(&self, outcome: AdapterResult<()>) {
        self.scripted.lock().unwrap().push_back(outcome);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Ids of each delivered batch, in call order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_outcome(&self) -> AdapterResult<()> {
        if let Some(outcome) = self.scripted.lock().unwrap().pop_front() {
            return outcome;
        }
        if self.failing.load(Ordering::SeqCst) {
            Err(SyncTransportError::Unavailable("mock outage".to_string()))
        } else {
            Ok(())
        }
    }
}

impl SyncAdapter for MockAdapter {
    fn deliver<'a>(&'a self, batch: &'a [QueueRecord]) -> DeliveryFuture<'a> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push(batch.iter().map(|r| r.id.clone()).collect());
            let delay = *self.delay.lock().unwrap();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.next_outcome().map(|()| Delivery::accepted(batch.len()))
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
