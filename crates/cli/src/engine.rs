// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The offline-first vote queue.
//!
//! Every vote is written to the durable store before any network attempt.
//! Delivery is best effort: failures are reported through the status
//! observer and the vote stays pending until a later flush succeeds.
//!
//! ```text
//! enqueue ─► put ─► queued ─┬─ offline ─► queued-offline
//!                           └─ online ──► flush
//!
//! flush ─► get_unsynced ─┬─ empty ─► (nothing)
//!                        └─ syncing ─► deliver ─┬─ ok ──► mark_synced ─► synced
//!                                               └─ err ─► sync-failed
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::Mutex as AsyncMutex;
use vq_core::{Error, QueueRecord, QueueStats, ReceiptCode, Result, VotePayload};

use crate::adapter::SyncAdapter;
use crate::connectivity::Connectivity;
use crate::status::{StatusObserver, SyncStatus};
use crate::store::QueueStore;

/// Fresh receipt codes drawn before giving up on a collision.
const MAX_CODE_ATTEMPTS: usize = 8;

/// Result of a flush. Never an error: failures are statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FlushOutcome {
    /// Nothing was pending.
    Idle,
    /// The remote accepted `count` votes.
    Synced { count: usize },
    /// Delivery failed; the votes stay pending.
    ///
    /// `count` is absent when the pending set could not be read.
    Failed {
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<usize>,
        error: String,
    },
}

impl FlushOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FlushOutcome::Failed { .. })
    }
}

/// What happened after a vote was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    /// Offline: no delivery was attempted.
    QueuedOffline,
    /// Online: a flush ran.
    Attempted(FlushOutcome),
}

struct Inner<A> {
    store: QueueStore,
    adapter: A,
    observer: Arc<dyn StatusObserver>,
    connectivity: Connectivity,
    /// Serializes flushes so a pending vote is in at most one delivery.
    flush_lock: AsyncMutex<()>,
    /// Set while a connectivity monitor is attached.
    monitored: AtomicBool,
}

/// Handle to the vote queue. Clones share the same store and state.
pub struct QueueEngine<A> {
    inner: Arc<Inner<A>>,
}

impl<A> Clone for QueueEngine<A> {
    fn clone(&self) -> Self {
        QueueEngine {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: SyncAdapter> QueueEngine<A> {
    pub fn new(
        store: QueueStore,
        adapter: A,
        observer: Arc<dyn StatusObserver>,
        connectivity: Connectivity,
    ) -> Self {
        QueueEngine {
            inner: Arc::new(Inner {
                store,
                adapter,
                observer,
                connectivity,
                flush_lock: AsyncMutex::new(()),
                monitored: AtomicBool::new(false),
            }),
        }
    }

    pub fn connectivity(&self) -> &Connectivity {
        &self.inner.connectivity
    }

    pub fn is_online(&self) -> bool {
        self.inner.connectivity.is_online()
    }

    pub fn adapter(&self) -> &A {
        &self.inner.adapter
    }

    pub(crate) fn emit(&self, status: SyncStatus) {
        self.inner.observer.on_status(&status);
    }

    /// Mark a monitor as attached. False if one already is.
    pub(crate) fn claim_monitor(&self) -> bool {
        self.inner
            .monitored
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn release_monitor(&self) {
        self.inner.monitored.store(false, Ordering::Release);
    }

    /// Durably store a vote, then try to deliver pending votes if online.
    ///
    /// Returns once the vote is persisted. A storage failure is returned
    /// and no status is emitted for the vote; delivery failures are not
    /// errors.
    pub async fn enqueue(&self, record: QueueRecord) -> Result<EnqueueOutcome> {
        if record.id.trim().is_empty() {
            return Err(Error::InvalidInput("record id cannot be empty".to_string()));
        }

        let code = record.id.clone();
        self.inner.store.put(record).await?;
        tracing::debug!(code = %code, "vote stored");
        self.emit(SyncStatus::Queued { code: code.clone() });

        if !self.is_online() {
            self.emit(SyncStatus::QueuedOffline { code });
            return Ok(EnqueueOutcome::QueuedOffline);
        }

        Ok(EnqueueOutcome::Attempted(self.flush().await))
    }

    /// Build a record for `payload` with a fresh receipt code and enqueue it.
    pub async fn submit_vote(&self, payload: VotePayload) -> Result<(QueueRecord, EnqueueOutcome)> {
        let code = self.fresh_code(&payload).await?;
        let record = QueueRecord::new(code.to_string(), payload, Utc::now());
        let outcome = self.enqueue(record.clone()).await?;
        Ok((record, outcome))
    }

    async fn fresh_code(&self, payload: &VotePayload) -> Result<ReceiptCode> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = ReceiptCode::generate(&payload.election_id, &payload.cast_at);
            if self.inner.store.get(code.to_string()).await?.is_none() {
                return Ok(code);
            }
            tracing::debug!(code = %code, "receipt code collision, drawing another");
        }
        Err(Error::InvalidInput(
            "could not draw an unused receipt code".to_string(),
        ))
    }

    /// Deliver every pending vote as one batch.
    ///
    /// Runs regardless of the connectivity flag. Concurrent calls wait for
    /// each other and re-read the pending set.
    pub async fn flush(&self) -> FlushOutcome {
        let _guard = self.inner.flush_lock.lock().await;

        let pending = match self.inner.store.get_unsynced().await {
            Ok(pending) => pending,
            Err(e) => return self.fail(None, e.to_string()),
        };
        if pending.is_empty() {
            return FlushOutcome::Idle;
        }

        let count = pending.len();
        self.emit(SyncStatus::Syncing { count });
        tracing::debug!(count, adapter = self.inner.adapter.name(), "delivering batch");

        if let Err(e) = self.inner.adapter.deliver(&pending).await {
            return self.fail(Some(count), e.to_string());
        }

        let ids = pending.into_iter().map(|r| r.id).collect();
        match self.inner.store.mark_synced(ids).await {
            Ok(_) => {
                self.emit(SyncStatus::Synced { count });
                FlushOutcome::Synced { count }
            }
            // Delivered but not recorded: the votes go out again next flush
            Err(e) => self.fail(Some(count), e.to_string()),
        }
    }

    fn fail(&self, count: Option<usize>, error: String) -> FlushOutcome {
        self.emit(SyncStatus::SyncFailed {
            error: error.clone(),
            count,
        });
        FlushOutcome::Failed { count, error }
    }

    /// Snapshot of the queue. For display only.
    pub async fn get_stats(&self) -> Result<QueueStats> {
        Ok(QueueStats::from_records(self.inner.store.get_all().await?))
    }

    pub async fn pending_count(&self) -> Result<usize> {
        self.inner.store.count_unsynced().await
    }

    /// Remove every vote, pending or not. Returns the number removed.
    pub async fn clear_queue(&self) -> Result<usize> {
        let removed = self.inner.store.clear().await?;
        tracing::info!(removed, "queue cleared");
        Ok(removed)
    }

    /// Remove votes the remote has confirmed. Returns the number removed.
    pub async fn purge_synced(&self) -> Result<usize> {
        let removed = self.inner.store.purge_synced().await?;
        tracing::info!(removed, "synced votes purged");
        Ok(removed)
    }

    /// Find a vote by its receipt code.
    pub async fn lookup(&self, code: &ReceiptCode) -> Result<Option<QueueRecord>> {
        self.inner.store.get(code.to_string()).await
    }

    pub fn store(&self) -> &QueueStore {
        &self.inner.store
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
