// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queue record model.
//!
//! A [`QueueRecord`] is the unit of durable state: one submitted vote,
//! keyed by its receipt code, together with its delivery state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application data carried by a queued vote.
///
/// The queue never inspects it beyond persisting and exporting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotePayload {
    pub election_id: String,
    pub election_title: String,
    /// Ballot id to chosen candidate id.
    pub selections: BTreeMap<String, String>,
    /// When the voter submitted the ballot.
    pub cast_at: DateTime<Utc>,
}

impl VotePayload {
    pub fn new(
        election_id: impl Into<String>,
        election_title: impl Into<String>,
        selections: BTreeMap<String, String>,
        cast_at: DateTime<Utc>,
    ) -> Self {
        VotePayload {
            election_id: election_id.into(),
            election_title: election_title.into(),
            selections,
            cast_at,
        }
    }
}

/// A vote held in the durable queue.
///
/// `synced_at` is present exactly when `synced` is true. Records are only
/// created pending; the store flips them once the remote authority accepts
/// the batch they were delivered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRecord {
    /// Receipt code, unique across the queue.
    pub id: String,
    #[serde(flatten)]
    pub payload: VotePayload,
    pub synced: bool,
    pub enqueued_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_at: Option<DateTime<Utc>>,
}

impl QueueRecord {
    /// Creates a pending record.
    pub fn new(id: impl Into<String>, payload: VotePayload, enqueued_at: DateTime<Utc>) -> Self {
        QueueRecord {
            id: id.into(),
            payload,
            synced: false,
            enqueued_at,
            synced_at: None,
        }
    }

    /// Returns true if the record has not been confirmed by the remote yet.
    pub fn is_pending(&self) -> bool {
        !self.synced
    }

    /// Human-readable delivery state, as shown in exports.
    pub fn status_label(&self) -> &'static str {
        if self.synced {
            "Synced"
        } else {
            "Pending"
        }
    }
}

/// Snapshot of the queue for observability.
///
/// Never used for control decisions; flushes always re-read pending records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStats {
    pub total: usize,
    pub pending: usize,
    pub synced: usize,
    pub records: Vec<QueueRecord>,
}

impl QueueStats {
    /// Builds stats from every record in the store.
    pub fn from_records(records: Vec<QueueRecord>) -> Self {
        let total = records.len();
        let pending = records.iter().filter(|r| r.is_pending()).count();
        QueueStats {
            total,
            pending,
            synced: total - pending,
            records,
        }
    }

    /// Share of records confirmed by the remote, rounded to a whole percent.
    ///
    /// An empty queue counts as fully covered.
    pub fn coverage_percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.synced * 100 + self.total / 2) / self.total) as u8
    }

    /// Records still waiting for delivery.
    pub fn pending_records(&self) -> impl Iterator<Item = &QueueRecord> {
        self.records.iter().filter(|r| r.is_pending())
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
