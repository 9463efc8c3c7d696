// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server state management.
//!
//! Wraps the received-votes database for shared access across connections.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use rusqlite::{params, Connection};
use tokio::sync::Mutex;

use vq_core::db::format_timestamp;
use vq_core::{QueueRecord, Result};

const DB_FILE: &str = "received.db";

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS received_votes (
    receipt_code TEXT PRIMARY KEY,
    election_id TEXT NOT NULL,
    record_json TEXT NOT NULL,
    received_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_received_votes_election ON received_votes(election_id);
"#;

/// Outcome of storing one delivered batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReceipt {
    /// Votes stored for the first time.
    pub accepted: usize,
    /// Votes already on record.
    pub duplicates: usize,
}

/// Shared server state containing the received-votes database.
#[derive(Clone)]
pub struct ServerState {
    inner: Arc<ServerStateInner>,
}

struct ServerStateInner {
    conn: Mutex<Connection>,
}

impl ServerState {
    /// Opens (or creates) the received-votes database in the given directory.
    pub fn new(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let conn = Connection::open(data_dir.join(DB_FILE))?;
        Self::from_connection(conn)
    }

    /// Creates a state backed by an in-memory database.
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(ServerState {
            inner: Arc::new(ServerStateInner {
                conn: Mutex::new(conn),
            }),
        })
    }

    /// Stores a batch in one transaction.
    ///
    /// Votes are keyed by receipt code, so a redelivered vote counts as a
    /// duplicate instead of a second ballot.
    pub async fn record_batch(&self, votes: &[QueueRecord]) -> Result<BatchReceipt> {
        let mut conn = self.inner.conn.lock().await;
        let tx = conn.transaction()?;
        let received_at = format_timestamp(&Utc::now());

        let mut accepted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR IGNORE INTO received_votes
                     (receipt_code, election_id, record_json, received_at)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for vote in votes {
                let json = serde_json::to_string(vote)?;
                accepted += stmt.execute(params![
                    vote.id,
                    vote.payload.election_id,
                    json,
                    received_at
                ])?;
            }
        }
        tx.commit()?;

        Ok(BatchReceipt {
            accepted,
            duplicates: votes.len() - accepted,
        })
    }

    /// Number of distinct votes on record.
    pub async fn received_count(&self) -> Result<usize> {
        let conn = self.inner.conn.lock().await;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM received_votes", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Returns true if the server holds a vote with this receipt code.
    #[cfg(test)]
    pub async fn has_vote(&self, receipt_code: &str) -> Result<bool> {
        let conn = self.inner.conn.lock().await;
        let found: i64 = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM received_votes WHERE receipt_code = ?1)",
            params![receipt_code],
            |row| row.get(0),
        )?;
        Ok(found != 0)
    }
}
