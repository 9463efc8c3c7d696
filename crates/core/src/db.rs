// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed durable store for the vote queue.
//!
//! The [`Database`] struct is the only component that touches persisted
//! queue state. Every write completes before the call returns; there is no
//! write-behind buffer.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::error::{Error, Result};
use crate::record::{QueueRecord, VotePayload};

/// SQL schema for the vote queue.
pub const SCHEMA: &str = r#"
-- One row per submitted vote, keyed by receipt code
CREATE TABLE IF NOT EXISTS vote_queue (
    code TEXT PRIMARY KEY,
    election_id TEXT NOT NULL,
    election_title TEXT NOT NULL,
    selections TEXT NOT NULL,    -- JSON object: ballot id -> candidate id
    cast_at TEXT NOT NULL,
    synced INTEGER NOT NULL DEFAULT 0,
    enqueued_at TEXT NOT NULL,
    synced_at TEXT,
    CHECK ((synced = 0 AND synced_at IS NULL) OR (synced = 1 AND synced_at IS NOT NULL))
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_vote_queue_synced ON vote_queue(synced);
CREATE INDEX IF NOT EXISTS idx_vote_queue_election ON vote_queue(election_id);
"#;

/// Schema version recorded in `PRAGMA user_version`.
pub const SCHEMA_VERSION: i64 = 1;

const SELECT_COLUMNS: &str = "SELECT code, election_id, election_title, selections, cast_at,
        synced, enqueued_at, synced_at
 FROM vote_queue";

fn corrupted(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupted(format!("invalid timestamp '{value}' in column '{column}'")))
}

/// Format a timestamp for storage.
///
/// Fixed-width nanosecond precision in UTC, so text order is time order.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn row_to_record(row: &rusqlite::Row<'_>) -> std::result::Result<QueueRecord, rusqlite::Error> {
    let selections_json: String = row.get(3)?;
    let cast_str: String = row.get(4)?;
    let synced: i64 = row.get(5)?;
    let enqueued_str: String = row.get(6)?;
    let synced_str: Option<String> = row.get(7)?;

    let selections = serde_json::from_str(&selections_json)
        .map_err(|e| corrupted(format!("invalid selections in column 'selections': {e}")))?;
    let synced_at = match synced_str {
        Some(s) => Some(parse_timestamp(&s, "synced_at")?),
        None => None,
    };

    Ok(QueueRecord {
        id: row.get(0)?,
        payload: VotePayload {
            election_id: row.get(1)?,
            election_title: row.get(2)?,
            selections,
            cast_at: parse_timestamp(&cast_str, "cast_at")?,
        },
        synced: synced != 0,
        enqueued_at: parse_timestamp(&enqueued_str, "enqueued_at")?,
        synced_at,
    })
}

/// Run schema creation and migrations on a database connection.
///
/// Idempotent; safe to call on every open.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version < SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION}"))?;
    }
    Ok(())
}

/// SQLite connection with vote queue operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // WAL keeps readers (stats, export) off the writer's back;
        // FULL sync so an acknowledged vote survives power loss.
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = FULL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Insert or update a record by id.
    ///
    /// Payload fields are overwritten in place. `enqueued_at` keeps its first
    /// value and a synced record stays synced.
    pub fn put(&self, record: &QueueRecord) -> Result<()> {
        let selections = serde_json::to_string(&record.payload.selections)?;
        self.conn.execute(
            "INSERT INTO vote_queue (code, election_id, election_title, selections, cast_at,
             synced, enqueued_at, synced_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(code) DO UPDATE SET
                 election_id = excluded.election_id,
                 election_title = excluded.election_title,
                 selections = excluded.selections,
                 cast_at = excluded.cast_at,
                 synced = MAX(vote_queue.synced, excluded.synced),
                 synced_at = COALESCE(vote_queue.synced_at, excluded.synced_at)",
            params![
                record.id,
                record.payload.election_id,
                record.payload.election_title,
                selections,
                format_timestamp(&record.payload.cast_at),
                i64::from(record.synced),
                format_timestamp(&record.enqueued_at),
                record.synced_at.as_ref().map(format_timestamp),
            ],
        )?;
        Ok(())
    }

    /// Get a record by id, if present.
    pub fn get(&self, id: &str) -> Result<Option<QueueRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE code = ?1"),
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Get every record, oldest first.
    pub fn get_all(&self) -> Result<Vec<QueueRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY enqueued_at, code"))?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Get records not yet confirmed by the remote, oldest first.
    pub fn get_unsynced(&self) -> Result<Vec<QueueRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE synced = 0 ORDER BY enqueued_at, code"
        ))?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Count pending records without loading them.
    pub fn count_unsynced(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM vote_queue WHERE synced = 0",
            [],
            |row| row.get(0),
        )?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Mark a record as delivered.
    ///
    /// Unknown ids and already-synced records are left untouched. Returns
    /// true if this call flipped the record.
    pub fn mark_synced(&self, id: &str, synced_at: DateTime<Utc>) -> Result<bool> {
        let affected = self.conn.execute(
            "UPDATE vote_queue SET synced = 1, synced_at = ?2 WHERE code = ?1 AND synced = 0",
            params![id, format_timestamp(&synced_at)],
        )?;
        Ok(affected > 0)
    }

    /// Remove every record, pending or not. Returns the number removed.
    pub fn clear(&self) -> Result<usize> {
        let affected = self.conn.execute("DELETE FROM vote_queue", [])?;
        Ok(affected)
    }

    /// Remove only synced records. Returns the number removed.
    pub fn purge_synced(&self) -> Result<usize> {
        let affected = self
            .conn
            .execute("DELETE FROM vote_queue WHERE synced = 1", [])?;
        Ok(affected)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
