// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Async handle to the durable vote store.
//!
//! SQLite calls block, so every operation runs on tokio's blocking pool
//! while holding the store mutex. The mutex is released before the future
//! resolves; callers never observe a status while the store is locked.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use vq_core::{Database, QueueRecord, Result};

/// Shared, cloneable handle to a [`Database`].
#[derive(Clone)]
pub struct QueueStore {
    db: Arc<Mutex<Database>>,
}

impl QueueStore {
    pub fn new(db: Database) -> Self {
        QueueStore {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Open (or create) the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    /// Open an in-memory store (for testing).
    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    /// Run `f` against the database on the blocking pool.
    pub async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let guard = db
                .lock()
                .map_err(|_| io::Error::other("vote store lock poisoned"))?;
            f(&guard)
        })
        .await
        .map_err(|e| vq_core::Error::Io(io::Error::other(e)))?
    }

    pub async fn put(&self, record: QueueRecord) -> Result<()> {
        self.with_db(move |db| db.put(&record)).await
    }

    pub async fn get(&self, id: String) -> Result<Option<QueueRecord>> {
        self.with_db(move |db| db.get(&id)).await
    }

    pub async fn get_all(&self) -> Result<Vec<QueueRecord>> {
        self.with_db(|db| db.get_all()).await
    }

    pub async fn get_unsynced(&self) -> Result<Vec<QueueRecord>> {
        self.with_db(|db| db.get_unsynced()).await
    }

    pub async fn count_unsynced(&self) -> Result<usize> {
        self.with_db(|db| db.count_unsynced()).await
    }

    /// Mark each id synced, in order, stamping each with the current time.
    ///
    /// Returns how many records this call flipped.
    pub async fn mark_synced(&self, ids: Vec<String>) -> Result<usize> {
        self.with_db(move |db| {
            let mut flipped = 0;
            for id in &ids {
                if db.mark_synced(id, Utc::now())? {
                    flipped += 1;
                }
            }
            Ok(flipped)
        })
        .await
    }

    pub async fn clear(&self) -> Result<usize> {
        self.with_db(|db| db.clear()).await
    }

    pub async fn purge_synced(&self) -> Result<usize> {
        self.with_db(|db| db.purge_synced()).await
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
