// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for vq-core operations.

use thiserror::Error;

/// All possible errors that can occur in vq-core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The local store could not persist or read records.
    ///
    /// Fatal to an enqueue: the vote must never be reported as stored.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("invalid receipt code: '{0}'\n  hint: receipt codes look like ABCD-EFGH-JKLM-NPQR")]
    InvalidReceiptCode(String),

    #[error("{0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns true if the local store is unavailable (database or filesystem failure).
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Io(_))
    }
}

/// A specialized Result type for vq-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
