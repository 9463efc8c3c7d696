// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the votequeue library.
///
/// Errors provide user-friendly messages with hints for common issues.
/// Remote delivery failures are deliberately absent: they are reported as
/// status updates and never fail a command.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not initialized: run 'vq init' first")]
    NotInitialized,

    #[error("already initialized at {0}")]
    AlreadyInitialized(String),

    #[error("{0}")]
    Core(#[from] vq_core::Error),

    #[error("{count} vote(s) not yet synced\n  hint: run 'vq flush' first, or pass --force to discard them")]
    PendingVotes { count: usize },

    #[error("invalid selection '{0}'\n  hint: use BALLOT=CANDIDATE, e.g. --select B1=A2")]
    InvalidSelection(String),

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("export path cannot be empty")]
    ExportPathEmpty,

    #[error("receipt not found: {0}")]
    ReceiptNotFound(String),

    #[error("another 'vq watch' is already running for {0}")]
    WatcherRunning(String),

    #[error("a connectivity monitor is already registered for this queue")]
    MonitorRegistered,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl Error {
    /// Returns true if the local queue store could not be used.
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_storage())
    }
}

/// A specialized Result type for votequeue operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
