// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! vq-core: Shared library for the votequeue offline vote queue
//!
//! This crate provides the queue record model, the SQLite-backed durable
//! store, receipt codes, CSV export and the wire protocol spoken between the
//! `vq` client and the `vq-remote` authority.

pub mod db;
pub mod error;
pub mod export;
pub mod protocol;
pub mod receipt;
pub mod record;

pub use db::Database;
pub use error::{Error, Result};
pub use receipt::ReceiptCode;
pub use record::{QueueRecord, QueueStats, VotePayload};
