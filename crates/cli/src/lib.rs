// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! votequeue - An offline-first vote submission queue.
//!
//! This crate provides the core functionality for the `vq` CLI tool: a
//! durable local queue that never loses a vote regardless of network
//! availability, and best-effort delivery to a remote authority.
//!
//! # Main Components
//!
//! - [`QueueEngine`] - Enqueue, flush, stats and administrative operations
//! - [`adapter`] - Pluggable delivery to the remote ([`SyncAdapter`])
//! - [`connectivity`] - Reachability tracking that flushes on reconnect
//! - [`status`] - Observable state transitions ([`SyncStatus`])
//! - [`Config`] - Queue configuration (`.votequeue/config.toml`)
//!
//! # Embedding
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use votequeue::{Connectivity, LogObserver, QueueEngine, QueueStore, SimulatedAdapter};
//!
//! let engine = QueueEngine::new(
//!     QueueStore::open(Path::new("votes.db"))?,
//!     SimulatedAdapter::new(Default::default()),
//!     Arc::new(LogObserver),
//!     Connectivity::new(true),
//! );
//! let (record, _) = engine.submit_vote(payload).await?;
//! println!("receipt: {}", record.id);
//! ```

mod cli;
mod commands;
mod env;
mod logging;

pub mod adapter;
pub mod config;
pub mod connectivity;
pub mod engine;
pub mod error;
pub mod status;
pub mod store;

pub use adapter::{
    SimulatedAdapter, SimulationConfig, SyncAdapter, SyncTransportError, TimeoutAdapter,
    WebSocketAdapter,
};
pub use cli::{Cli, Command, OutputFormat};
pub use config::{find_queue_dir, get_db_path, init_queue_dir, AdapterKind, Config};
pub use connectivity::{Connectivity, ConnectivityMonitor, MonitorHandle, MonitorOptions};
pub use engine::{EnqueueOutcome, FlushOutcome, QueueEngine};
pub use error::{Error, Result};
pub use status::{ChannelObserver, LogObserver, StatusObserver, SyncStatus};
pub use store::QueueStore;

use clap::CommandFactory;
use clap_complete::generate;

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Init {
            path,
            adapter,
            remote,
        } => commands::init::run(path, adapter, remote),
        Command::Submit {
            election,
            title,
            selections,
            offline,
            output,
        } => commands::submit::run(election, title, selections, offline, output),
        Command::Flush { output } => commands::flush::run(output),
        Command::Stats { pending, output } => commands::stats::run(pending, output),
        Command::Verify { code, output } => commands::verify::run(&code, output),
        Command::Export { filepath } => commands::export::run(&filepath),
        Command::Clear { force } => commands::clear::run(force),
        Command::Purge => commands::purge::run(),
        Command::Watch { retry_secs } => commands::watch::run(retry_secs),
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "vq", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
