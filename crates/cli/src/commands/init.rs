// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use vq_core::Database;

use crate::config::{get_db_path, init_queue_dir, AdapterKind, Config};
use crate::error::Result;

pub fn run(path: Option<String>, adapter: Option<AdapterKind>, remote: Option<String>) -> Result<()> {
    let target = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };
    let config = build_config(adapter, remote);
    let queue_dir = run_impl(&target, &config)?;

    println!("Initialized vote queue at {}", queue_dir.display());
    match config.adapter {
        AdapterKind::Simulated => println!("  adapter: simulated"),
        AdapterKind::Websocket => println!("  adapter: websocket ({})", config.remote.url),
    }
    Ok(())
}

/// A remote URL without an explicit adapter implies the WebSocket adapter.
pub(crate) fn build_config(adapter: Option<AdapterKind>, remote: Option<String>) -> Config {
    let mut config = Config::default();
    if let Some(url) = remote {
        config.remote.url = url;
        config.adapter = AdapterKind::Websocket;
    }
    if let Some(adapter) = adapter {
        config.adapter = adapter;
    }
    config
}

/// Create the queue directory and an empty store.
pub(crate) fn run_impl(target: &Path, config: &Config) -> Result<PathBuf> {
    let queue_dir = init_queue_dir(target, config)?;
    Database::open(&get_db_path(&queue_dir))?;
    Ok(queue_dir)
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
