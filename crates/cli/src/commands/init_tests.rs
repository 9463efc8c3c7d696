// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::error::Error;
use tempfile::TempDir;

#[test]
fn init_creates_config_and_store() {
    let temp = TempDir::new().unwrap();
    let queue_dir = run_impl(temp.path(), &Config::default()).unwrap();

    assert!(queue_dir.join("config.toml").exists());
    assert!(queue_dir.join("queue.db").exists());
    assert_eq!(Config::load(&queue_dir).unwrap(), Config::default());
}

#[test]
fn second_init_fails() {
    let temp = TempDir::new().unwrap();
    run_impl(temp.path(), &Config::default()).unwrap();
    assert!(matches!(
        run_impl(temp.path(), &Config::default()),
        Err(Error::AlreadyInitialized(_))
    ));
}

#[test]
fn remote_url_implies_websocket() {
    let config = build_config(None, Some("ws://10.0.0.5:7890".to_string()));
    assert_eq!(config.adapter, AdapterKind::Websocket);
    assert_eq!(config.remote.url, "ws://10.0.0.5:7890");
}

#[test]
fn explicit_adapter_wins() {
    let config = build_config(
        Some(AdapterKind::Simulated),
        Some("ws://10.0.0.5:7890".to_string()),
    );
    assert_eq!(config.adapter, AdapterKind::Simulated);
}

#[test]
fn invalid_remote_is_rejected() {
    let temp = TempDir::new().unwrap();
    let config = build_config(None, Some("http://example.org".to_string()));
    assert!(matches!(
        run_impl(temp.path(), &config),
        Err(Error::Config(_))
    ));
}
