// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use tempfile::TempDir;

#[test]
fn retry_flag_overrides_config() {
    let mut config = Config::default();
    config.remote.retry_interval_secs = 60;

    assert_eq!(retry_interval(None, &config), Some(Duration::from_secs(60)));
    assert_eq!(retry_interval(Some(5), &config), Some(Duration::from_secs(5)));
    assert_eq!(retry_interval(Some(0), &config), None);
}

#[test]
fn second_lock_is_refused() {
    let temp = TempDir::new().unwrap();

    let first = acquire_lock(temp.path()).unwrap();
    assert!(matches!(
        acquire_lock(temp.path()),
        Err(Error::WatcherRunning(_))
    ));

    drop(first);
    assert!(acquire_lock(temp.path()).is_ok());
}

#[test]
fn lock_in_missing_dir_is_io_error() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("gone");

    assert!(matches!(acquire_lock(&missing), Err(Error::Io(_))));
}

#[tokio::test]
async fn simulated_feed_stays_online_until_cancelled() {
    let config = Config::default();
    let cancel = CancellationToken::new();
    let (mut rx, task) = reachability_source(&config, false, cancel.clone()).await.unwrap();
    assert!(*rx.borrow());

    cancel.cancel();
    task.await.unwrap();
    assert!(rx.changed().await.is_err());
}

#[tokio::test]
async fn forced_offline_feed_starts_offline() {
    let mut config = Config::default();
    config.adapter = AdapterKind::Websocket;
    let cancel = CancellationToken::new();
    let (rx, task) = reachability_source(&config, true, cancel.clone()).await.unwrap();
    assert!(!*rx.borrow());

    cancel.cancel();
    task.await.unwrap();
}
