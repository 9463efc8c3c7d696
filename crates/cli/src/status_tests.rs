// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use std::sync::Mutex;
use yare::parameterized;

#[parameterized(
    queued = { SyncStatus::Queued { code: "C".into() }, r#"{"type":"queued","code":"C"}"# },
    queued_offline = { SyncStatus::QueuedOffline { code: "C".into() }, r#"{"type":"queued-offline","code":"C"}"# },
    syncing = { SyncStatus::Syncing { count: 2 }, r#"{"type":"syncing","count":2}"# },
    synced = { SyncStatus::Synced { count: 2 }, r#"{"type":"synced","count":2}"# },
    sync_failed = { SyncStatus::SyncFailed { error: "503".into(), count: Some(1) }, r#"{"type":"sync-failed","error":"503","count":1}"# },
    sync_failed_no_count = { SyncStatus::SyncFailed { error: "503".into(), count: None }, r#"{"type":"sync-failed","error":"503"}"# },
    reconnected = { SyncStatus::Reconnected, r#"{"type":"reconnected"}"# },
    went_offline = { SyncStatus::WentOffline, r#"{"type":"went-offline"}"# },
)]
fn status_wire_format(status: SyncStatus, expected: &str) {
    assert_eq!(serde_json::to_string(&status).unwrap(), expected);
    let kind = status.kind();
    assert!(expected.contains(&format!("\"type\":\"{kind}\"")));
}

#[test]
fn unknown_kind_deserializes_permissively() {
    let status: SyncStatus = serde_json::from_str(r#"{"type":"conflict-detected"}"#).unwrap();
    assert_eq!(status, SyncStatus::Unknown);
}

#[test]
fn display_pluralizes() {
    assert_eq!(SyncStatus::Syncing { count: 1 }.to_string(), "syncing 1 vote");
    assert_eq!(SyncStatus::Syncing { count: 3 }.to_string(), "syncing 3 votes");
}

#[test]
fn display_failure_mentions_retry() {
    let status = SyncStatus::SyncFailed {
        error: "server temporarily unavailable (503)".into(),
        count: Some(2),
    };
    let text = status.to_string();
    assert!(text.contains("2 votes"));
    assert!(text.contains("503"));
    assert!(text.contains("retry"));
    assert!(status.is_failure());
}

#[test]
fn closure_is_an_observer() {
    let seen = Mutex::new(Vec::new());
    let observer = |s: &SyncStatus| seen.lock().unwrap().push(s.kind());

    observer.on_status(&SyncStatus::Reconnected);
    observer.on_status(&SyncStatus::WentOffline);

    assert_eq!(*seen.lock().unwrap(), vec!["reconnected", "went-offline"]);
}

#[test]
fn channel_observer_preserves_order() {
    let (observer, mut rx) = ChannelObserver::new();
    observer.on_status(&SyncStatus::Syncing { count: 1 });
    observer.on_status(&SyncStatus::Synced { count: 1 });

    assert_eq!(rx.try_recv().unwrap(), SyncStatus::Syncing { count: 1 });
    assert_eq!(rx.try_recv().unwrap(), SyncStatus::Synced { count: 1 });
    assert!(rx.try_recv().is_err());
}

#[test]
fn channel_observer_survives_dropped_receiver() {
    let (observer, rx) = ChannelObserver::new();
    drop(rx);
    observer.on_status(&SyncStatus::Reconnected);
}

#[test]
fn fan_out_delivers_to_all_in_order() {
    let (first, mut first_rx) = ChannelObserver::new();
    let (second, mut second_rx) = ChannelObserver::new();
    let fan_out = FanOut::new().with(first).with(second);

    fan_out.on_status(&SyncStatus::WentOffline);

    assert_eq!(first_rx.try_recv().unwrap(), SyncStatus::WentOffline);
    assert_eq!(second_rx.try_recv().unwrap(), SyncStatus::WentOffline);
}
