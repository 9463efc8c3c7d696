// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::test_helpers::make_record;
use super::*;
use std::time::Duration;
use yare::parameterized;

fn config(min_ms: u64, max_ms: u64, failure_rate: f64) -> SimulationConfig {
    SimulationConfig {
        min_latency: Duration::from_millis(min_ms),
        max_latency: Duration::from_millis(max_ms),
        failure_rate,
    }
}

#[test]
fn default_config_matches_documented_values() {
    let config = SimulationConfig::default();
    assert_eq!(config.min_latency, Duration::from_millis(800));
    assert_eq!(config.max_latency, Duration::from_millis(1500));
    assert!((config.failure_rate - 0.05).abs() < f64::EPSILON);
}

#[tokio::test]
async fn never_failing_adapter_accepts_whole_batch() {
    let adapter = SimulatedAdapter::new(SimulationConfig::instant());
    let batch = vec![make_record("A", 0), make_record("B", 1)];

    let delivery = adapter.deliver(&batch).await.unwrap();
    assert_eq!(delivery, Delivery::accepted(2));
    assert_eq!(adapter.name(), "simulated");
}

#[tokio::test]
async fn always_failing_adapter_reports_unavailable() {
    let adapter = SimulatedAdapter::new(config(0, 0, 1.0));
    let batch = vec![make_record("A", 0)];

    let err = adapter.deliver(&batch).await.unwrap_err();
    assert_eq!(
        err,
        SyncTransportError::Unavailable("server temporarily unavailable (503)".to_string())
    );
    assert_eq!(err.to_string(), "server temporarily unavailable (503)");
}

#[parameterized(
    negative = { -0.5 },
    nan = { f64::NAN },
)]
fn out_of_range_failure_rate_never_panics(rate: f64) {
    let adapter = SimulatedAdapter::new(config(0, 0, rate));
    for _ in 0..20 {
        let (_, fails) = adapter.roll();
        assert!(!fails);
    }
}

#[test]
fn rate_above_one_always_fails() {
    let adapter = SimulatedAdapter::new(config(0, 0, 3.0));
    assert!(adapter.roll().1);
}

#[test]
fn latency_stays_within_bounds() {
    let adapter = SimulatedAdapter::with_seed(config(800, 1500, 0.0), 7);
    for _ in 0..200 {
        let (latency, _) = adapter.roll();
        assert!(latency >= Duration::from_millis(800));
        assert!(latency <= Duration::from_millis(1500));
    }
}

#[test]
fn reversed_bounds_use_minimum() {
    let adapter = SimulatedAdapter::new(config(900, 100, 0.0));
    assert_eq!(adapter.roll().0, Duration::from_millis(900));
}

#[test]
fn same_seed_gives_same_sequence() {
    let a = SimulatedAdapter::with_seed(config(0, 1000, 0.5), 42);
    let b = SimulatedAdapter::with_seed(config(0, 1000, 0.5), 42);
    let rolls_a: Vec<_> = (0..50).map(|_| a.roll()).collect();
    let rolls_b: Vec<_> = (0..50).map(|_| b.roll()).collect();
    assert_eq!(rolls_a, rolls_b);
}

#[test]
fn half_failure_rate_produces_both_outcomes() {
    let adapter = SimulatedAdapter::with_seed(config(0, 0, 0.5), 3);
    let outcomes: Vec<bool> = (0..100).map(|_| adapter.roll().1).collect();
    assert!(outcomes.iter().any(|f| *f));
    assert!(outcomes.iter().any(|f| !*f));
}

#[tokio::test(start_paused = true)]
async fn delivery_waits_for_simulated_latency() {
    let adapter = SimulatedAdapter::new(config(800, 800, 0.0));
    let batch = vec![make_record("A", 0)];

    let started = tokio::time::Instant::now();
    adapter.deliver(&batch).await.unwrap();
    assert_eq!(started.elapsed(), Duration::from_millis(800));
}
