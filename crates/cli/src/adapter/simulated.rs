// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Simulated remote authority.
//!
//! Stands in for a real server: each delivery waits a random round-trip
//! time and fails at a configurable rate, which exercises the retry path.

use std::sync::Mutex;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vq_core::QueueRecord;

use super::{Delivery, DeliveryFuture, SyncAdapter, SyncTransportError};

/// Error reported for a simulated server failure.
pub const SIMULATED_FAILURE: &str = "server temporarily unavailable (503)";

/// Tuning for the simulated remote.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Shortest simulated round-trip.
    pub min_latency: Duration,
    /// Longest simulated round-trip.
    pub max_latency: Duration,
    /// Probability in `[0, 1]` that a delivery fails.
    pub failure_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            min_latency: Duration::from_millis(800),
            max_latency: Duration::from_millis(1500),
            failure_rate: 0.05,
        }
    }
}

impl SimulationConfig {
    /// No latency and no failures.
    pub fn instant() -> Self {
        SimulationConfig {
            min_latency: Duration::ZERO,
            max_latency: Duration::ZERO,
            failure_rate: 0.0,
        }
    }
}

/// Adapter simulating network latency and transient server failures.
pub struct SimulatedAdapter {
    config: SimulationConfig,
    rng: Mutex<StdRng>,
}

impl SimulatedAdapter {
    /// Create an adapter seeded from OS entropy.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an adapter with a fixed seed, for reproducible runs.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimulationConfig, rng: StdRng) -> Self {
        SimulatedAdapter {
            config,
            rng: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Draw the latency and outcome of one delivery.
    pub(super) fn roll(&self) -> (Duration, bool) {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let min = self.config.min_latency.as_millis() as u64;
        let max = self.config.max_latency.as_millis() as u64;
        let latency = if max > min {
            rng.gen_range(min..=max)
        } else {
            min
        };

        let rate = if self.config.failure_rate.is_finite() {
            self.config.failure_rate.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let fails = rng.gen_bool(rate);

        (Duration::from_millis(latency), fails)
    }
}

impl SyncAdapter for SimulatedAdapter {
    fn deliver<'a>(&'a self, batch: &'a [QueueRecord]) -> DeliveryFuture<'a> {
        Box::pin(async move {
            let (latency, fails) = self.roll();
            tracing::debug!(
                votes = batch.len(),
                latency_ms = latency.as_millis() as u64,
                "simulated delivery"
            );
            tokio::time::sleep(latency).await;

            if fails {
                Err(SyncTransportError::Unavailable(SIMULATED_FAILURE.to_string()))
            } else {
                Ok(Delivery::accepted(batch.len()))
            }
        })
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
