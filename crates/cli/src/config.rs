// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queue configuration management.
//!
//! Configuration is stored in `.votequeue/config.toml` and includes:
//! - `adapter`: how pending votes reach the remote (`simulated` or `websocket`)
//! - `[remote]`: the remote authority's URL and timing knobs
//! - `[simulation]`: latency and failure rate of the simulated remote
//!
//! Every field has a default, so an empty file is a valid configuration.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapter::SimulationConfig;
use crate::connectivity::probe::ProbeConfig;
use crate::error::{Error, Result};

const QUEUE_DIR_NAME: &str = ".votequeue";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "queue.db";
const LOCK_FILE_NAME: &str = "watch.lock";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Which adapter delivers pending votes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    /// In-process stand-in with random latency and failures.
    #[default]
    Simulated,
    /// A `vq-remote` server over WebSocket.
    Websocket,
}

/// Queue configuration stored in `.votequeue/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub adapter: AdapterKind,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Remote authority settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// WebSocket URL of the remote authority (`ws://` or `wss://`).
    #[serde(default = "default_url")]
    pub url: String,
    /// Give up on a delivery after this many seconds (default: 30). 0 = wait forever.
    #[serde(default = "default_deliver_timeout_secs")]
    pub deliver_timeout_secs: u64,
    /// Reachability probe interval in milliseconds (default: 5000).
    #[serde(default = "default_probe_interval_ms")]
    pub probe_interval_ms: u64,
    /// Max time for one probe connection in milliseconds (default: 2000).
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// While online with pending votes, retry every N seconds (default: 0 = disabled).
    #[serde(default)]
    pub retry_interval_secs: u64,
}

fn default_url() -> String {
    "ws://localhost:7890".to_string()
}

fn default_deliver_timeout_secs() -> u64 {
    30
}

fn default_probe_interval_ms() -> u64 {
    5_000
}

fn default_probe_timeout_ms() -> u64 {
    2_000
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            url: default_url(),
            deliver_timeout_secs: default_deliver_timeout_secs(),
            probe_interval_ms: default_probe_interval_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            retry_interval_secs: 0,
        }
    }
}

impl RemoteConfig {
    /// Validates the URL and timings. Returns an error message if invalid.
    pub fn validate(&self) -> Option<String> {
        if !(self.url.starts_with("ws://") || self.url.starts_with("wss://")) {
            return Some(format!(
                "invalid remote URL '{}': must be ws:// or wss://",
                self.url
            ));
        }
        if self.probe_interval_ms == 0 {
            return Some("probe_interval_ms must be greater than 0".to_string());
        }
        if self.probe_timeout_ms == 0 {
            return Some("probe_timeout_ms must be greater than 0".to_string());
        }
        None
    }

    /// Delivery timeout, if any.
    pub fn deliver_timeout(&self) -> Option<Duration> {
        (self.deliver_timeout_secs > 0).then(|| Duration::from_secs(self.deliver_timeout_secs))
    }

    /// Periodic retry interval, if enabled.
    pub fn retry_interval(&self) -> Option<Duration> {
        (self.retry_interval_secs > 0).then(|| Duration::from_secs(self.retry_interval_secs))
    }

    pub fn probe_config(&self) -> ProbeConfig {
        ProbeConfig {
            interval: Duration::from_millis(self.probe_interval_ms),
            timeout: Duration::from_millis(self.probe_timeout_ms),
        }
    }
}

/// Simulated remote settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    #[serde(default = "default_min_latency_ms")]
    pub min_latency_ms: u64,
    #[serde(default = "default_max_latency_ms")]
    pub max_latency_ms: u64,
    /// Probability in `[0, 1]` that a delivery fails (default: 0.05).
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
    /// Fixed RNG seed for reproducible runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

fn default_min_latency_ms() -> u64 {
    800
}

fn default_max_latency_ms() -> u64 {
    1_500
}

fn default_failure_rate() -> f64 {
    0.05
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            min_latency_ms: default_min_latency_ms(),
            max_latency_ms: default_max_latency_ms(),
            failure_rate: default_failure_rate(),
            seed: None,
        }
    }
}

impl SimulationSettings {
    /// Validates latency bounds and failure rate. Returns an error message if invalid.
    pub fn validate(&self) -> Option<String> {
        if self.min_latency_ms > self.max_latency_ms {
            return Some(format!(
                "min_latency_ms ({}) exceeds max_latency_ms ({})",
                self.min_latency_ms, self.max_latency_ms
            ));
        }
        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Some(format!(
                "failure_rate must be between 0 and 1, got {}",
                self.failure_rate
            ));
        }
        None
    }

    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            min_latency: Duration::from_millis(self.min_latency_ms),
            max_latency: Duration::from_millis(self.max_latency_ms),
            failure_rate: self.failure_rate,
        }
    }
}

impl Config {
    /// Loads configuration from the given `.votequeue/` directory.
    pub fn load(queue_dir: &Path) -> Result<Self> {
        let config_path = queue_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every section, reporting the first problem found.
    pub fn validate(&self) -> Result<()> {
        if let Some(msg) = self.remote.validate() {
            return Err(Error::Config(msg));
        }
        if let Some(msg) = self.simulation.validate() {
            return Err(Error::Config(msg));
        }
        Ok(())
    }

    /// Saves configuration to the given `.votequeue/` directory.
    pub fn save(&self, queue_dir: &Path) -> Result<()> {
        let config_path = queue_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Find the `.votequeue` directory by walking up from `start`.
pub fn find_queue_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let queue_dir = current.join(QUEUE_DIR_NAME);
        if queue_dir.is_dir() {
            return Ok(queue_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Find the `.votequeue` directory: `VQ_DIR` if set, else walk up from the
/// current directory.
pub fn find_queue_dir() -> Result<PathBuf> {
    if let Some(dir) = crate::env::queue_dir() {
        if dir.is_dir() {
            return Ok(dir);
        }
        return Err(Error::NotInitialized);
    }
    find_queue_dir_from(&std::env::current_dir()?)
}

/// Get the database path inside a queue directory.
pub fn get_db_path(queue_dir: &Path) -> PathBuf {
    queue_dir.join(DB_FILE_NAME)
}

/// Get the watcher lock path inside a queue directory.
pub fn get_lock_path(queue_dir: &Path) -> PathBuf {
    queue_dir.join(LOCK_FILE_NAME)
}

/// Initialize a new `.votequeue` directory at the given path.
pub fn init_queue_dir(path: &Path, config: &Config) -> Result<PathBuf> {
    config.validate()?;

    let queue_dir = path.join(QUEUE_DIR_NAME);
    if queue_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(queue_dir.display().to_string()));
    }

    fs::create_dir_all(&queue_dir)?;
    config.save(&queue_dir)?;
    write_gitignore(&queue_dir)?;

    Ok(queue_dir)
}

/// Write a .gitignore keeping the database and lock file out of version control.
pub fn write_gitignore(queue_dir: &Path) -> Result<()> {
    let content = "# Local vote store\nqueue.db\nqueue.db-wal\nqueue.db-shm\n\n# Watcher lock\nwatch.lock\n";
    fs::write(queue_dir.join(GITIGNORE_FILE_NAME), content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
