// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_init_and_load_config() {
    let temp = TempDir::new().unwrap();
    let queue_dir = init_queue_dir(temp.path(), &Config::default()).unwrap();

    assert_eq!(queue_dir, temp.path().join(".votequeue"));
    let config = Config::load(&queue_dir).unwrap();
    assert_eq!(config, Config::default());
    assert!(queue_dir.join(".gitignore").exists());
}

#[test]
fn test_already_initialized() {
    let temp = TempDir::new().unwrap();
    init_queue_dir(temp.path(), &Config::default()).unwrap();

    let err = init_queue_dir(temp.path(), &Config::default()).unwrap_err();
    assert!(err.to_string().contains("already initialized"));
}

#[test]
fn test_init_succeeds_with_empty_queue_dir() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join(".votequeue")).unwrap();

    let queue_dir = init_queue_dir(temp.path(), &Config::default()).unwrap();
    assert!(queue_dir.join("config.toml").exists());
}

#[test]
fn test_init_rejects_invalid_config() {
    let temp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.remote.url = "http://localhost".to_string();

    assert!(matches!(
        init_queue_dir(temp.path(), &config),
        Err(Error::Config(_))
    ));
    assert!(!temp.path().join(".votequeue").exists());
}

#[test]
fn test_empty_file_uses_defaults() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "").unwrap();

    let config = Config::load(temp.path()).unwrap();
    assert_eq!(config.adapter, AdapterKind::Simulated);
    assert_eq!(config.remote.url, "ws://localhost:7890");
    assert_eq!(config.remote.deliver_timeout(), Some(Duration::from_secs(30)));
    assert_eq!(config.remote.retry_interval(), None);
    assert_eq!(config.simulation.min_latency_ms, 800);
    assert_eq!(config.simulation.max_latency_ms, 1500);
}

#[test]
fn test_partial_file_fills_missing_fields() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "adapter = \"websocket\"\n\n[remote]\nurl = \"wss://votes.example.org\"\nretry_interval_secs = 15\n",
    )
    .unwrap();

    let config = Config::load(temp.path()).unwrap();
    assert_eq!(config.adapter, AdapterKind::Websocket);
    assert_eq!(config.remote.url, "wss://votes.example.org");
    assert_eq!(config.remote.retry_interval(), Some(Duration::from_secs(15)));
    assert_eq!(config.remote.probe_interval_ms, 5000);
    assert_eq!(config.simulation, SimulationSettings::default());
}

#[test]
fn test_config_load_missing_file() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(Config::load(temp.path()), Err(Error::Config(_))));
}

#[test]
fn test_config_load_malformed_toml() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "adapter = [").unwrap();

    let err = Config::load(temp.path()).unwrap_err();
    assert!(err.to_string().contains("failed to parse config"));
}

#[test]
fn test_config_save_and_reload() {
    let temp = TempDir::new().unwrap();
    let config = Config {
        adapter: AdapterKind::Websocket,
        remote: RemoteConfig {
            url: "ws://10.0.0.5:7890".to_string(),
            deliver_timeout_secs: 0,
            ..RemoteConfig::default()
        },
        simulation: SimulationSettings {
            seed: Some(42),
            ..SimulationSettings::default()
        },
    };
    config.save(temp.path()).unwrap();

    let loaded = Config::load(temp.path()).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.remote.deliver_timeout(), None);
}

#[parameterized(
    http = { "http://localhost:7890" },
    bare_host = { "localhost:7890" },
    empty = { "" },
)]
fn test_invalid_remote_url(url: &str) {
    let remote = RemoteConfig {
        url: url.to_string(),
        ..RemoteConfig::default()
    };
    assert!(remote.validate().is_some());
}

#[parameterized(
    negative = { -0.1 },
    above_one = { 1.5 },
    nan = { f64::NAN },
)]
fn test_invalid_failure_rate(rate: f64) {
    let settings = SimulationSettings {
        failure_rate: rate,
        ..SimulationSettings::default()
    };
    assert!(settings.validate().is_some());
}

#[test]
fn test_reversed_latency_bounds() {
    let settings = SimulationSettings {
        min_latency_ms: 2000,
        max_latency_ms: 100,
        ..SimulationSettings::default()
    };
    let msg = settings.validate().unwrap();
    assert!(msg.contains("exceeds"));
}

#[test]
fn test_zero_probe_interval_is_invalid() {
    let remote = RemoteConfig {
        probe_interval_ms: 0,
        ..RemoteConfig::default()
    };
    assert!(remote.validate().is_some());
}

#[test]
fn test_find_queue_dir_walks_up() {
    let temp = TempDir::new().unwrap();
    let queue_dir = init_queue_dir(temp.path(), &Config::default()).unwrap();
    let nested = temp.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    assert_eq!(find_queue_dir_from(&nested).unwrap(), queue_dir);
}

#[test]
fn test_find_queue_dir_not_initialized() {
    let temp = TempDir::new().unwrap();
    assert!(matches!(
        find_queue_dir_from(temp.path()),
        Err(Error::NotInitialized)
    ));
}

#[test]
fn test_paths() {
    let queue_dir = PathBuf::from("/project/.votequeue");
    assert_eq!(get_db_path(&queue_dir), PathBuf::from("/project/.votequeue/queue.db"));
    assert_eq!(
        get_lock_path(&queue_dir),
        PathBuf::from("/project/.votequeue/watch.lock")
    );
}

#[test]
fn test_simulation_config_conversion() {
    let settings = SimulationSettings {
        min_latency_ms: 10,
        max_latency_ms: 20,
        failure_rate: 0.5,
        seed: None,
    };
    let config = settings.to_simulation_config();
    assert_eq!(config.min_latency, Duration::from_millis(10));
    assert_eq!(config.max_latency, Duration::from_millis(20));
}
