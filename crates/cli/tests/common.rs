// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn vq() -> Command {
    let mut cmd = cargo_bin_cmd!("vq");
    cmd.env_remove("VQ_DIR").env_remove("VQ_OFFLINE");
    cmd
}

/// Initialize a queue whose simulated remote answers instantly and fails
/// with the given probability.
fn init_with_failure_rate(failure_rate: f64) -> TempDir {
    let temp = TempDir::new().unwrap();
    vq().arg("init").current_dir(temp.path()).assert().success();

    let config = format!(
        "adapter = \"simulated\"\n\n[simulation]\nmin_latency_ms = 0\nmax_latency_ms = 0\nfailure_rate = {failure_rate:.1}\n"
    );
    std::fs::write(temp.path().join(".votequeue/config.toml"), config).unwrap();
    temp
}

/// A queue whose remote always accepts.
pub fn init_temp() -> TempDir {
    init_with_failure_rate(0.0)
}

/// A queue whose remote always fails.
pub fn init_temp_failing() -> TempDir {
    init_with_failure_rate(1.0)
}

/// Submit a vote and return its receipt code.
pub fn submit(temp: &TempDir, extra: &[&str]) -> String {
    let output = vq()
        .args(["submit", "-e", "e-2026", "-t", "Board Election", "-s", "B1=A2"])
        .args(extra)
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "submit failed: {:?}", output);

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .find_map(|line| line.strip_prefix("receipt: "))
        .unwrap()
        .trim()
        .to_string()
}

/// Parse `vq stats -o json`.
pub fn stats_json(temp: &TempDir) -> serde_json::Value {
    let output = vq()
        .args(["stats", "-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}
