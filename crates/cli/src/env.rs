// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! The variable name constants are generated by `build.rs` and live in the
//! [`vars`] submodule.

use std::path::PathBuf;

/// Generated environment variable name constants.
pub mod vars {
    include!(concat!(env!("OUT_DIR"), "/env_vars.rs"));
}

/// Returns the value of `VQ_DIR` if set and non-empty.
///
/// Points commands at a queue directory instead of searching upward.
pub fn queue_dir() -> Option<PathBuf> {
    std::env::var(vars::VQ_DIR)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Returns `true` if `VQ_OFFLINE=1`.
///
/// Forces one-shot commands to treat the remote as unreachable.
pub fn force_offline() -> bool {
    std::env::var(vars::VQ_OFFLINE).is_ok_and(|v| v == "1")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
