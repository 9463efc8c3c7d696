// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reachability tracking for the vote queue.
//!
//! [`Connectivity`] is the flag the engine reads on every enqueue.
//! [`ConnectivityMonitor`] keeps it current from a `watch` channel and
//! flushes when the remote becomes reachable again. [`probe`] feeds such a
//! channel by periodically connecting to the remote authority.

mod monitor;
pub mod probe;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use monitor::{ConnectivityMonitor, MonitorHandle, MonitorOptions};

/// Shared reachability flag.
///
/// Cloning yields a handle to the same flag. Reads are lock-free.
#[derive(Debug, Clone)]
pub struct Connectivity {
    online: Arc<AtomicBool>,
}

impl Connectivity {
    pub fn new(online: bool) -> Self {
        Connectivity {
            online: Arc::new(AtomicBool::new(online)),
        }
    }

    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Acquire)
    }

    /// Set the flag, returning its previous value.
    pub fn set_online(&self, online: bool) -> bool {
        self.online.swap(online, Ordering::AcqRel)
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
