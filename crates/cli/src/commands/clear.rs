// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::{Error, Result};

use super::{block_on, open_engine, open_queue, quiet, CliEngine};

pub fn run(force: bool) -> Result<()> {
    let (queue_dir, config) = open_queue()?;
    let removed = block_on(async move {
        let engine = open_engine(&config, &queue_dir, quiet(), false)?;
        run_impl(&engine, force).await
    })??;
    println!("Cleared {} votes", removed);
    Ok(())
}

/// Remove every vote. Refuses while votes are undelivered unless forced.
pub(crate) async fn run_impl(engine: &CliEngine, force: bool) -> Result<usize> {
    let pending = engine.pending_count().await?;
    if pending > 0 && !force {
        return Err(Error::PendingVotes { count: pending });
    }
    if pending > 0 {
        tracing::warn!(pending, "discarding undelivered votes");
    }
    Ok(engine.clear_queue().await?)
}

#[cfg(test)]
#[path = "clear_tests.rs"]
mod tests;
