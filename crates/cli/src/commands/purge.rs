// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::error::Result;

use super::{block_on, open_engine, open_queue, quiet};

/// Remove delivered votes; pending ones are never touched.
pub fn run() -> Result<()> {
    let (queue_dir, config) = open_queue()?;
    let removed = block_on(async move {
        let engine = open_engine(&config, &queue_dir, quiet(), false)?;
        engine.purge_synced().await.map_err(crate::error::Error::from)
    })??;
    println!("Purged {} synced votes", removed);
    Ok(())
}
