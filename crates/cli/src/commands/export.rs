// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fs::File;
use std::io::{BufWriter, Write};

use vq_core::export::write_csv;

use crate::error::{Error, Result};

use super::{block_on, open_engine, open_queue, quiet, CliEngine};

/// Export every vote as CSV to `filepath`, or to stdout for `-`.
pub fn run(filepath: &str) -> Result<()> {
    if filepath.trim().is_empty() {
        return Err(Error::ExportPathEmpty);
    }

    let (queue_dir, config) = open_queue()?;
    block_on(async move {
        let engine = open_engine(&config, &queue_dir, quiet(), false)?;
        if filepath == "-" {
            let stdout = std::io::stdout();
            run_impl(&engine, stdout.lock()).await?;
        } else {
            let file = File::create(filepath)?;
            let count = run_impl(&engine, BufWriter::new(file)).await?;
            println!("Exported {} votes to {}", count, filepath);
        }
        Ok::<(), Error>(())
    })?
}

/// Internal implementation that accepts the engine and writer for testing.
pub(crate) async fn run_impl<W: Write>(engine: &CliEngine, writer: W) -> Result<usize> {
    let stats = engine.get_stats().await?;
    Ok(write_csv(&stats.records, writer)?)
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
