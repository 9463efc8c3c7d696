// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::fmt::Write as _;

use chrono::SecondsFormat;
use serde_json::json;
use vq_core::QueueStats;

use crate::cli::OutputFormat;
use crate::error::Result;

use super::{block_on, open_engine, open_queue, quiet};

pub fn run(pending_only: bool, output: OutputFormat) -> Result<()> {
    let (queue_dir, config) = open_queue()?;

    let stats = block_on(async move {
        let engine = open_engine(&config, &queue_dir, quiet(), false)?;
        engine.get_stats().await.map_err(crate::error::Error::from)
    })??;

    match output {
        OutputFormat::Text => print!("{}", format_text(&stats, pending_only)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&to_json(&stats, pending_only))?)
        }
    }
    Ok(())
}

pub(crate) fn format_text(stats: &QueueStats, pending_only: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "total:    {}", stats.total);
    let _ = writeln!(out, "pending:  {}", stats.pending);
    let _ = writeln!(out, "synced:   {}", stats.synced);
    let _ = writeln!(out, "coverage: {}%", stats.coverage_percent());

    if pending_only && stats.pending > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "Pending:");
        for record in stats.pending_records() {
            let _ = writeln!(
                out,
                "  {}  {}  queued {}",
                record.id,
                record.payload.election_id,
                record.enqueued_at.to_rfc3339_opts(SecondsFormat::Secs, true)
            );
        }
    }
    out
}

pub(crate) fn to_json(stats: &QueueStats, pending_only: bool) -> serde_json::Value {
    let records: Vec<_> = if pending_only {
        stats.pending_records().collect()
    } else {
        stats.records.iter().collect()
    };
    json!({
        "total": stats.total,
        "pending": stats.pending,
        "synced": stats.synced,
        "coverage_percent": stats.coverage_percent(),
        "records": records,
    })
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
