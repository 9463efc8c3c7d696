// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::SecondsFormat;
use vq_core::{QueueRecord, ReceiptCode};

use crate::cli::OutputFormat;
use crate::error::{Error, Result};

use super::{block_on, open_engine, open_queue, quiet, CliEngine};

pub fn run(code: &str, output: OutputFormat) -> Result<()> {
    let (queue_dir, config) = open_queue()?;
    let code = code.to_string();

    let record = block_on(async move {
        let engine = open_engine(&config, &queue_dir, quiet(), false)?;
        run_impl(&engine, &code).await
    })??;

    match output {
        OutputFormat::Text => print!("{}", format_record(&record)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
    }
    Ok(())
}

/// Find the vote a voter's receipt code refers to.
pub(crate) async fn run_impl(engine: &CliEngine, code: &str) -> Result<QueueRecord> {
    let receipt: ReceiptCode = code.parse()?;
    engine
        .lookup(&receipt)
        .await?
        .ok_or_else(|| Error::ReceiptNotFound(receipt.to_string()))
}

pub(crate) fn format_record(record: &QueueRecord) -> String {
    let status = match record.synced_at {
        Some(at) => format!(
            "synced at {}",
            at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ),
        None => "pending (held locally until delivered)".to_string(),
    };
    let mut out = format!(
        "receipt:  {}\nelection: {} ({})\nqueued:   {}\nstatus:   {}\n",
        record.id,
        record.payload.election_title,
        record.payload.election_id,
        record.enqueued_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        status,
    );
    for (ballot, candidate) in &record.payload.selections {
        out.push_str(&format!("  {} -> {}\n", ballot, candidate));
    }
    out
}

#[cfg(test)]
#[path = "verify_tests.rs"]
mod tests;
