// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use crate::cli::OutputFormat;
use crate::engine::FlushOutcome;
use crate::error::Result;
use crate::status::SyncStatus;

use super::{block_on, collected, observer_for, open_engine, open_queue};

/// Deliver pending votes now, regardless of the last known reachability.
///
/// A failed delivery is reported, not returned: the votes stay queued.
pub fn run(output: OutputFormat) -> Result<()> {
    let (queue_dir, config) = open_queue()?;
    let (observer, statuses) = observer_for(output);

    block_on(async move {
        let engine = open_engine(&config, &queue_dir, observer, true)?;
        let outcome = engine.flush().await;
        report(&outcome, output, collected(statuses))
    })?
}

pub(crate) fn summary(outcome: &FlushOutcome) -> Option<&'static str> {
    match outcome {
        FlushOutcome::Idle => Some("nothing to sync"),
        FlushOutcome::Synced { .. } | FlushOutcome::Failed { .. } => None,
    }
}

fn report(outcome: &FlushOutcome, output: OutputFormat, statuses: Vec<SyncStatus>) -> Result<()> {
    match output {
        OutputFormat::Text => {
            // Statuses were already printed as they happened
            if let Some(line) = summary(outcome) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            let doc = json!({
                "result": outcome,
                "statuses": statuses,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "flush_tests.rs"]
mod tests;
