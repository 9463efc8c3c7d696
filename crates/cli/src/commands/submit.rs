// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::json;
use vq_core::{QueueRecord, VotePayload};

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::status::SyncStatus;

use super::{block_on, collected, initial_reachability, observer_for, open_engine, open_queue, CliEngine};

pub fn run(
    election: String,
    title: String,
    selections: Vec<String>,
    offline: bool,
    output: OutputFormat,
) -> Result<()> {
    let selections = parse_selections(&selections)?;
    let payload = build_payload(election, title, selections)?;

    let (queue_dir, config) = open_queue()?;
    let (observer, statuses) = observer_for(output);

    block_on(async move {
        let online = initial_reachability(&config, offline).await?;
        let engine = open_engine(&config, &queue_dir, observer, online)?;
        let record = run_impl(&engine, payload).await?;
        print_receipt(&record, output, collected(statuses))
    })?
}

/// Parse `BALLOT=CANDIDATE` pairs. Each ballot may appear once.
pub(crate) fn parse_selections(raw: &[String]) -> Result<BTreeMap<String, String>> {
    let mut selections = BTreeMap::new();
    for item in raw {
        let (ballot, candidate) = item
            .split_once('=')
            .ok_or_else(|| Error::InvalidSelection(item.clone()))?;
        let (ballot, candidate) = (ballot.trim(), candidate.trim());
        if ballot.is_empty() || candidate.is_empty() {
            return Err(Error::InvalidSelection(item.clone()));
        }
        if selections
            .insert(ballot.to_string(), candidate.to_string())
            .is_some()
        {
            return Err(Error::InvalidSelection(item.clone()));
        }
    }
    Ok(selections)
}

pub(crate) fn build_payload(
    election: String,
    title: String,
    selections: BTreeMap<String, String>,
) -> Result<VotePayload> {
    if election.trim().is_empty() {
        return Err(Error::FieldEmpty { field: "election" });
    }
    if title.trim().is_empty() {
        return Err(Error::FieldEmpty { field: "title" });
    }
    if selections.is_empty() {
        return Err(Error::FieldEmpty { field: "selections" });
    }
    Ok(VotePayload::new(
        election.trim(),
        title.trim(),
        selections,
        Utc::now(),
    ))
}

/// Store the vote. Delivery outcome is reported through statuses only.
pub(crate) async fn run_impl(engine: &CliEngine, payload: VotePayload) -> Result<QueueRecord> {
    let (record, _) = engine.submit_vote(payload).await?;
    Ok(record)
}

fn print_receipt(record: &QueueRecord, output: OutputFormat, statuses: Vec<SyncStatus>) -> Result<()> {
    match output {
        OutputFormat::Text => {
            println!("receipt: {}", record.id);
        }
        OutputFormat::Json => {
            let doc = json!({
                "receipt": record.id,
                "record": record,
                "statuses": statuses,
            });
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "submit_tests.rs"]
mod tests;
