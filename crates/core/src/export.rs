// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CSV export of queue contents for administrators.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::Result;
use crate::record::QueueRecord;

/// Header row of the queue export.
pub const CSV_HEADER: &str = "Receipt Code,Election ID,Election Title,Queued At,Status,Synced At";

fn format_time(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Quote a field if it contains a separator, quote or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Render a single record as a CSV row (without line terminator).
pub fn csv_row(record: &QueueRecord) -> String {
    let synced_at = record
        .synced_at
        .as_ref()
        .map(format_time)
        .unwrap_or_default();

    [
        escape_field(&record.id),
        escape_field(&record.payload.election_id),
        escape_field(&record.payload.election_title),
        format_time(&record.enqueued_at),
        record.status_label().to_string(),
        synced_at,
    ]
    .join(",")
}

/// Write the header and one row per record. Returns the number of rows written.
pub fn write_csv<W: Write>(records: &[QueueRecord], mut writer: W) -> Result<usize> {
    writeln!(writer, "{CSV_HEADER}")?;
    for record in records {
        writeln!(writer, "{}", csv_row(record))?;
    }
    writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
