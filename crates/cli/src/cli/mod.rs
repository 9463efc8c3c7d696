// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::config::AdapterKind;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "vq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "An offline-first vote submission queue")]
#[command(
    long_about = "An offline-first vote submission queue.\n\n\
    Votes are stored durably on this machine before any network attempt and \
    delivered to the remote authority whenever it is reachable."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a vote queue in the current directory
    #[command(after_help = "\
Examples:
  vq init                                      Simulated remote (default)
  vq init --adapter websocket                  Deliver to a vq-remote server
  vq init --remote ws://10.0.0.5:7890          Custom server URL (implies websocket)")]
    Init {
        /// Directory to initialize (default: current directory)
        path: Option<String>,

        /// How pending votes are delivered
        #[arg(long, value_enum)]
        adapter: Option<AdapterKind>,

        /// WebSocket URL of the remote authority
        #[arg(long, value_name = "URL")]
        remote: Option<String>,
    },

    /// Submit a vote and print its receipt code
    #[command(after_help = "\
Examples:
  vq submit -e e-2026 -t \"Board Election\" -s B1=A2
  vq submit -e e-2026 -t \"Board Election\" -s B1=A2 -s B2=C1 --offline")]
    Submit {
        /// Election id
        #[arg(long, short, value_parser = non_empty_string)]
        election: String,

        /// Election title, as shown in exports
        #[arg(long, short, value_parser = non_empty_string)]
        title: String,

        /// Chosen candidate per ballot (repeatable)
        #[arg(long = "select", short = 's', value_name = "BALLOT=CANDIDATE", required = true)]
        selections: Vec<String>,

        /// Store the vote without attempting delivery
        #[arg(long)]
        offline: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Deliver every pending vote now
    Flush {
        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Show queue totals and sync coverage
    Stats {
        /// List pending votes
        #[arg(long)]
        pending: bool,

        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Look up a vote by receipt code
    Verify {
        /// Receipt code (case-insensitive)
        code: String,

        /// Output format
        #[arg(long, short, value_enum, default_value_t)]
        output: OutputFormat,
    },

    /// Export every vote as CSV ("-" for stdout)
    Export {
        /// Output file path
        filepath: String,
    },

    /// Remove every vote from the queue
    Clear {
        /// Also discard votes that were never delivered
        #[arg(long)]
        force: bool,
    },

    /// Remove votes the remote has confirmed
    Purge,

    /// Watch connectivity and deliver votes as soon as the remote is reachable
    Watch {
        /// Retry pending votes every N seconds while online (overrides config)
        #[arg(long, value_name = "SECS")]
        retry_secs: Option<u64>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
