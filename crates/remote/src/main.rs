// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! vq-remote: WebSocket authority that receives queued votes.
//!
//! Stores every delivered vote once, keyed by receipt code, and acknowledges
//! each batch so `vq` clients can mark it synced.

mod server;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Collects votes delivered by vq clients
#[derive(Parser, Debug)]
#[command(name = "vq-remote", version)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:7890")]
    bind: SocketAddr,

    /// Directory holding received.db
    #[arg(short, long, default_value = ".")]
    data: PathBuf,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = state::ServerState::new(&args.data)?;
    info!(
        data = %args.data.display(),
        votes = state.received_count().await?,
        "vq-remote starting"
    );

    tokio::select! {
        result = server::run(args.bind, state) => result?,
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }

    Ok(())
}
