// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("vq").chain(args.iter().copied()))
}

#[test]
fn submit_collects_repeated_selections() {
    let cli = parse(&[
        "submit", "-e", "e-1", "-t", "Board", "-s", "B1=A2", "--select", "B2=C1",
    ])
    .unwrap();
    match cli.command {
        Command::Submit {
            election,
            title,
            selections,
            offline,
            output,
        } => {
            assert_eq!(election, "e-1");
            assert_eq!(title, "Board");
            assert_eq!(selections, vec!["B1=A2", "B2=C1"]);
            assert!(!offline);
            assert_eq!(output, OutputFormat::Text);
        }
        _ => unreachable!("expected submit"),
    }
}

#[parameterized(
    missing_selection = { &["submit", "-e", "e-1", "-t", "Board"] },
    blank_election = { &["submit", "-e", "  ", "-t", "Board", "-s", "B1=A2"] },
    blank_title = { &["submit", "-e", "e-1", "-t", "", "-s", "B1=A2"] },
    bad_output = { &["stats", "-o", "yaml"] },
    verify_without_code = { &["verify"] },
)]
fn rejected_invocations(args: &[&str]) {
    assert!(parse(args).is_err());
}

#[test]
fn init_accepts_adapter_and_remote() {
    let cli = parse(&["init", "--adapter", "websocket", "--remote", "ws://h:1"]).unwrap();
    match cli.command {
        Command::Init {
            path,
            adapter,
            remote,
        } => {
            assert_eq!(path, None);
            assert_eq!(adapter, Some(AdapterKind::Websocket));
            assert_eq!(remote.as_deref(), Some("ws://h:1"));
        }
        _ => unreachable!("expected init"),
    }
}

#[test]
fn clear_defaults_to_unforced() {
    let cli = parse(&["clear"]).unwrap();
    assert!(matches!(cli.command, Command::Clear { force: false }));
}

#[test]
fn watch_retry_override() {
    let cli = parse(&["watch", "--retry-secs", "15"]).unwrap();
    assert!(matches!(
        cli.command,
        Command::Watch {
            retry_secs: Some(15)
        }
    ));
}

#[test]
fn command_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
