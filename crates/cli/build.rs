// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

/// Environment variables read by `vq`, with a one-line description each.
const ENV_VARS: &[(&str, &str)] = &[
    ("VQ_DIR", "Path to a `.votequeue` directory, overriding discovery."),
    ("VQ_OFFLINE", "Set to `1` to treat the remote as unreachable."),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = std::env::var("OUT_DIR")?;
    let out = std::path::Path::new(&out_dir).join("env_vars.rs");
    let mut file = std::fs::File::create(out)?;

    for (name, doc) in ENV_VARS {
        writeln!(file, "/// {doc}")?;
        writeln!(file, "pub const {name}: &str = \"{name}\";")?;
    }

    Ok(())
}
