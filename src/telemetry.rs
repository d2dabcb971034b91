// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt};

pub const LOG_ENV: &str = "CREATORLEDGER_LOG";

fn default_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber. Logs go to stderr so `--json` output stays clean.
pub fn init(verbosity: u8) -> Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbosity).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    fmt()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}
