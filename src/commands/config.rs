// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::remote::{ENDPOINT_KEY, SPREADSHEET_KEY};
use crate::utils::{get_setting, pretty_table, set_setting};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = sub.get_one::<String>("key").unwrap();
            let value = sub.get_one::<String>("value").unwrap().trim();
            set_setting(conn, key, value)?;
            tracing::info!(key = %key, "setting updated");
            println!("Set {} = {}", key, value);
        }
        Some(("show", _)) => {
            let mut data = Vec::new();
            for key in [ENDPOINT_KEY, SPREADSHEET_KEY] {
                let v = get_setting(conn, key)?.unwrap_or_else(|| "(unset)".to_string());
                data.push(vec![key.to_string(), v]);
            }
            println!("{}", pretty_table(&["Key", "Value"], data));
        }
        _ => {}
    }
    Ok(())
}
