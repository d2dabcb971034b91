// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::ChannelRecord;
use crate::snapshot::load_channels;
use crate::utils::{maybe_print_json, opt_text, pretty_table, require_platform};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let platform = sub.get_one::<String>("platform").unwrap().trim();
            let name = sub.get_one::<String>("name").unwrap().trim();
            let n = conn.execute(
                "DELETE FROM channels WHERE platform=?1 AND channel_name=?2",
                params![platform, name],
            )?;
            if n == 0 {
                return Err(anyhow!("Channel '{}' on {} not found", name, platform));
            }
            println!("Removed channel '{}' ({})", name, platform);
        }
        Some(("brands", sub)) => brands(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let platform = sub.get_one::<String>("platform").unwrap().trim();
    let name = sub.get_one::<String>("name").unwrap().trim();
    let brand = sub.get_one::<String>("brand").unwrap().trim();
    if name.is_empty() || brand.is_empty() {
        return Err(anyhow!("Channel name and brand are required"));
    }
    require_platform(conn, platform)?;
    conn.execute(
        "INSERT INTO channels(brand, brand_color, platform, channel_name, credentials)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            brand,
            opt_text(sub, "color"),
            platform,
            name,
            opt_text(sub, "credentials")
        ],
    )?;
    println!("Added channel '{}' on {} (brand: {})", name, platform, brand);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let platform = opt_text(sub, "platform");
    let data: Vec<ChannelRecord> = load_channels(conn)?
        .into_iter()
        .filter(|c| platform.as_ref().is_none_or(|p| &c.platform == p))
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|c| {
                vec![
                    c.platform.clone(),
                    c.channel_name.clone(),
                    c.brand.clone(),
                    c.brand_color.clone().unwrap_or_default(),
                    if c.credentials.is_some() { "yes" } else { "" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Platform", "Channel", "Brand", "Color", "Credentials"], rows)
        );
    }
    Ok(())
}

fn brands(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = ChannelRecord::brands(&load_channels(conn)?);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .into_iter()
            .map(|b| vec![b.name, b.color.unwrap_or_default()])
            .collect();
        println!("{}", pretty_table(&["Brand", "Color"], rows));
    }
    Ok(())
}
