// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::RevenueRecord;
use crate::snapshot::load_revenues;
use crate::utils::{
    fmt_won, maybe_print_json, opt_text, parse_amount, parse_month_number, parse_year,
    pretty_table, require_platform, year_or_current,
};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let n = conn.execute("DELETE FROM revenues WHERE id=?1", params![id])?;
            if n == 0 {
                return Err(anyhow!("Revenue {} not found", id));
            }
            println!("Removed revenue {}", id);
        }
        _ => {}
    }
    Ok(())
}

/// Writes one grid cell. A positive amount upserts it; zero deletes it.
fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let year = parse_year(sub.get_one::<String>("year").unwrap())?;
    let month = parse_month_number(sub.get_one::<String>("month").unwrap())?;
    let platform = sub.get_one::<String>("platform").unwrap().trim().to_string();
    let channel = opt_text(sub, "channel").unwrap_or_default();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    require_platform(conn, &platform)?;

    if !channel.is_empty() {
        let known: Option<i64> = conn
            .query_row(
                "SELECT id FROM channels WHERE platform=?1 AND channel_name=?2",
                params![&platform, &channel],
                |r| r.get(0),
            )
            .optional()?;
        if known.is_none() {
            tracing::warn!(%platform, %channel, "revenue booked on an unregistered channel");
        }
    }

    let label = if channel.is_empty() {
        platform.clone()
    } else {
        format!("{} / {}", platform, channel)
    };

    if amount > 0 {
        conn.execute(
            "INSERT INTO revenues(year, month, platform, channel_name, amount)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(year, month, platform, channel_name) DO UPDATE SET amount=excluded.amount",
            params![year, month, &platform, &channel, amount],
        )?;
        println!("Revenue {}-{:02} {} = {}", year, month, label, fmt_won(amount));
    } else {
        let n = conn.execute(
            "DELETE FROM revenues WHERE year=?1 AND month=?2 AND platform=?3 AND channel_name=?4",
            params![year, month, &platform, &channel],
        )?;
        if n > 0 {
            println!("Cleared revenue {}-{:02} {}", year, month, label);
        } else {
            println!("No revenue recorded for {}-{:02} {}", year, month, label);
        }
    }
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = year_or_current(sub)?;
    let month = match sub.get_one::<String>("month") {
        Some(m) => Some(parse_month_number(m)?),
        None => None,
    };
    let platform = opt_text(sub, "platform");

    let data: Vec<RevenueRecord> = load_revenues(conn)?
        .into_iter()
        .filter(|r| r.year == year)
        .filter(|r| month.is_none_or(|m| r.month == m))
        .filter(|r| platform.as_ref().is_none_or(|p| &r.platform == p))
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    format!("{}-{:02}", r.year, r.month),
                    r.platform.clone(),
                    r.channel_name.clone().unwrap_or_default(),
                    fmt_won(r.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Month", "Platform", "Channel", "Amount"], rows)
        );
    }
    Ok(())
}
