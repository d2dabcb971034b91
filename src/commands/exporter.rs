// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::snapshot::{load_expenses, load_revenues};
use crate::utils::parse_year;
use anyhow::{Context, Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let Some((kind, sub)) = m.subcommand() else {
        return Ok(());
    };
    let fmt = sub.get_one::<String>("format").unwrap().trim().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let year = match sub.get_one::<String>("year") {
        Some(y) => Some(parse_year(y)?),
        None => None,
    };
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    match kind {
        "revenues" => export_revenues(conn, &fmt, out, year)?,
        "expenses" => export_expenses(conn, &fmt, out, year)?,
        _ => return Ok(()),
    }
    println!("Exported {} to {}", kind, out);
    Ok(())
}

fn export_revenues(conn: &Connection, fmt: &str, out: &str, year: Option<i32>) -> Result<()> {
    let rows: Vec<_> = load_revenues(conn)?
        .into_iter()
        .filter(|r| year.is_none_or(|y| r.year == y))
        .collect();
    if fmt == "json" {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)
            .with_context(|| format!("Write {}", out))?;
        return Ok(());
    }
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Write {}", out))?;
    wtr.write_record(["year", "month", "platform", "channel", "amount"])?;
    for r in rows {
        wtr.write_record([
            r.year.to_string(),
            r.month.to_string(),
            r.platform,
            r.channel_name.unwrap_or_default(),
            r.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn export_expenses(conn: &Connection, fmt: &str, out: &str, year: Option<i32>) -> Result<()> {
    let rows: Vec<_> = load_expenses(conn)?
        .into_iter()
        .filter(|e| year.is_none_or(|y| e.year == y))
        .collect();
    if fmt == "json" {
        std::fs::write(out, serde_json::to_string_pretty(&rows)?)
            .with_context(|| format!("Write {}", out))?;
        return Ok(());
    }
    let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Write {}", out))?;
    wtr.write_record([
        "date",
        "year",
        "month",
        "name",
        "category",
        "quantity",
        "unit_price",
        "memo",
    ])?;
    for e in rows {
        wtr.write_record([
            e.date.map(|d| d.to_string()).unwrap_or_default(),
            e.year.to_string(),
            e.month.to_string(),
            e.name.unwrap_or_default(),
            e.category,
            e.quantity.to_string(),
            e.unit_price.to_string(),
            e.memo.unwrap_or_default(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
