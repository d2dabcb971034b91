// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ContentStatus, split_platforms};
use crate::utils::{parse_amount, parse_date, parse_month_number, parse_year};
use anyhow::{Context, Result, anyhow};
use chrono::Datelike;
use csv::ReaderBuilder;
use rusqlite::{Connection, params};
use serde::Deserialize;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    let Some((kind, sub)) = m.subcommand() else {
        return Ok(());
    };
    let path = sub.get_one::<String>("path").unwrap().trim();
    let n = match kind {
        "revenues" => import_revenues(conn, path)?,
        "expenses" => import_expenses(conn, path)?,
        "contents" => import_contents(conn, path)?,
        _ => return Ok(()),
    };
    tracing::info!(kind, rows = n, path, "import finished");
    println!("Imported {} {} from {}", n, kind, path);
    Ok(())
}

fn blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn reader(path: &str) -> Result<csv::Reader<std::fs::File>> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Open CSV {}", path))
}

#[derive(Debug, Deserialize)]
struct RevenueRow {
    year: String,
    month: String,
    platform: String,
    #[serde(default)]
    channel: Option<String>,
    amount: String,
}

/// Rows upsert their (year, month, platform, channel) cell; an explicit 0 is kept.
fn import_revenues(conn: &mut Connection, path: &str) -> Result<usize> {
    let mut rdr = reader(path)?;
    let tx = conn.transaction()?;
    let mut n = 0;
    for (i, row) in rdr.deserialize::<RevenueRow>().enumerate() {
        let line = i + 2;
        let row = row.with_context(|| format!("Malformed revenue row at line {}", line))?;
        let year = parse_year(&row.year).with_context(|| format!("line {}", line))?;
        let month = parse_month_number(&row.month).with_context(|| format!("line {}", line))?;
        let amount = parse_amount(&row.amount).with_context(|| format!("line {}", line))?;
        if row.platform.is_empty() {
            return Err(anyhow!("Missing platform at line {}", line));
        }
        tx.execute(
            "INSERT INTO revenues(year, month, platform, channel_name, amount)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(year, month, platform, channel_name) DO UPDATE SET amount=excluded.amount",
            params![
                year,
                month,
                row.platform,
                blank(&row.channel).unwrap_or(""),
                amount
            ],
        )?;
        n += 1;
    }
    tx.commit()?;
    Ok(n)
}

#[derive(Debug, Deserialize)]
struct ExpenseRow {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    year: Option<String>,
    #[serde(default)]
    month: Option<String>,
    #[serde(default)]
    name: Option<String>,
    category: String,
    #[serde(default)]
    quantity: Option<String>,
    unit_price: String,
    #[serde(default)]
    memo: Option<String>,
}

fn import_expenses(conn: &mut Connection, path: &str) -> Result<usize> {
    let mut rdr = reader(path)?;
    let tx = conn.transaction()?;
    let mut n = 0;
    for (i, row) in rdr.deserialize::<ExpenseRow>().enumerate() {
        let line = i + 2;
        let row = row.with_context(|| format!("Malformed expense row at line {}", line))?;
        let date = blank(&row.date)
            .map(parse_date)
            .transpose()
            .with_context(|| format!("line {}", line))?;
        let (year, month) = match (blank(&row.year), blank(&row.month), date) {
            (Some(y), Some(m), _) => (parse_year(y)?, parse_month_number(m)?),
            (_, _, Some(d)) => (d.year(), d.month()),
            _ => {
                return Err(anyhow!(
                    "Expense at line {} needs either a date or a year and month",
                    line
                ));
            }
        };
        if row.category.is_empty() {
            return Err(anyhow!("Missing category at line {}", line));
        }
        let quantity: i64 = match blank(&row.quantity) {
            Some(q) => q
                .parse()
                .ok()
                .filter(|q: &i64| *q >= 1)
                .ok_or_else(|| anyhow!("Invalid quantity '{}' at line {}", q, line))?,
            None => 1,
        };
        let unit_price = parse_amount(&row.unit_price).with_context(|| format!("line {}", line))?;
        tx.execute(
            "INSERT INTO expenses(year, month, name, category, quantity, unit_price, date, memo)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                year,
                month,
                blank(&row.name),
                row.category,
                quantity,
                unit_price,
                date.map(|d| d.to_string()),
                blank(&row.memo)
            ],
        )?;
        n += 1;
    }
    tx.commit()?;
    Ok(n)
}

#[derive(Debug, Deserialize)]
struct ContentRow {
    brand: String,
    main_platform: String,
    #[serde(default)]
    distribute_platforms: Option<String>,
    #[serde(default)]
    status: Option<String>,
    upload_year: String,
    upload_month: String,
    #[serde(default)]
    upload_day: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    topic: Option<String>,
    #[serde(default)]
    editor: Option<String>,
    #[serde(default)]
    memo: Option<String>,
}

fn import_contents(conn: &mut Connection, path: &str) -> Result<usize> {
    let mut rdr = reader(path)?;
    let tx = conn.transaction()?;
    let mut n = 0;
    for (i, row) in rdr.deserialize::<ContentRow>().enumerate() {
        let line = i + 2;
        let row = row.with_context(|| format!("Malformed content row at line {}", line))?;
        if row.brand.is_empty() || row.main_platform.is_empty() {
            return Err(anyhow!("Brand and main_platform are required at line {}", line));
        }
        let status: ContentStatus = match blank(&row.status) {
            Some(s) => s.parse().with_context(|| format!("line {}", line))?,
            None => ContentStatus::Planning,
        };
        let year = parse_year(&row.upload_year).with_context(|| format!("line {}", line))?;
        let month =
            parse_month_number(&row.upload_month).with_context(|| format!("line {}", line))?;
        let day: Option<u32> = match blank(&row.upload_day) {
            Some(d) => Some(
                d.parse()
                    .ok()
                    .filter(|d| (1..=31).contains(d))
                    .ok_or_else(|| anyhow!("Invalid upload_day '{}' at line {}", d, line))?,
            ),
            None => None,
        };
        let distribute = blank(&row.distribute_platforms)
            .map(split_platforms)
            .unwrap_or_default();
        tx.execute(
            "INSERT INTO contents(brand, main_platform, distribute_platforms, status, upload_year,
                                  upload_month, upload_day, title, topic, editor, memo)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                row.brand,
                row.main_platform,
                distribute.join(","),
                status.as_str(),
                year,
                month,
                day,
                blank(&row.title),
                blank(&row.topic),
                blank(&row.editor),
                blank(&row.memo)
            ],
        )?;
        n += 1;
    }
    tx.commit()?;
    Ok(n)
}
