// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::{Datelike, NaiveDate};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Money;

const UA: &str = concat!(
    "creatorledger/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/creatorledger)"
);

static AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^₩?\s*(\d{1,3}(,\d{3})+|\d+)(\.0+)?$").unwrap());

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_year(s: &str) -> Result<i32> {
    let y: i32 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid year '{}', expected YYYY", s))?;
    if !(1000..=9999).contains(&y) {
        return Err(anyhow!("Invalid year '{}', expected four digits", s));
    }
    Ok(y)
}

pub fn parse_month_number(s: &str) -> Result<u32> {
    let m: u32 = s
        .trim()
        .parse()
        .with_context(|| format!("Invalid month '{}', expected 1-12", s))?;
    if !(1..=12).contains(&m) {
        return Err(anyhow!("Invalid month number {}", m));
    }
    Ok(m)
}

/// Parses a non-negative whole amount such as `120000`, `120,000` or `₩120,000`.
pub fn parse_amount(s: &str) -> Result<Money> {
    let t = s.trim();
    if !AMOUNT.is_match(t) {
        return Err(anyhow!(
            "Invalid amount '{}', expected a non-negative whole number",
            s
        ));
    }
    let digits: String = t
        .split('.')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse::<Money>()
        .with_context(|| format!("Amount '{}' is out of range", s))
}

pub fn year_or_current(sub: &clap::ArgMatches) -> Result<i32> {
    match sub.get_one::<String>("year") {
        Some(y) => parse_year(y),
        None => Ok(chrono::Local::now().year()),
    }
}

pub fn month_or_current(sub: &clap::ArgMatches) -> Result<u32> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month_number(m),
        None => Ok(chrono::Local::now().month()),
    }
}

pub fn opt_text(sub: &clap::ArgMatches, id: &str) -> Option<String> {
    sub.get_one::<String>(id)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn group_thousands(n: u64) -> String {
    let raw = n.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `₩1,234,000`; negatives render as `-₩1,234,000`.
pub fn fmt_won(amount: Money) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}₩{}", sign, group_thousands(amount.unsigned_abs()))
}

/// Ratios are shown in whole won, rounded half away from zero.
pub fn fmt_won_decimal(d: &Decimal) -> String {
    let whole = d
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);
    fmt_won(whole)
}

/// Korean compact units: 억 (10^8) with one decimal, 만 (10^4) whole.
pub fn fmt_compact(amount: Money) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let n = amount.unsigned_abs();
    // pick the unit from the rounded 만 figure so 99,995,000 reads 1.0억
    let man = (n + 5_000) / 10_000;
    if n >= 100_000_000 || man >= 10_000 {
        let tenths = (n + 5_000_000) / 10_000_000;
        format!("{}{}.{}억", sign, tenths / 10, tenths % 10)
    } else if n >= 10_000 {
        format!("{}{}만", sign, man)
    } else {
        format!("{}{}", sign, group_thousands(n))
    }
}

pub fn fmt_ratio(d: &Decimal) -> String {
    format!("{:.1}x", d.round_dp(1))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn platform_exists(conn: &Connection, name: &str) -> Result<bool> {
    let hit: Option<i64> = conn
        .query_row(
            "SELECT id FROM platforms WHERE name=?1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    Ok(hit.is_some())
}

pub fn require_platform(conn: &Connection, name: &str) -> Result<()> {
    if !platform_exists(conn, name)? {
        return Err(anyhow!(
            "Platform '{}' not found (add it with `platform add --name {}`)",
            name,
            name
        ));
    }
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v.filter(|s| !s.trim().is_empty()))
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
