// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ExpenseRecord, RevenueRecord};
use crate::remote::{LedgerClient, RecordKind};
use crate::snapshot::{load_channels, load_contents, load_expenses, load_freelancers, load_revenues};
use crate::utils::year_or_current;
use anyhow::{Context, Result, anyhow};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub fn handle(conn: &mut Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("pull", sub)) => {
            let year = year_or_current(sub)?;
            let client = LedgerClient::from_settings(conn)?;
            let revenues = client.revenues(year)?;
            let expenses = client.expenses(year)?;
            let (r, e) = replace_year(conn, year, &revenues, &expenses)?;
            println!("Pulled {} revenues and {} expenses for {}", r, e, year);
        }
        Some(("push", sub)) => {
            let year = year_or_current(sub)?;
            let client = LedgerClient::from_settings(conn)?;
            let n = push(conn, &client, year)?;
            println!("Pushed {} records for {}", n, year);
        }
        Some(("rm", sub)) => {
            let kind: RecordKind = sub.get_one::<String>("kind").unwrap().parse()?;
            let id = *sub.get_one::<i64>("id").unwrap();
            let client = LedgerClient::from_settings(conn)?;
            remove(conn, &client, kind, id)?;
            println!("Removed {} {} locally and remotely", kind.as_str(), id);
        }
        _ => {}
    }
    Ok(())
}

fn table(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Revenue => "revenues",
        RecordKind::Expense => "expenses",
        RecordKind::Channel => "channels",
        RecordKind::Content => "contents",
        RecordKind::Freelancer => "freelancers",
    }
}

fn remote_ids(conn: &Connection, kind: RecordKind) -> Result<HashMap<i64, Option<i64>>> {
    let mut stmt = conn.prepare(&format!("SELECT id, remote_id FROM {}", table(kind)))?;
    let rows = stmt.query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, Option<i64>>(1)?)))?;
    let mut out = HashMap::new();
    for row in rows {
        let (id, remote) = row?;
        out.insert(id, remote);
    }
    Ok(out)
}

/// Wire form of a local record: the `id` field carries the remote id, and is
/// left out for rows the remote ledger has never seen.
pub fn push_payload<T: Serialize>(record: &T, remote_id: Option<i64>) -> Result<Value> {
    let mut value = serde_json::to_value(record)?;
    let obj = value
        .as_object_mut()
        .ok_or_else(|| anyhow!("record did not serialize to an object"))?;
    match remote_id {
        Some(id) => {
            obj.insert("id".into(), Value::from(id));
        }
        None => {
            obj.remove("id");
        }
    }
    Ok(value)
}

fn push_one<T: Serialize>(
    conn: &Connection,
    client: &LedgerClient,
    kind: RecordKind,
    local_id: i64,
    remote_id: Option<i64>,
    record: &T,
) -> Result<()> {
    let payload = push_payload(record, remote_id)?;
    let assigned = client
        .save(kind, &payload)
        .with_context(|| format!("push {} {}", kind.as_str(), local_id))?;
    if let Some(new_id) = assigned.filter(|_| remote_id.is_none()) {
        conn.execute(
            &format!("UPDATE {} SET remote_id=?1 WHERE id=?2", table(kind)),
            params![new_id, local_id],
        )?;
    }
    Ok(())
}

/// Saves the year's revenues, expenses and contents plus every channel and
/// freelancer to the remote ledger. Returns the number of records sent.
pub fn push(conn: &Connection, client: &LedgerClient, year: i32) -> Result<usize> {
    let mut n = 0;

    let ids = remote_ids(conn, RecordKind::Revenue)?;
    for r in load_revenues(conn)?.iter().filter(|r| r.year == year) {
        push_one(conn, client, RecordKind::Revenue, r.id, ids.get(&r.id).copied().flatten(), r)?;
        n += 1;
    }

    let ids = remote_ids(conn, RecordKind::Expense)?;
    for e in load_expenses(conn)?.iter().filter(|e| e.year == year) {
        push_one(conn, client, RecordKind::Expense, e.id, ids.get(&e.id).copied().flatten(), e)?;
        n += 1;
    }

    let ids = remote_ids(conn, RecordKind::Content)?;
    for c in load_contents(conn)?.iter().filter(|c| c.upload_year == year) {
        push_one(conn, client, RecordKind::Content, c.id, ids.get(&c.id).copied().flatten(), c)?;
        n += 1;
    }

    let ids = remote_ids(conn, RecordKind::Channel)?;
    for ch in load_channels(conn)? {
        let mut payload = push_payload(&ch, ids.get(&ch.id).copied().flatten())?;
        // credentials are kept out of local JSON output but belong to the remote sheet
        if let (Some(obj), Some(secret)) = (payload.as_object_mut(), &ch.credentials) {
            obj.insert("credentials".into(), Value::from(secret.clone()));
        }
        push_one(conn, client, RecordKind::Channel, ch.id, ids.get(&ch.id).copied().flatten(), &payload)?;
        n += 1;
    }

    let ids = remote_ids(conn, RecordKind::Freelancer)?;
    for f in load_freelancers(conn)? {
        push_one(conn, client, RecordKind::Freelancer, f.id, ids.get(&f.id).copied().flatten(), &f)?;
        n += 1;
    }

    tracing::info!(year, records = n, "local ledger pushed to remote");
    Ok(n)
}

/// Deletes the remote copy of a local row, then the row itself.
pub fn remove(conn: &Connection, client: &LedgerClient, kind: RecordKind, local_id: i64) -> Result<()> {
    let remote: Option<Option<i64>> = conn
        .query_row(
            &format!("SELECT remote_id FROM {} WHERE id=?1", table(kind)),
            params![local_id],
            |r| r.get(0),
        )
        .optional()?;
    let Some(remote) = remote else {
        return Err(anyhow!("{} {} not found", kind.as_str(), local_id));
    };
    match remote {
        Some(remote_id) => client.delete(kind, remote_id)?,
        None => tracing::warn!(kind = kind.as_str(), local_id, "row was never pushed; deleting locally only"),
    }
    conn.execute(
        &format!("DELETE FROM {} WHERE id=?1", table(kind)),
        params![local_id],
    )?;
    Ok(())
}

/// Swaps the local revenues/expenses of `year` for the given rows in one
/// transaction. Rows belonging to another year are skipped.
pub fn replace_year(
    conn: &mut Connection,
    year: i32,
    revenues: &[RevenueRecord],
    expenses: &[ExpenseRecord],
) -> Result<(usize, usize)> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM revenues WHERE year=?1", params![year])?;
    tx.execute("DELETE FROM expenses WHERE year=?1", params![year])?;

    let remote_id = |id: i64| if id > 0 { Some(id) } else { None };

    let mut rev_n = 0;
    for r in revenues.iter().filter(|r| r.year == year) {
        if r.platform.is_empty() {
            tracing::warn!(id = r.id, "skipping remote revenue without platform");
            continue;
        }
        // Duplicate cells are summed; the first remote id is kept.
        tx.execute(
            "INSERT INTO revenues(year, month, platform, channel_name, amount, remote_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(year, month, platform, channel_name)
             DO UPDATE SET amount=amount + excluded.amount",
            params![
                r.year,
                r.month,
                r.platform,
                r.channel_name.as_deref().unwrap_or(""),
                r.amount,
                remote_id(r.id)
            ],
        )?;
        rev_n += 1;
    }

    let mut exp_n = 0;
    for e in expenses.iter().filter(|e| e.year == year) {
        tx.execute(
            "INSERT INTO expenses(year, month, name, category, quantity, unit_price, date, memo, remote_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                e.year,
                e.month,
                e.name,
                e.category,
                e.quantity,
                e.unit_price,
                e.date.map(|d| d.to_string()),
                e.memo,
                remote_id(e.id)
            ],
        )?;
        exp_n += 1;
    }
    tx.commit()?;
    tracing::info!(year, revenues = rev_n, expenses = exp_n, "local ledger replaced from remote");
    Ok((rev_n, exp_n))
}
