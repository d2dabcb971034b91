// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Materializes the full record set from the local store before aggregation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rusqlite::Connection;

use crate::models::{
    ChannelRecord, ContentRecord, ContentStatus, ExpenseRecord, Freelancer, PlatformCatalog,
    RevenueRecord, split_platforms,
};

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub catalog: PlatformCatalog,
    pub channels: Vec<ChannelRecord>,
    pub revenues: Vec<RevenueRecord>,
    pub expenses: Vec<ExpenseRecord>,
    pub contents: Vec<ContentRecord>,
}

impl Snapshot {
    pub fn load(conn: &Connection) -> Result<Snapshot> {
        let snap = Snapshot {
            catalog: load_catalog(conn)?,
            channels: load_channels(conn)?,
            revenues: load_revenues(conn)?,
            expenses: load_expenses(conn)?,
            contents: load_contents(conn)?,
        };
        tracing::debug!(
            platforms = snap.catalog.len(),
            channels = snap.channels.len(),
            revenues = snap.revenues.len(),
            expenses = snap.expenses.len(),
            contents = snap.contents.len(),
            "snapshot loaded"
        );
        Ok(snap)
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}

pub fn load_catalog(conn: &Connection) -> Result<PlatformCatalog> {
    let mut stmt = conn.prepare("SELECT name FROM platforms ORDER BY id")?;
    let rows = stmt.query_map([], |r| r.get::<_, String>(0))?;
    let mut names = Vec::new();
    for row in rows {
        names.push(row?);
    }
    Ok(PlatformCatalog::new(names))
}

pub fn load_channels(conn: &Connection) -> Result<Vec<ChannelRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, brand, brand_color, platform, channel_name, credentials
         FROM channels ORDER BY id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(ChannelRecord {
            id: r.get(0)?,
            brand: r.get(1)?,
            brand_color: r.get(2)?,
            platform: r.get(3)?,
            channel_name: r.get(4)?,
            credentials: r.get(5)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn load_revenues(conn: &Connection) -> Result<Vec<RevenueRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, year, month, platform, channel_name, amount
         FROM revenues ORDER BY year, month, platform, channel_name",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(RevenueRecord {
            id: r.get(0)?,
            year: r.get(1)?,
            month: r.get(2)?,
            platform: r.get(3)?,
            channel_name: non_empty(r.get(4)?),
            amount: r.get(5)?,
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}

pub fn load_expenses(conn: &Connection) -> Result<Vec<ExpenseRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, year, month, name, category, quantity, unit_price, date, memo
         FROM expenses ORDER BY year, month, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            ExpenseRecord {
                id: r.get(0)?,
                year: r.get(1)?,
                month: r.get(2)?,
                name: non_empty(r.get(3)?),
                category: r.get(4)?,
                quantity: r.get(5)?,
                unit_price: r.get(6)?,
                date: None,
                memo: non_empty(r.get(8)?),
            },
            r.get::<_, Option<String>>(7)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (mut rec, date) = row?;
        if let Some(d) = non_empty(date) {
            rec.date = Some(
                NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                    .with_context(|| format!("Invalid date '{}' on expense {}", d, rec.id))?,
            );
        }
        out.push(rec);
    }
    Ok(out)
}

pub fn load_contents(conn: &Connection) -> Result<Vec<ContentRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, brand, main_platform, distribute_platforms, status, upload_year,
                upload_month, upload_day, title, topic, editor, memo
         FROM contents ORDER BY upload_year, upload_month, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok((
            r.get::<_, i64>(0)?,
            r.get::<_, String>(1)?,
            r.get::<_, String>(2)?,
            r.get::<_, String>(3)?,
            r.get::<_, String>(4)?,
            r.get::<_, i32>(5)?,
            r.get::<_, u32>(6)?,
            r.get::<_, Option<u32>>(7)?,
            r.get::<_, Option<String>>(8)?,
            r.get::<_, Option<String>>(9)?,
            r.get::<_, Option<String>>(10)?,
            r.get::<_, Option<String>>(11)?,
        ))
    })?;
    let mut out = Vec::new();
    for row in rows {
        let (id, brand, main, dist, status, year, month, day, title, topic, editor, memo) = row?;
        let status: ContentStatus = status
            .parse()
            .with_context(|| format!("Invalid status on content {}", id))?;
        out.push(ContentRecord {
            id,
            brand,
            main_platform: main,
            distribute_platforms: split_platforms(&dist),
            status,
            upload_year: year,
            upload_month: month,
            upload_day: day,
            title: non_empty(title),
            topic: non_empty(topic),
            editor: non_empty(editor),
            memo: non_empty(memo),
        });
    }
    Ok(out)
}

pub fn load_freelancers(conn: &Connection) -> Result<Vec<Freelancer>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, contact, assigned_channel, weekly_assigned, completed_count,
                price_per_video, edit_program, memo
         FROM freelancers ORDER BY name, id",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(Freelancer {
            id: r.get(0)?,
            name: r.get(1)?,
            contact: non_empty(r.get(2)?),
            assigned_channel: non_empty(r.get(3)?),
            weekly_assigned: r.get(4)?,
            completed_count: r.get(5)?,
            price_per_video: r.get(6)?,
            edit_program: non_empty(r.get(7)?),
            memo: non_empty(r.get(8)?),
        })
    })?;
    let mut out = Vec::new();
    for row in rows {
        out.push(row?);
    }
    Ok(out)
}
