// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::snapshot::Snapshot;
use crate::utils::{fmt_won, pretty_table};
use anyhow::Result;
use rusqlite::Connection;
use std::collections::BTreeMap;

pub fn handle(conn: &Connection) -> Result<()> {
    let snap = Snapshot::load(conn)?;
    let rows = diagnose(&snap);
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        tracing::warn!(issues = rows.len(), "doctor found data-quality issues");
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// One `[issue, detail]` row per finding.
pub fn diagnose(snap: &Snapshot) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let known = |p: &str| snap.catalog.contains(p);

    // 1) Revenue booked on platforms missing from the catalog
    let mut unmatched: BTreeMap<(i32, &str), i64> = BTreeMap::new();
    for r in snap.revenues.iter().filter(|r| !known(&r.platform)) {
        let e = unmatched.entry((r.year, r.platform.as_str())).or_insert(0);
        *e = e.saturating_add(r.amount);
    }
    for ((year, platform), amount) in unmatched {
        rows.push(vec![
            "revenue_platform_not_in_catalog".into(),
            format!("{} {} ({})", year, platform, fmt_won(amount)),
        ]);
    }

    // 2) Content targets outside the catalog
    for c in &snap.contents {
        for p in c.upload_platforms() {
            if !known(p) {
                rows.push(vec![
                    "content_platform_not_in_catalog".into(),
                    format!("content {} -> {}", c.id, p),
                ]);
            }
        }
    }

    // 3) Channels on unknown platforms
    for ch in snap.channels.iter().filter(|c| !known(&c.platform)) {
        rows.push(vec![
            "channel_platform_not_in_catalog".into(),
            format!("{} on {}", ch.channel_name, ch.platform),
        ]);
    }

    // 4) Months that aggregation will skip
    let bad_month = |m: u32| !(1..=12).contains(&m);
    for r in snap.revenues.iter().filter(|r| bad_month(r.month)) {
        rows.push(vec![
            "revenue_month_out_of_range".into(),
            format!("revenue {} month {}", r.id, r.month),
        ]);
    }
    for e in snap.expenses.iter().filter(|e| bad_month(e.month)) {
        rows.push(vec![
            "expense_month_out_of_range".into(),
            format!("expense {} month {}", e.id, e.month),
        ]);
    }
    for c in snap.contents.iter().filter(|c| bad_month(c.upload_month)) {
        rows.push(vec![
            "content_month_out_of_range".into(),
            format!("content {} month {}", c.id, c.upload_month),
        ]);
    }
    rows
}
