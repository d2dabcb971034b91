// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{
    self, MONTHS, MonthlySummary, PlatformRevenue, ProductivityMetrics, YearlySummary,
};
use crate::snapshot::Snapshot;
use crate::utils::{
    fmt_compact, fmt_ratio, fmt_won, fmt_won_decimal, maybe_print_json, month_or_current,
    pretty_table, year_or_current,
};
use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let Some((name, sub)) = m.subcommand() else {
        return Ok(());
    };
    let snap = Snapshot::load(conn)?;
    match name {
        "yearly" => yearly(&snap, sub)?,
        "monthly" => monthly(&snap, sub)?,
        "productivity" => productivity(&snap, sub)?,
        "matrix" => matrix(&snap, sub)?,
        "platforms" => platforms(&snap, sub)?,
        "dashboard" => dashboard(&snap, sub)?,
        _ => {}
    }
    Ok(())
}

fn months_header(first: &str) -> Vec<String> {
    let mut h = vec![first.to_string()];
    h.extend((1..=MONTHS).map(|m| m.to_string()));
    h.push("Total".to_string());
    h
}

fn yearly(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_or_current(sub)?;
    let s = engine::yearly_summary(&snap.revenues, &snap.expenses, year);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let mut rows = Vec::new();
    for m in 1..=MONTHS as u32 {
        rows.push(vec![
            m.to_string(),
            fmt_won(s.revenue_in(m)),
            fmt_won(s.expense_in(m)),
            fmt_won(s.net_in(m)),
        ]);
    }
    rows.push(vec![
        "Total".to_string(),
        fmt_won(s.total_revenue),
        fmt_won(s.total_expense),
        fmt_won(s.net_revenue),
    ]);
    println!("{} yearly summary", year);
    println!("{}", pretty_table(&["Month", "Revenue", "Expense", "Net"], rows));
    Ok(())
}

fn monthly(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_or_current(sub)?;
    let month = month_or_current(sub)?;
    let s = engine::monthly_summary(
        &snap.revenues,
        &snap.expenses,
        &snap.contents,
        &snap.catalog,
        year,
        month,
    );
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    print_monthly(&s);
    Ok(())
}

fn print_monthly(s: &MonthlySummary) {
    let rows = vec![
        vec!["Revenue".to_string(), fmt_won(s.monthly_revenue)],
        vec!["Expense".to_string(), fmt_won(s.monthly_expense)],
        vec!["Net".to_string(), fmt_won(s.monthly_net_revenue)],
        vec!["Contents".to_string(), s.monthly_contents.to_string()],
    ];
    println!("{}-{:02}", s.year, s.month);
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    print_platform_revenue(&s.revenue_by_platform, s.unmatched_revenue);
}

fn print_platform_revenue(list: &[PlatformRevenue], unmatched: i64) {
    let mut rows: Vec<Vec<String>> = list
        .iter()
        .filter(|p| !p.is_zero())
        .map(|p| vec![p.platform.clone(), fmt_won(p.amount)])
        .collect();
    if unmatched > 0 {
        rows.push(vec!["(not in catalog)".to_string(), fmt_won(unmatched)]);
    }
    if !rows.is_empty() {
        println!("{}", pretty_table(&["Platform", "Revenue"], rows));
    }
}

fn productivity_rows(p: &ProductivityMetrics) -> Vec<Vec<String>> {
    vec![
        vec!["Original contents".to_string(), p.original_contents.to_string()],
        vec!["Total uploads".to_string(), p.total_uploads.to_string()],
        vec!["Recycle ratio".to_string(), fmt_ratio(&p.recycle_ratio)],
        vec![
            "Revenue per content".to_string(),
            fmt_won_decimal(&p.revenue_per_content),
        ],
        vec![
            "Revenue per upload".to_string(),
            fmt_won_decimal(&p.revenue_per_upload),
        ],
    ]
}

fn productivity(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_or_current(sub)?;
    let p = engine::productivity_metrics(&snap.revenues, &snap.contents, year);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &p)? {
        return Ok(());
    }
    println!("{} productivity", year);
    println!("{}", pretty_table(&["Metric", "Value"], productivity_rows(&p)));
    let status_rows = p
        .contents_by_status
        .iter()
        .map(|(s, n)| vec![s.to_string(), n.to_string()])
        .collect();
    println!("{}", pretty_table(&["Status", "Contents"], status_rows));
    Ok(())
}

fn matrix(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_or_current(sub)?;
    let mx = engine::platform_channel_matrix(&snap.revenues, &snap.catalog, &snap.channels, year);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &mx)? {
        return Ok(());
    }

    let mut rows: Vec<Vec<String>> = Vec::new();
    for p in &mx.platforms {
        for ch in mx.grid_channels(p) {
            let mut row = vec![format!("{} / {}", p, ch)];
            let mut total = 0i64;
            for m in 1..=MONTHS as u32 {
                match mx.cell(p, &ch, m) {
                    Some(v) => {
                        total = total.saturating_add(v);
                        row.push(v.to_string());
                    }
                    None => row.push("-".to_string()),
                }
            }
            row.push(total.to_string());
            rows.push(row);
        }
        let mut subtotal = vec![format!("{} total", p)];
        let mut total = 0i64;
        for m in 1..=MONTHS as u32 {
            let v = mx.platform_total(p, m);
            total = total.saturating_add(v);
            subtotal.push(v.to_string());
        }
        subtotal.push(total.to_string());
        rows.push(subtotal);
    }
    let mut footer = vec!["All platforms".to_string()];
    let mut grand = 0i64;
    for m in 1..=MONTHS as u32 {
        let v = mx.month_total(m);
        grand = grand.saturating_add(v);
        footer.push(v.to_string());
    }
    footer.push(fmt_won(grand));
    rows.push(footer);

    let headers = months_header("Platform / Channel");
    let hdr: Vec<&str> = headers.iter().map(|s| s.as_str()).collect();
    println!("{} revenue by platform and channel", year);
    println!("{}", pretty_table(&hdr, rows));
    Ok(())
}

fn platforms(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_or_current(sub)?;
    let list = engine::platform_efficiency(&snap.revenues, &snap.contents, &snap.catalog, year);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &list)? {
        return Ok(());
    }
    let rows = list
        .iter()
        .map(|p| {
            vec![
                p.platform.clone(),
                fmt_won(p.revenue),
                p.uploads.to_string(),
                fmt_won_decimal(&p.revenue_per_upload),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Platform", "Revenue", "Uploads", "Per upload"], rows)
    );
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub month: MonthlySummary,
    pub year: YearlySummary,
    pub productivity: ProductivityMetrics,
    pub annual_revenue_by_platform: Vec<PlatformRevenue>,
}

pub fn build_dashboard(snap: &Snapshot, year: i32, month: u32) -> Dashboard {
    Dashboard {
        month: engine::monthly_summary(
            &snap.revenues,
            &snap.expenses,
            &snap.contents,
            &snap.catalog,
            year,
            month,
        ),
        year: engine::yearly_summary(&snap.revenues, &snap.expenses, year),
        productivity: engine::productivity_metrics(&snap.revenues, &snap.contents, year),
        annual_revenue_by_platform: engine::revenue_by_platform(
            &snap.revenues,
            &snap.catalog,
            year,
            None,
        ),
    }
}

fn dashboard(snap: &Snapshot, sub: &clap::ArgMatches) -> Result<()> {
    let year = year_or_current(sub)?;
    let month = month_or_current(sub)?;
    let d = build_dashboard(snap, year, month);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &d)? {
        return Ok(());
    }

    let rows = vec![
        vec![
            format!("{}-{:02} net", year, month),
            fmt_won(d.month.monthly_net_revenue),
            fmt_compact(d.month.monthly_net_revenue),
        ],
        vec![
            "Revenue".to_string(),
            fmt_won(d.month.monthly_revenue),
            fmt_compact(d.month.monthly_revenue),
        ],
        vec![
            "Expense".to_string(),
            fmt_won(d.month.monthly_expense),
            fmt_compact(d.month.monthly_expense),
        ],
        vec![
            format!("{} net", year),
            fmt_won(d.year.net_revenue),
            fmt_compact(d.year.net_revenue),
        ],
        vec![
            "Contents this month".to_string(),
            d.month.monthly_contents.to_string(),
            String::new(),
        ],
    ];
    println!("{}", pretty_table(&["", "Amount", "Compact"], rows));
    println!(
        "{}",
        pretty_table(&["Productivity", "Value"], productivity_rows(&d.productivity))
    );
    if d.year.total_revenue == 0 && d.productivity.original_contents == 0 {
        println!("No data for {} yet. Start with `platform add` and `revenue set`.", year);
    } else {
        print_platform_revenue(&d.annual_revenue_by_platform, 0);
    }
    Ok(())
}
