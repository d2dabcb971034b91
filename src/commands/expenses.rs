// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{MONTHS, expense_month_total, expense_table, recent_expenses};
use crate::models::ExpenseRecord;
use crate::snapshot::load_expenses;
use crate::utils::{
    fmt_won, maybe_print_json, opt_text, parse_amount, parse_date, parse_month_number, parse_year,
    pretty_table, year_or_current,
};
use anyhow::{Result, anyhow};
use chrono::Datelike;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let n = conn.execute("DELETE FROM expenses WHERE id=?1", params![id])?;
            if n == 0 {
                return Err(anyhow!("Expense {} not found", id));
            }
            println!("Removed expense {}", id);
        }
        Some(("table", sub)) => table(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    // Either an explicit day, an explicit year+month, or today.
    let (year, month, date) = match (sub.get_one::<String>("year"), sub.get_one::<String>("month")) {
        (Some(y), Some(m)) => (parse_year(y)?, parse_month_number(m)?, None),
        _ => {
            let date = match sub.get_one::<String>("date") {
                Some(d) => parse_date(d)?,
                None => chrono::Local::now().date_naive(),
            };
            (date.year(), date.month(), Some(date))
        }
    };
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    if category.is_empty() {
        return Err(anyhow!("Expense category must not be empty"));
    }
    let name = opt_text(sub, "name");
    let quantity = *sub.get_one::<i64>("quantity").unwrap_or(&1);
    let unit_price = parse_amount(sub.get_one::<String>("unit_price").unwrap())?;
    let memo = opt_text(sub, "memo");

    conn.execute(
        "INSERT INTO expenses(year, month, name, category, quantity, unit_price, date, memo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            year,
            month,
            name,
            &category,
            quantity,
            unit_price,
            date.map(|d| d.to_string()),
            memo
        ],
    )?;
    println!(
        "Recorded expense {}-{:02} {} x{} @ {} = {}",
        year,
        month,
        category,
        quantity,
        fmt_won(unit_price),
        fmt_won(quantity.saturating_mul(unit_price))
    );
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
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);

    let all: Vec<ExpenseRecord> = load_expenses(conn)?
        .into_iter()
        .filter(|e| e.year == year)
        .filter(|e| month.is_none_or(|m| e.month == m))
        .collect();
    let data: Vec<&ExpenseRecord> = recent_expenses(&all, limit);

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|e| {
                vec![
                    e.id.to_string(),
                    e.date
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| format!("{}-{:02}", e.year, e.month)),
                    e.name.clone().unwrap_or_default(),
                    e.category.clone(),
                    e.quantity.to_string(),
                    fmt_won(e.unit_price),
                    fmt_won(e.amount()),
                    e.memo.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Name", "Category", "Qty", "Unit", "Amount", "Memo"],
                rows
            )
        );
    }
    Ok(())
}

fn table(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = year_or_current(sub)?;
    let lines = expense_table(&load_expenses(conn)?, year);
    if maybe_print_json(json_flag, jsonl_flag, &lines)? {
        return Ok(());
    }

    let mut headers: Vec<String> = vec!["Name".into(), "Category".into()];
    headers.extend((1..=MONTHS).map(|m| format!("{}", m)));
    headers.push("Total".into());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for l in &lines {
        let mut row = vec![l.name.clone(), l.category.clone()];
        row.extend(l.monthly_totals.iter().map(|v| v.to_string()));
        row.push(fmt_won(l.total));
        rows.push(row);
    }
    let mut footer = vec!["Total".to_string(), String::new()];
    let mut grand = 0i64;
    for m in 1..=MONTHS as u32 {
        let t = expense_month_total(&lines, m);
        grand = grand.saturating_add(t);
        footer.push(t.to_string());
    }
    footer.push(fmt_won(grand));
    rows.push(footer);

    let hdr: Vec<&str> = headers.iter().map(|s| s.as_str()).collect();
    println!("{}", pretty_table(&hdr, rows));
    Ok(())
}
