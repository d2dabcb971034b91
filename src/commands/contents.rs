// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{ContentRecord, ContentStatus, split_platforms};
use crate::snapshot::load_contents;
use crate::utils::{
    maybe_print_json, month_or_current, opt_text, parse_year, platform_exists, pretty_table,
    require_platform, year_or_current,
};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let status: ContentStatus = sub.get_one::<String>("status").unwrap().parse()?;
            let n = conn.execute(
                "UPDATE contents SET status=?1 WHERE id=?2",
                params![status.as_str(), id],
            )?;
            if n == 0 {
                return Err(anyhow!("Content {} not found", id));
            }
            println!("Content {} is now {}", id, status);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let n = conn.execute("DELETE FROM contents WHERE id=?1", params![id])?;
            if n == 0 {
                return Err(anyhow!("Content {} not found", id));
            }
            println!("Removed content {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let brand = sub.get_one::<String>("brand").unwrap().trim().to_string();
    let main = sub.get_one::<String>("main_platform").unwrap().trim().to_string();
    if brand.is_empty() || main.is_empty() {
        return Err(anyhow!("Brand and main platform are required"));
    }
    require_platform(conn, &main)?;

    let distribute = opt_text(sub, "distribute")
        .map(|s| split_platforms(&s))
        .unwrap_or_default();
    for p in &distribute {
        if !platform_exists(conn, p)? {
            tracing::warn!(platform = %p, "distribution platform is not in the catalog");
        }
    }
    let status: ContentStatus = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<ContentStatus>())
        .transpose()?
        .unwrap_or(ContentStatus::Planning);
    let year = year_or_current(sub)?;
    let month = month_or_current(sub)?;
    let day = sub.get_one::<u32>("day").copied();

    conn.execute(
        "INSERT INTO contents(brand, main_platform, distribute_platforms, status, upload_year,
                              upload_month, upload_day, title, topic, editor, memo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            &brand,
            &main,
            distribute.join(","),
            status.as_str(),
            year,
            month,
            day,
            opt_text(sub, "title"),
            opt_text(sub, "topic"),
            opt_text(sub, "editor"),
            opt_text(sub, "memo"),
        ],
    )?;
    println!(
        "Added content for {} on {} ({}-{:02}, {})",
        brand, main, year, month, status
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let year = match sub.get_one::<String>("year") {
        Some(y) => Some(parse_year(y)?),
        None => None,
    };
    let status: Option<ContentStatus> = match sub.get_one::<String>("status") {
        Some(s) => Some(s.parse()?),
        None => None,
    };

    let data: Vec<ContentRecord> = load_contents(conn)?
        .into_iter()
        .filter(|c| year.is_none_or(|y| c.upload_year == y))
        .filter(|c| status.is_none_or(|s| c.status == s))
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|c| {
                let when = match c.upload_day {
                    Some(d) => format!("{}-{:02}-{:02}", c.upload_year, c.upload_month, d),
                    None => format!("{}-{:02}", c.upload_year, c.upload_month),
                };
                vec![
                    c.id.to_string(),
                    when,
                    c.brand.clone(),
                    c.main_platform.clone(),
                    c.distribute_platforms.join(", "),
                    c.upload_count().to_string(),
                    c.status.to_string(),
                    c.title.clone().or_else(|| c.topic.clone()).unwrap_or_default(),
                    c.editor.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "ID", "Upload", "Brand", "Main", "Distribute", "Uploads", "Status", "Title",
                    "Editor"
                ],
                rows
            )
        );
    }
    Ok(())
}
