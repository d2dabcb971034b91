// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::snapshot::load_freelancers;
use crate::utils::{fmt_won, maybe_print_json, opt_text, parse_amount, pretty_table};
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if name.is_empty() {
                return Err(anyhow!("Freelancer name must not be empty"));
            }
            let price = parse_amount(sub.get_one::<String>("price").unwrap())?;
            conn.execute(
                "INSERT INTO freelancers(name, contact, assigned_channel, weekly_assigned,
                                         completed_count, price_per_video, edit_program, memo)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    name,
                    opt_text(sub, "contact"),
                    opt_text(sub, "channel"),
                    *sub.get_one::<i64>("weekly").unwrap_or(&0),
                    *sub.get_one::<i64>("completed").unwrap_or(&0),
                    price,
                    opt_text(sub, "program"),
                    opt_text(sub, "memo"),
                ],
            )?;
            println!("Added freelancer '{}' ({} per video)", name, fmt_won(price));
        }
        Some(("list", sub)) => {
            let data = load_freelancers(conn)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .iter()
                    .map(|f| {
                        vec![
                            f.id.to_string(),
                            f.name.clone(),
                            f.contact.clone().unwrap_or_default(),
                            f.assigned_channel.clone().unwrap_or_default(),
                            format!("{}/{}", f.completed_count, f.weekly_assigned),
                            fmt_won(f.price_per_video),
                            f.edit_program.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(
                        &["ID", "Name", "Contact", "Channel", "Done/Week", "Per video", "Program"],
                        rows
                    )
                );
            }
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let n = conn.execute("DELETE FROM freelancers WHERE id=?1", params![id])?;
            if n == 0 {
                return Err(anyhow!("Freelancer {} not found", id));
            }
            println!("Removed freelancer {}", id);
        }
        _ => {}
    }
    Ok(())
}
