// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::{Result, anyhow};
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            if name.is_empty() {
                return Err(anyhow!("Platform name must not be empty"));
            }
            conn.execute("INSERT INTO platforms(name) VALUES (?1)", params![name])?;
            println!("Added platform '{}'", name);
        }
        Some(("list", _)) => {
            let mut stmt = conn.prepare(
                "SELECT p.name,
                        (SELECT COUNT(*) FROM channels c WHERE c.platform=p.name),
                        p.created_at
                 FROM platforms p ORDER BY p.id",
            )?;
            let rows = stmt.query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, i64>(1)?,
                    r.get::<_, String>(2)?,
                ))
            })?;
            let mut data = Vec::new();
            for row in rows {
                let (n, c, cr) = row?;
                data.push(vec![n, c.to_string(), cr]);
            }
            println!("{}", pretty_table(&["Platform", "Channels", "Created"], data));
        }
        Some(("rm", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim();
            let n = conn.execute("DELETE FROM platforms WHERE name=?1", params![name])?;
            if n == 0 {
                return Err(anyhow!("Platform '{}' not found", name));
            }
            println!("Removed platform '{}'", name);
        }
        _ => {}
    }
    Ok(())
}
