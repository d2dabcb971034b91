// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use creatorledger::{cli, commands, db, telemetry};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    telemetry::init(matches.get_count("verbose"))?;

    let db_override = matches.get_one::<String>("db").map(PathBuf::from);
    let mut conn = db::open_or_init(db_override.as_deref())?;

    match matches.subcommand() {
        Some(("init", _)) => match db_override {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("config", sub)) => commands::config::handle(&conn, sub)?,
        Some(("platform", sub)) => commands::platforms::handle(&conn, sub)?,
        Some(("channel", sub)) => commands::channels::handle(&conn, sub)?,
        Some(("revenue", sub)) => commands::revenues::handle(&conn, sub)?,
        Some(("expense", sub)) => commands::expenses::handle(&conn, sub)?,
        Some(("content", sub)) => commands::contents::handle(&conn, sub)?,
        Some(("freelancer", sub)) => commands::freelancers::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("sync", sub)) => commands::sync::handle(&mut conn, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
