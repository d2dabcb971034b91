// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Creatorledger", "creatorledger"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("creatorledger.sqlite"))
}

/// Opens the ledger at `path`, or at the platform data dir when `None`.
pub fn open_or_init(path: Option<&Path>) -> Result<Connection> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => db_path()?,
    };
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    tracing::debug!(path = %path.display(), "ledger database ready");
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().context("Open in-memory DB")?;
    init_schema(&mut conn)?;
    Ok(conn)
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS platforms(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS channels(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        brand TEXT NOT NULL,
        brand_color TEXT,
        platform TEXT NOT NULL,
        channel_name TEXT NOT NULL,
        credentials TEXT,
        remote_id INTEGER,
        UNIQUE(platform, channel_name)
    );

    -- remote_id is the row id in the remote ledger, NULL until pushed or pulled
    -- channel_name '' means the revenue was booked without a channel
    CREATE TABLE IF NOT EXISTS revenues(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        platform TEXT NOT NULL,
        channel_name TEXT NOT NULL DEFAULT '',
        amount INTEGER NOT NULL DEFAULT 0,
        remote_id INTEGER,
        UNIQUE(year, month, platform, channel_name)
    );
    CREATE INDEX IF NOT EXISTS idx_revenues_year ON revenues(year);

    CREATE TABLE IF NOT EXISTS expenses(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        year INTEGER NOT NULL,
        month INTEGER NOT NULL,
        name TEXT,
        category TEXT NOT NULL,
        quantity INTEGER NOT NULL DEFAULT 1,
        unit_price INTEGER NOT NULL DEFAULT 0,
        date TEXT,
        memo TEXT,
        remote_id INTEGER
    );
    CREATE INDEX IF NOT EXISTS idx_expenses_year ON expenses(year);

    -- distribute_platforms is a comma-joined list
    CREATE TABLE IF NOT EXISTS contents(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        brand TEXT NOT NULL,
        main_platform TEXT NOT NULL,
        distribute_platforms TEXT NOT NULL DEFAULT '',
        status TEXT NOT NULL DEFAULT 'planning'
            CHECK(status IN ('planning','producing','editing','reviewing','done','published')),
        upload_year INTEGER NOT NULL,
        upload_month INTEGER NOT NULL,
        upload_day INTEGER,
        title TEXT,
        topic TEXT,
        editor TEXT,
        memo TEXT,
        remote_id INTEGER
    );
    CREATE INDEX IF NOT EXISTS idx_contents_year ON contents(upload_year);

    CREATE TABLE IF NOT EXISTS freelancers(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        contact TEXT,
        assigned_channel TEXT,
        weekly_assigned INTEGER NOT NULL DEFAULT 0,
        completed_count INTEGER NOT NULL DEFAULT 0,
        price_per_video INTEGER NOT NULL DEFAULT 0,
        edit_program TEXT,
        memo TEXT,
        remote_id INTEGER
    );
    "#,
    )?;
    Ok(())
}
