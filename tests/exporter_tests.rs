// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use creatorledger::{cli, commands::exporter, db};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn seeded() -> Connection {
    let conn = db::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO revenues(year, month, platform, channel_name, amount) VALUES
            (2025, 1, 'YouTube', 'Main', 120000),
            (2025, 2, 'TikTok', '', 3000),
            (2024, 12, 'YouTube', 'Main', 999);
        INSERT INTO expenses(year, month, name, category, quantity, unit_price, date, memo) VALUES
            (2025, 1, 'Kim', 'editing', 2, 50000, '2025-01-10', 'vlog'),
            (2024, 11, NULL, 'gear', 1, 700000, NULL, NULL);
        "#,
    )
    .unwrap();
    conn
}

fn export(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["creatorledger", "export"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_revenues_writes_pretty_json_for_one_year() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("revenues.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, &["revenues", "--format", "json", "--out", &out_str, "--year", "2025"]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    assert!(contents.contains("\n  "));
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["platform"], json!("YouTube"));
    assert_eq!(rows[0]["channelName"], json!("Main"));
    assert_eq!(rows[0]["amount"], json!(120000));
    assert_eq!(rows[1]["channelName"], json!(null));
}

#[test]
fn export_expenses_writes_csv_with_header() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("expenses.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&conn, &["expenses", "--format", "CSV", "--out", &out_str]).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "date,year,month,name,category,quantity,unit_price,memo");
    assert_eq!(lines.len(), 3);
    assert!(lines.contains(&"2025-01-10,2025,1,Kim,editing,2,50000,vlog"));
    assert!(lines.contains(&",2024,11,,gear,1,700000,"));
}

#[test]
fn unknown_format_fails_before_writing() {
    let conn = seeded();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("revenues.xml");
    let out_str = out_path.to_string_lossy().to_string();

    let err = export(&conn, &["revenues", "--format", "xml", "--out", &out_str]).unwrap_err();
    assert!(err.to_string().contains("Unknown format"));
    assert!(!out_path.exists());
}
