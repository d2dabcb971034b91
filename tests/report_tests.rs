// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use creatorledger::commands::{doctor::diagnose, reports::build_dashboard};
use creatorledger::db;
use creatorledger::snapshot::Snapshot;
use rusqlite::Connection;
use rust_decimal::Decimal;

fn seeded() -> Connection {
    let conn = db::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO platforms(name) VALUES ('YouTube'), ('TikTok');
        INSERT INTO channels(brand, platform, channel_name) VALUES
            ('Studio', 'YouTube', 'Main'),
            ('Studio', 'Naver', 'Blog');
        INSERT INTO revenues(year, month, platform, channel_name, amount) VALUES
            (2025, 1, 'YouTube', 'Main', 100000),
            (2025, 1, 'Naver', 'Blog', 7000),
            (2025, 2, 'TikTok', '', 20000);
        INSERT INTO expenses(year, month, category, quantity, unit_price) VALUES
            (2025, 1, 'editing', 2, 20000);
        INSERT INTO contents(brand, main_platform, distribute_platforms, status, upload_year, upload_month)
        VALUES
            ('Studio', 'YouTube', 'YouTube,TikTok', 'published', 2025, 1),
            ('Studio', 'TikTok', 'Reels', 'editing', 2025, 2);
        "#,
    )
    .unwrap();
    conn
}

#[test]
fn dashboard_combines_month_year_and_productivity() {
    let conn = seeded();
    let snap = Snapshot::load(&conn).unwrap();
    let d = build_dashboard(&snap, 2025, 1);

    assert_eq!(d.month.monthly_revenue, 107_000);
    assert_eq!(d.month.monthly_expense, 40_000);
    assert_eq!(d.month.monthly_net_revenue, 67_000);
    assert_eq!(d.month.unmatched_revenue, 7_000);
    assert_eq!(d.month.monthly_contents, 1);

    assert_eq!(d.year.total_revenue, 127_000);
    assert_eq!(d.year.net_revenue, 87_000);

    assert_eq!(d.productivity.original_contents, 2);
    assert_eq!(d.productivity.total_uploads, 4);
    assert_eq!(d.productivity.revenue_per_content, Decimal::from(63_500));

    let annual: Vec<(&str, i64)> = d
        .annual_revenue_by_platform
        .iter()
        .map(|p| (p.platform.as_str(), p.amount))
        .collect();
    assert_eq!(annual, vec![("YouTube", 100_000), ("TikTok", 20_000)]);

    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["month"]["monthlyNetRevenue"], 67_000);
    assert!(json["annualRevenueByPlatform"].is_array());
}

#[test]
fn doctor_flags_platforms_outside_catalog() {
    let conn = seeded();
    let snap = Snapshot::load(&conn).unwrap();
    let issues = diagnose(&snap);
    let kinds: Vec<&str> = issues.iter().map(|row| row[0].as_str()).collect();

    assert!(kinds.contains(&"revenue_platform_not_in_catalog"));
    assert!(kinds.contains(&"content_platform_not_in_catalog"));
    assert!(kinds.contains(&"channel_platform_not_in_catalog"));
    let revenue_issue = issues
        .iter()
        .find(|row| row[0] == "revenue_platform_not_in_catalog")
        .unwrap();
    assert_eq!(revenue_issue[1], "2025 Naver (₩7,000)");
}

#[test]
fn doctor_is_quiet_on_a_clean_ledger() {
    let conn = db::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO platforms(name) VALUES ('YouTube');
        INSERT INTO revenues(year, month, platform, amount) VALUES (2025, 1, 'YouTube', 1000);
        "#,
    )
    .unwrap();
    let snap = Snapshot::load(&conn).unwrap();
    assert!(diagnose(&snap).is_empty());
}

#[test]
fn doctor_reports_months_outside_range() {
    let conn = db::open_in_memory().unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO platforms(name) VALUES ('YouTube');
        INSERT INTO revenues(year, month, platform, amount) VALUES (2025, 13, 'YouTube', 1000);
        INSERT INTO expenses(year, month, category, quantity, unit_price) VALUES (2025, 0, 'gear', 1, 1);
        "#,
    )
    .unwrap();
    let snap = Snapshot::load(&conn).unwrap();
    let kinds: Vec<String> = diagnose(&snap).into_iter().map(|row| row[0].clone()).collect();
    assert_eq!(
        kinds,
        vec![
            "revenue_month_out_of_range".to_string(),
            "expense_month_out_of_range".to_string()
        ]
    );
}
