// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use creatorledger::engine::{
    self, UNNAMED_CHANNEL, UNNAMED_EXPENSE, expense_month_total, expense_table, recent_expenses,
};
use creatorledger::models::{
    ChannelRecord, ContentRecord, ContentStatus, ExpenseRecord, PlatformCatalog, RevenueRecord,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

fn rev(id: i64, year: i32, month: u32, platform: &str, channel: Option<&str>, amount: i64) -> RevenueRecord {
    RevenueRecord {
        id,
        year,
        month,
        platform: platform.to_string(),
        channel_name: channel.map(|c| c.to_string()),
        amount,
    }
}

fn exp(id: i64, year: i32, month: u32, category: &str, quantity: i64, unit_price: i64) -> ExpenseRecord {
    ExpenseRecord {
        id,
        year,
        month,
        name: None,
        category: category.to_string(),
        quantity,
        unit_price,
        date: None,
        memo: None,
    }
}

fn content(id: i64, year: i32, month: u32, main: &str, dist: &[&str], status: ContentStatus) -> ContentRecord {
    ContentRecord {
        id,
        brand: "Studio".to_string(),
        main_platform: main.to_string(),
        distribute_platforms: dist.iter().map(|s| s.to_string()).collect(),
        status,
        upload_year: year,
        upload_month: month,
        upload_day: None,
        title: None,
        topic: None,
        editor: None,
        memo: None,
    }
}

fn channel(id: i64, platform: &str, name: &str) -> ChannelRecord {
    ChannelRecord {
        id,
        brand: "Studio".to_string(),
        brand_color: None,
        platform: platform.to_string(),
        channel_name: name.to_string(),
        credentials: None,
    }
}

fn catalog() -> PlatformCatalog {
    PlatformCatalog::new(["YouTube", "TikTok", "Instagram"])
}

#[test]
fn yearly_summary_scenario_a() {
    let revenues = vec![rev(1, 2025, 1, "YouTube", None, 100_000)];
    let expenses = vec![exp(1, 2025, 1, "editing", 2, 20_000)];
    let s = engine::yearly_summary(&revenues, &expenses, 2025);

    assert_eq!(s.revenue_in(1), 100_000);
    assert_eq!(s.expense_in(1), 40_000);
    assert_eq!(s.net_in(1), 60_000);
    assert_eq!(s.total_revenue, 100_000);
    assert_eq!(s.total_expense, 40_000);
    assert_eq!(s.net_revenue, 60_000);
    for m in 2..=12 {
        assert_eq!(s.revenue_in(m), 0);
        assert_eq!(s.expense_in(m), 0);
        assert_eq!(s.net_in(m), 0);
    }
}

#[test]
fn yearly_summary_is_complete_for_empty_input() {
    let s = engine::yearly_summary(&[], &[], 2025);
    assert_eq!(s.monthly_revenue_totals.len(), 12);
    assert_eq!(s.monthly_expense_totals.len(), 12);
    assert_eq!(s.monthly_net.len(), 12);
    assert!(s.monthly_net.iter().all(|v| *v == 0));
    assert_eq!(s.net_revenue, 0);
}

#[test]
fn yearly_summary_excludes_other_years_and_bad_months() {
    let revenues = vec![
        rev(1, 2025, 3, "YouTube", None, 10_000),
        rev(2, 2024, 3, "YouTube", None, 99_000),
        rev(3, 2025, 13, "YouTube", None, 50_000),
        rev(4, 2025, 0, "YouTube", None, 50_000),
    ];
    let expenses = vec![exp(1, 2025, 3, "gear", 1, 30_000)];
    let s = engine::yearly_summary(&revenues, &expenses, 2025);
    assert_eq!(s.total_revenue, 10_000);
    assert_eq!(s.net_in(3), -20_000);
    assert_eq!(s.net_revenue, -20_000);
}

#[test]
fn monthly_summary_breaks_down_by_catalog_platform() {
    let revenues = vec![
        rev(1, 2025, 5, "YouTube", Some("A"), 70_000),
        rev(2, 2025, 5, "TikTok", Some("B"), 20_000),
        rev(3, 2025, 5, "Naver", None, 5_000),
        rev(4, 2025, 6, "YouTube", Some("A"), 1_000),
    ];
    let expenses = vec![exp(1, 2025, 5, "editing", 3, 10_000)];
    let contents = vec![
        content(1, 2025, 5, "YouTube", &[], ContentStatus::Published),
        content(2, 2025, 5, "TikTok", &[], ContentStatus::Editing),
        content(3, 2025, 6, "YouTube", &[], ContentStatus::Planning),
    ];
    let s = engine::monthly_summary(&revenues, &expenses, &contents, &catalog(), 2025, 5);

    assert_eq!(s.monthly_revenue, 95_000);
    assert_eq!(s.monthly_expense, 30_000);
    assert_eq!(s.monthly_net_revenue, 65_000);
    assert_eq!(s.monthly_contents, 2);
    assert_eq!(s.unmatched_revenue, 5_000);

    let names: Vec<&str> = s.revenue_by_platform.iter().map(|p| p.platform.as_str()).collect();
    assert_eq!(names, vec!["YouTube", "TikTok", "Instagram"]);
    let amounts: Vec<i64> = s.revenue_by_platform.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![70_000, 20_000, 0]);
    assert!(s.revenue_by_platform[2].is_zero());
}

#[test]
fn productivity_scenario_b() {
    let revenues = vec![
        rev(1, 2025, 1, "YouTube", None, 30_000),
        rev(2, 2025, 2, "YouTube", None, 20_000),
    ];
    let contents = vec![content(1, 2025, 1, "YouTube", &["YouTube"], ContentStatus::Published)];
    let p = engine::productivity_metrics(&revenues, &contents, 2025);

    assert_eq!(p.original_contents, 1);
    assert_eq!(p.total_uploads, 1);
    assert_eq!(p.revenue_per_content, Decimal::from(50_000));
    assert_eq!(p.revenue_per_upload, Decimal::from(50_000));
}

#[test]
fn productivity_is_zero_safe_without_contents() {
    let revenues = vec![rev(1, 2025, 1, "YouTube", None, 30_000)];
    let p = engine::productivity_metrics(&revenues, &[], 2025);
    assert_eq!(p.original_contents, 0);
    assert_eq!(p.total_uploads, 0);
    assert_eq!(p.revenue_per_content, Decimal::ZERO);
    assert_eq!(p.revenue_per_upload, Decimal::ZERO);
    assert_eq!(p.recycle_ratio, Decimal::ZERO);
}

#[test]
fn duplicate_distribution_platforms_count_once() {
    let c = content(
        1,
        2025,
        1,
        "YouTube",
        &["YouTube", "TikTok", "TikTok", "Instagram"],
        ContentStatus::Done,
    );
    assert_eq!(c.upload_count(), 3);
    let p = engine::productivity_metrics(&[], &[c], 2025);
    assert_eq!(p.total_uploads, 3);
    assert_eq!(p.recycle_ratio, Decimal::from(3));
}

#[test]
fn status_histogram_lists_every_status() {
    let contents = vec![
        content(1, 2025, 1, "YouTube", &[], ContentStatus::Editing),
        content(2, 2025, 2, "YouTube", &[], ContentStatus::Editing),
        content(3, 2025, 2, "TikTok", &[], ContentStatus::Published),
        content(4, 2024, 2, "TikTok", &[], ContentStatus::Published),
    ];
    let p = engine::productivity_metrics(&[], &contents, 2025);
    assert_eq!(p.contents_by_status.len(), ContentStatus::ALL.len());
    assert_eq!(p.contents_by_status[&ContentStatus::Editing], 2);
    assert_eq!(p.contents_by_status[&ContentStatus::Published], 1);
    assert_eq!(p.contents_by_status[&ContentStatus::Planning], 0);
    let order: Vec<ContentStatus> = p.contents_by_status.keys().copied().collect();
    assert_eq!(order, ContentStatus::ALL.to_vec());
}

#[test]
fn contents_without_ids_are_each_counted() {
    let contents: Vec<ContentRecord> = [
        json!({"brand": "Studio", "mainPlatform": "YouTube", "uploadYear": 2025, "uploadMonth": 1}),
        json!({"brand": "Studio", "mainPlatform": "TikTok", "uploadYear": 2025, "uploadMonth": 2}),
    ]
    .iter()
    .map(ContentRecord::from_json)
    .collect();
    assert!(contents.iter().all(|c| c.id == 0));
    let revenues = vec![rev(1, 2025, 1, "YouTube", None, 50_000)];

    let p = engine::productivity_metrics(&revenues, &contents, 2025);
    assert_eq!(p.original_contents, 2);
    assert_eq!(p.total_uploads, 2);
    assert_eq!(p.revenue_per_content, Decimal::from(25_000));
    assert_eq!(p.revenue_per_upload, Decimal::from(25_000));

    let monthly_total: usize = (1..=12)
        .map(|m| engine::monthly_summary(&revenues, &[], &contents, &catalog(), 2025, m).monthly_contents)
        .sum();
    assert_eq!(monthly_total, p.original_contents);
}

#[test]
fn matrix_scenario_c() {
    let platforms = PlatformCatalog::new(["YouTube", "TikTok"]);
    let channels = vec![channel(1, "YouTube", "A")];
    let mx = engine::platform_channel_matrix(&[], &platforms, &channels, 2025);

    assert_eq!(mx.platforms, vec!["YouTube".to_string(), "TikTok".to_string()]);
    assert_eq!(mx.channels_for("YouTube"), &["A".to_string()]);
    assert!(mx.channels_for("TikTok").is_empty());
    assert_eq!(mx.channels_by_platform.len(), 2);
    assert!(mx.revenue_data.is_empty());
    assert_eq!(mx.cell("YouTube", "A", 1), None);
}

#[test]
fn matrix_distinguishes_zero_from_absent() {
    let revenues = vec![
        rev(1, 2025, 1, "YouTube", Some("A"), 0),
        rev(2, 2025, 2, "YouTube", Some("A"), 12_000),
    ];
    let mx = engine::platform_channel_matrix(&revenues, &catalog(), &[channel(1, "YouTube", "A")], 2025);
    assert_eq!(mx.cell("YouTube", "A", 1), Some(0));
    assert_eq!(mx.cell("YouTube", "A", 2), Some(12_000));
    assert_eq!(mx.cell("YouTube", "A", 3), None);
}

#[test]
fn matrix_reconciles_with_yearly_total() {
    let revenues = vec![
        rev(1, 2025, 1, "YouTube", Some("A"), 100_000),
        rev(2, 2025, 1, "YouTube", Some("B"), 40_000),
        rev(3, 2025, 2, "TikTok", Some("C"), 15_000),
        rev(4, 2025, 2, "TikTok", None, 5_000),
        rev(5, 2025, 12, "Instagram", Some("D"), 7_500),
        rev(6, 2024, 12, "Instagram", Some("D"), 1_000_000),
    ];
    let channels = vec![
        channel(1, "YouTube", "A"),
        channel(2, "YouTube", "B"),
        channel(3, "TikTok", "C"),
        channel(4, "Instagram", "D"),
    ];
    let mx = engine::platform_channel_matrix(&revenues, &catalog(), &channels, 2025);
    let yearly = engine::yearly_summary(&revenues, &[], 2025);

    let mut matrix_total = 0i64;
    for p in &mx.platforms {
        for m in 1..=12 {
            let from_cells: i64 = mx
                .grid_channels(p)
                .iter()
                .filter_map(|c| mx.cell(p, c, m))
                .sum();
            assert_eq!(mx.platform_total(p, m), from_cells);
            matrix_total += mx.platform_total(p, m);
        }
    }
    assert_eq!(matrix_total, yearly.total_revenue);
    assert_eq!(mx.cell("TikTok", UNNAMED_CHANNEL, 2), Some(5_000));
    assert_eq!(mx.month_total(1), 140_000);
}

#[test]
fn matrix_skips_platforms_outside_catalog_and_sums_duplicates() {
    let revenues = vec![
        rev(1, 2025, 4, "Naver", Some("X"), 9_000),
        rev(2, 2025, 4, "YouTube", Some("A"), 1_000),
        rev(3, 2025, 4, "YouTube", Some("A"), 2_000),
    ];
    let channels = vec![channel(1, "YouTube", "A"), channel(2, "Naver", "X"), channel(3, "YouTube", "A")];
    let mx = engine::platform_channel_matrix(&revenues, &catalog(), &channels, 2025);
    assert!(!mx.revenue_data.contains_key("Naver"));
    assert!(!mx.channels_by_platform.contains_key("Naver"));
    assert_eq!(mx.channels_for("YouTube"), &["A".to_string()]);
    assert_eq!(mx.cell("YouTube", "A", 4), Some(3_000));
}

#[test]
fn padded_channel_names_share_one_grid_row() {
    let revenues = vec![rev(1, 2025, 6, "YouTube", Some(" Main "), 4_000)];
    let channels = vec![channel(1, "YouTube", "Main  "), channel(2, "YouTube", " Main")];
    let mx = engine::platform_channel_matrix(&revenues, &catalog(), &channels, 2025);
    assert_eq!(mx.channels_for("YouTube"), &["Main".to_string()]);
    assert_eq!(mx.grid_channels("YouTube"), vec!["Main".to_string()]);
    assert_eq!(mx.cell("YouTube", "Main", 6), Some(4_000));
}

#[test]
fn aggregation_is_idempotent() {
    let revenues = vec![
        rev(1, 2025, 1, "YouTube", Some("A"), 100_000),
        rev(2, 2025, 3, "TikTok", None, 3_000),
    ];
    let expenses = vec![exp(1, 2025, 1, "editing", 2, 20_000)];
    let contents = vec![content(1, 2025, 1, "YouTube", &["TikTok"], ContentStatus::Published)];
    let channels = vec![channel(1, "YouTube", "A")];

    assert_eq!(
        engine::yearly_summary(&revenues, &expenses, 2025),
        engine::yearly_summary(&revenues, &expenses, 2025)
    );
    assert_eq!(
        engine::monthly_summary(&revenues, &expenses, &contents, &catalog(), 2025, 1),
        engine::monthly_summary(&revenues, &expenses, &contents, &catalog(), 2025, 1)
    );
    assert_eq!(
        engine::productivity_metrics(&revenues, &contents, 2025),
        engine::productivity_metrics(&revenues, &contents, 2025)
    );
    assert_eq!(
        engine::platform_channel_matrix(&revenues, &catalog(), &channels, 2025),
        engine::platform_channel_matrix(&revenues, &catalog(), &channels, 2025)
    );
}

#[test]
fn platform_efficiency_ranks_by_revenue_per_upload() {
    let revenues = vec![
        rev(1, 2025, 1, "YouTube", None, 90_000),
        rev(2, 2025, 1, "TikTok", None, 10_000),
    ];
    let contents = vec![
        content(1, 2025, 1, "YouTube", &["TikTok"], ContentStatus::Published),
        content(2, 2025, 1, "TikTok", &[], ContentStatus::Published),
    ];
    let list = engine::platform_efficiency(&revenues, &contents, &catalog(), 2025);
    let order: Vec<&str> = list.iter().map(|p| p.platform.as_str()).collect();
    assert_eq!(order, vec!["YouTube", "TikTok", "Instagram"]);
    assert_eq!(list[0].uploads, 1);
    assert_eq!(list[0].revenue_per_upload, Decimal::from(90_000));
    assert_eq!(list[1].uploads, 2);
    assert_eq!(list[1].revenue_per_upload, Decimal::from(5_000));
    assert_eq!(list[2].uploads, 0);
    assert_eq!(list[2].revenue_per_upload, Decimal::ZERO);
}

#[test]
fn expense_table_groups_by_name_and_category() {
    let mut a = exp(1, 2025, 1, "editing", 2, 20_000);
    a.name = Some("Kim".to_string());
    let mut b = exp(2, 2025, 3, "editing", 1, 25_000);
    b.name = Some("Kim".to_string());
    let c = exp(3, 2025, 3, "gear", 1, 150_000);
    let d = exp(4, 2024, 3, "gear", 1, 999_999);

    let lines = expense_table(&[a, b, c, d], 2025);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].name, "Kim");
    assert_eq!(lines[0].month(1), 40_000);
    assert_eq!(lines[0].month(3), 25_000);
    assert_eq!(lines[0].total, 65_000);
    assert_eq!(lines[0].entries, 2);
    assert_eq!(lines[1].name, UNNAMED_EXPENSE);
    assert_eq!(expense_month_total(&lines, 3), 175_000);
    assert_eq!(expense_month_total(&lines, 2), 0);
}

#[test]
fn recent_expenses_puts_undated_last() {
    let mut a = exp(1, 2025, 1, "editing", 1, 1);
    a.date = NaiveDate::from_ymd_opt(2025, 1, 5);
    let mut b = exp(2, 2025, 2, "editing", 1, 1);
    b.date = NaiveDate::from_ymd_opt(2025, 2, 1);
    let c = exp(3, 2025, 3, "editing", 1, 1);
    let all = vec![a, b, c];
    let ids: Vec<i64> = recent_expenses(&all, 20).iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 1, 3]);
    assert_eq!(recent_expenses(&all, 1).len(), 1);
}
