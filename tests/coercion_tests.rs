// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use creatorledger::models::{
    ChannelRecord, ContentRecord, ContentStatus, ExpenseRecord, RevenueRecord, split_platforms,
};
use serde_json::json;

#[test]
fn revenue_amount_accepts_formatted_strings() {
    let r = RevenueRecord::from_json(&json!({
        "id": 3,
        "year": "2025",
        "month": "7",
        "platform": " YouTube ",
        "channelName": "",
        "amount": "₩1,200,000"
    }));
    assert_eq!(r.year, 2025);
    assert_eq!(r.month, 7);
    assert_eq!(r.platform, "YouTube");
    assert_eq!(r.channel_name, None);
    assert_eq!(r.amount, 1_200_000);
}

#[test]
fn malformed_and_negative_amounts_become_zero() {
    let bad = RevenueRecord::from_json(&json!({"year": 2025, "month": 1, "platform": "X", "amount": "abc"}));
    assert_eq!(bad.amount, 0);
    let neg = RevenueRecord::from_json(&json!({"year": 2025, "month": 1, "platform": "X", "amount": -500}));
    assert_eq!(neg.amount, 0);
    let missing = RevenueRecord::from_json(&json!({"year": 2025, "month": 1, "platform": "X"}));
    assert_eq!(missing.amount, 0);
}

#[test]
fn expense_quantity_defaults_to_one_only_when_absent() {
    let absent = ExpenseRecord::from_json(&json!({
        "year": 2025, "month": 2, "category": "gear", "unitPrice": "30000"
    }));
    assert_eq!(absent.quantity, 1);
    assert_eq!(absent.amount(), 30_000);

    let junk = ExpenseRecord::from_json(&json!({
        "year": 2025, "month": 2, "category": "gear", "quantity": "two", "unitPrice": 30000
    }));
    assert_eq!(junk.quantity, 0);
    assert_eq!(junk.amount(), 0);
}

#[test]
fn expense_date_keeps_day_part_of_timestamps() {
    let e = ExpenseRecord::from_json(&json!({
        "year": 2025, "month": 3, "category": "editing", "quantity": 2, "unitPrice": 10000,
        "date": "2025-03-14T09:00:00.000Z"
    }));
    assert_eq!(e.date.map(|d| d.to_string()), Some("2025-03-14".to_string()));
    assert_eq!(e.amount(), 20_000);
}

#[test]
fn content_distribution_accepts_array_or_string() {
    let from_array = ContentRecord::from_json(&json!({
        "id": 1, "brand": "B", "mainPlatform": "YouTube",
        "distributePlatforms": ["TikTok", " ", "Instagram"],
        "status": "published", "uploadYear": 2025, "uploadMonth": 4
    }));
    assert_eq!(from_array.distribute_platforms, vec!["TikTok", "Instagram"]);
    assert_eq!(from_array.status, ContentStatus::Published);

    let from_string = ContentRecord::from_json(&json!({
        "id": 2, "brand": "B", "mainPlatform": "YouTube",
        "distributePlatforms": "TikTok, Instagram",
        "status": "weird", "uploadYear": "2025", "uploadMonth": "4"
    }));
    assert_eq!(from_string.distribute_platforms, vec!["TikTok", "Instagram"]);
    assert_eq!(from_string.status, ContentStatus::Planning);
    assert_eq!(from_string.upload_year, 2025);
}

#[test]
fn upload_platforms_fall_back_to_main_platform() {
    let c = ContentRecord::from_json(&json!({
        "id": 1, "brand": "B", "mainPlatform": "YouTube", "uploadYear": 2025, "uploadMonth": 1
    }));
    assert_eq!(c.upload_platforms(), vec!["YouTube"]);
    assert_eq!(c.upload_count(), 1);
}

#[test]
fn status_parses_korean_labels() {
    assert_eq!("편집중".parse::<ContentStatus>().unwrap(), ContentStatus::Editing);
    assert_eq!("PUBLISHED".parse::<ContentStatus>().unwrap(), ContentStatus::Published);
    assert!("archived".parse::<ContentStatus>().is_err());
}

#[test]
fn split_platforms_handles_mixed_separators() {
    assert_eq!(
        split_platforms("YouTube / TikTok|Instagram · Naver,"),
        vec!["YouTube", "TikTok", "Instagram", "Naver"]
    );
    assert!(split_platforms("  ").is_empty());
}

#[test]
fn brands_keep_first_seen_order_and_color() {
    let channels = vec![
        ChannelRecord::from_json(&json!({"brand": "Alpha", "brandColor": "#f00", "platform": "YouTube", "channelName": "a"})),
        ChannelRecord::from_json(&json!({"brand": "Beta", "platform": "TikTok", "channelName": "b"})),
        ChannelRecord::from_json(&json!({"brand": "Alpha", "brandColor": "#0f0", "platform": "TikTok", "channelName": "c"})),
    ];
    let brands = ChannelRecord::brands(&channels);
    assert_eq!(brands.len(), 2);
    assert_eq!(brands[0].name, "Alpha");
    assert_eq!(brands[0].color.as_deref(), Some("#f00"));
    assert_eq!(brands[1].name, "Beta");
    assert_eq!(brands[1].color, None);
}

#[test]
fn channel_credentials_are_not_serialized() {
    let ch = ChannelRecord::from_json(&json!({
        "brand": "Alpha", "platform": "YouTube", "channelName": "a", "credentials": "secret"
    }));
    assert_eq!(ch.credentials.as_deref(), Some("secret"));
    let out = serde_json::to_value(&ch).unwrap();
    assert!(out.get("credentials").is_none());
    assert_eq!(out["channelName"], "a");
}
