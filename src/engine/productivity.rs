// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{month_slot, ratio};
use crate::models::{ContentRecord, ContentStatus, Money, PlatformCatalog, RevenueRecord};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityMetrics {
    pub year: i32,
    pub original_contents: usize,
    pub total_uploads: usize,
    pub revenue_per_content: Decimal,
    pub revenue_per_upload: Decimal,
    /// Uploads per original content.
    pub recycle_ratio: Decimal,
    pub contents_by_status: BTreeMap<ContentStatus, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformEfficiency {
    pub platform: String,
    pub revenue: Money,
    pub uploads: usize,
    pub revenue_per_upload: Decimal,
}

fn year_revenue(revenues: &[RevenueRecord], year: i32) -> Money {
    revenues
        .iter()
        .filter(|r| r.year == year && month_slot(r.month).is_some())
        .fold(0i64, |acc, r| acc.saturating_add(r.amount.max(0)))
}

/// Every record uploaded in `year` is one original content.
fn year_contents(contents: &[ContentRecord], year: i32) -> Vec<&ContentRecord> {
    contents.iter().filter(|c| c.upload_year == year).collect()
}

pub fn productivity_metrics(
    revenues: &[RevenueRecord],
    contents: &[ContentRecord],
    year: i32,
) -> ProductivityMetrics {
    let items = year_contents(contents, year);
    let total_revenue = year_revenue(revenues, year);

    let original_contents = items.len();
    let total_uploads: usize = items.iter().map(|c| c.upload_count()).sum();

    let mut contents_by_status: BTreeMap<ContentStatus, usize> =
        ContentStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for c in &items {
        *contents_by_status.entry(c.status).or_insert(0) += 1;
    }

    ProductivityMetrics {
        year,
        original_contents,
        total_uploads,
        revenue_per_content: ratio(total_revenue, original_contents),
        revenue_per_upload: ratio(total_revenue, total_uploads),
        recycle_ratio: ratio(total_uploads as Money, original_contents),
        contents_by_status,
    }
}

/// Revenue per upload for each catalog platform, best first.
pub fn platform_efficiency(
    revenues: &[RevenueRecord],
    contents: &[ContentRecord],
    catalog: &PlatformCatalog,
    year: i32,
) -> Vec<PlatformEfficiency> {
    let items = year_contents(contents, year);
    let mut rows: Vec<PlatformEfficiency> = catalog
        .iter()
        .map(|platform| {
            let revenue = revenues
                .iter()
                .filter(|r| r.year == year && month_slot(r.month).is_some())
                .filter(|r| r.platform == platform)
                .fold(0i64, |acc, r| acc.saturating_add(r.amount.max(0)));
            let uploads = items
                .iter()
                .filter(|c| c.upload_platforms().contains(&platform))
                .count();
            PlatformEfficiency {
                platform: platform.to_string(),
                revenue,
                uploads,
                revenue_per_upload: ratio(revenue, uploads),
            }
        })
        .collect();
    // sort_by is stable, so equal ratios keep catalog order
    rows.sort_by(|a, b| b.revenue_per_upload.cmp(&a.revenue_per_upload));
    rows
}
