// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::month_slot;
use crate::models::{ContentRecord, ExpenseRecord, Money, PlatformCatalog, RevenueRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformRevenue {
    pub platform: String,
    pub amount: Money,
}

impl PlatformRevenue {
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub monthly_revenue: Money,
    pub monthly_expense: Money,
    pub monthly_net_revenue: Money,
    pub monthly_contents: usize,
    /// Every catalog platform in catalog order, zero amounts included.
    pub revenue_by_platform: Vec<PlatformRevenue>,
    /// Part of `monthly_revenue` booked under platforms missing from the catalog.
    pub unmatched_revenue: Money,
}

fn in_window(year: i32, month: Option<u32>, rec_year: i32, rec_month: u32) -> bool {
    rec_year == year
        && month_slot(rec_month).is_some()
        && month.is_none_or(|m| m == rec_month)
}

/// Revenue per catalog platform for a year, or a single month of it.
pub fn revenue_by_platform(
    revenues: &[RevenueRecord],
    catalog: &PlatformCatalog,
    year: i32,
    month: Option<u32>,
) -> Vec<PlatformRevenue> {
    let mut out: Vec<PlatformRevenue> = catalog
        .iter()
        .map(|p| PlatformRevenue {
            platform: p.to_string(),
            amount: 0,
        })
        .collect();
    for r in revenues
        .iter()
        .filter(|r| in_window(year, month, r.year, r.month))
    {
        if let Some(slot) = out.iter_mut().find(|p| p.platform == r.platform) {
            slot.amount = slot.amount.saturating_add(r.amount.max(0));
        }
    }
    out
}

pub fn monthly_summary(
    revenues: &[RevenueRecord],
    expenses: &[ExpenseRecord],
    contents: &[ContentRecord],
    catalog: &PlatformCatalog,
    year: i32,
    month: u32,
) -> MonthlySummary {
    let window = Some(month);

    let monthly_revenue = revenues
        .iter()
        .filter(|r| in_window(year, window, r.year, r.month))
        .fold(0i64, |acc, r| acc.saturating_add(r.amount.max(0)));
    let monthly_expense = expenses
        .iter()
        .filter(|e| in_window(year, window, e.year, e.month))
        .fold(0i64, |acc, e| acc.saturating_add(e.amount()));
    let monthly_contents = if month_slot(month).is_some() {
        contents
            .iter()
            .filter(|c| c.upload_year == year && c.upload_month == month)
            .count()
    } else {
        0
    };

    let revenue_by_platform = revenue_by_platform(revenues, catalog, year, window);
    let matched = revenue_by_platform
        .iter()
        .fold(0i64, |acc, p| acc.saturating_add(p.amount));

    MonthlySummary {
        year,
        month,
        monthly_revenue,
        monthly_expense,
        monthly_net_revenue: monthly_revenue.saturating_sub(monthly_expense),
        monthly_contents,
        revenue_by_platform,
        unmatched_revenue: monthly_revenue.saturating_sub(matched),
    }
}
