// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{MONTHS, MonthlyAmounts, amount_at, month_slot};
use crate::models::{ExpenseRecord, Money, RevenueRecord};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlySummary {
    pub year: i32,
    pub total_revenue: Money,
    pub total_expense: Money,
    pub net_revenue: Money,
    pub monthly_revenue_totals: MonthlyAmounts,
    pub monthly_expense_totals: MonthlyAmounts,
    pub monthly_net: MonthlyAmounts,
}

impl YearlySummary {
    /// 1-based month lookups; out-of-range months read as zero.
    pub fn revenue_in(&self, month: u32) -> Money {
        amount_at(&self.monthly_revenue_totals, month)
    }

    pub fn expense_in(&self, month: u32) -> Money {
        amount_at(&self.monthly_expense_totals, month)
    }

    pub fn net_in(&self, month: u32) -> Money {
        amount_at(&self.monthly_net, month)
    }
}

pub fn yearly_summary(
    revenues: &[RevenueRecord],
    expenses: &[ExpenseRecord],
    year: i32,
) -> YearlySummary {
    let mut rev: MonthlyAmounts = [0; MONTHS];
    let mut exp: MonthlyAmounts = [0; MONTHS];

    for r in revenues.iter().filter(|r| r.year == year) {
        if let Some(i) = month_slot(r.month) {
            rev[i] = rev[i].saturating_add(r.amount.max(0));
        }
    }
    for e in expenses.iter().filter(|e| e.year == year) {
        if let Some(i) = month_slot(e.month) {
            exp[i] = exp[i].saturating_add(e.amount());
        }
    }

    let mut net: MonthlyAmounts = [0; MONTHS];
    for i in 0..MONTHS {
        net[i] = rev[i].saturating_sub(exp[i]);
    }
    let total_revenue = rev.iter().fold(0i64, |acc, v| acc.saturating_add(*v));
    let total_expense = exp.iter().fold(0i64, |acc, v| acc.saturating_add(*v));

    YearlySummary {
        year,
        total_revenue,
        total_expense,
        net_revenue: total_revenue.saturating_sub(total_expense),
        monthly_revenue_totals: rev,
        monthly_expense_totals: exp,
        monthly_net: net,
    }
}
