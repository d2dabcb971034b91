// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger aggregation engine.
//!
//! Every function here is pure: it reads a snapshot of records and returns a
//! view model. Records outside the requested window, or carrying a month
//! outside 1..=12, are skipped. Ratios never divide by zero.

mod expenses;
mod matrix;
mod monthly;
mod productivity;
mod yearly;

pub use expenses::{ExpenseLine, UNNAMED_EXPENSE, expense_month_total, expense_table, recent_expenses};
pub use matrix::{PlatformChannelMatrix, UNNAMED_CHANNEL, platform_channel_matrix};
pub use monthly::{MonthlySummary, PlatformRevenue, monthly_summary, revenue_by_platform};
pub use productivity::{
    PlatformEfficiency, ProductivityMetrics, platform_efficiency, productivity_metrics,
};
pub use yearly::{YearlySummary, yearly_summary};

use crate::models::Money;
use rust_decimal::Decimal;

pub const MONTHS: usize = 12;

/// Amounts for January..December, index 0 = January.
pub type MonthlyAmounts = [Money; MONTHS];

pub(crate) fn month_slot(month: u32) -> Option<usize> {
    if (1..=MONTHS as u32).contains(&month) {
        Some(month as usize - 1)
    } else {
        None
    }
}

pub(crate) fn amount_at(amounts: &MonthlyAmounts, month: u32) -> Money {
    month_slot(month).map(|i| amounts[i]).unwrap_or(0)
}

/// `numer / denom`, or zero when there is nothing to divide by.
pub(crate) fn ratio(numer: Money, denom: usize) -> Decimal {
    if denom == 0 {
        return Decimal::ZERO;
    }
    Decimal::from(numer)
        .checked_div(Decimal::from(denom as u64))
        .unwrap_or(Decimal::ZERO)
}
