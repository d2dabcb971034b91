// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{MONTHS, MonthlyAmounts, amount_at, month_slot};
use crate::models::{ExpenseRecord, Money};
use serde::Serialize;

/// Row label for expenses recorded without a payee/purpose.
pub const UNNAMED_EXPENSE: &str = "(other)";

/// One row of the expense grid: every expense sharing a name and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLine {
    pub name: String,
    pub category: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub monthly_totals: MonthlyAmounts,
    pub total: Money,
    pub entries: usize,
}

impl ExpenseLine {
    pub fn month(&self, month: u32) -> Money {
        amount_at(&self.monthly_totals, month)
    }
}

pub fn expense_table(expenses: &[ExpenseRecord], year: i32) -> Vec<ExpenseLine> {
    let mut lines: Vec<ExpenseLine> = Vec::new();
    for e in expenses.iter().filter(|e| e.year == year) {
        let Some(slot) = month_slot(e.month) else {
            continue;
        };
        let name = e
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(UNNAMED_EXPENSE);
        let idx = match lines
            .iter()
            .position(|l| l.name == name && l.category == e.category)
        {
            Some(i) => i,
            None => {
                lines.push(ExpenseLine {
                    name: name.to_string(),
                    category: e.category.clone(),
                    quantity: e.quantity,
                    unit_price: e.unit_price,
                    monthly_totals: [0; MONTHS],
                    total: 0,
                    entries: 0,
                });
                lines.len() - 1
            }
        };
        let line = &mut lines[idx];
        let amount = e.amount();
        line.monthly_totals[slot] = line.monthly_totals[slot].saturating_add(amount);
        line.total = line.total.saturating_add(amount);
        line.entries += 1;
    }
    lines
}

pub fn expense_month_total(lines: &[ExpenseLine], month: u32) -> Money {
    lines
        .iter()
        .fold(0i64, |acc, l| acc.saturating_add(l.month(month)))
}

/// Newest first; undated expenses sort last, ties broken by newest id.
pub fn recent_expenses(expenses: &[ExpenseRecord], limit: usize) -> Vec<&ExpenseRecord> {
    let mut out: Vec<&ExpenseRecord> = expenses.iter().collect();
    out.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    out.truncate(limit);
    out
}
