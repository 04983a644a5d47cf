// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart-style views: spend per category, per recent day, per calendar day.

use super::window::{days_in_month, first_of_month};
use crate::models::{Category, Transaction};
use crate::utils::saturating_add;
use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category_id: String,
    pub name: String,
    pub color: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 in a Monday-first grid.
    pub leading_blanks: u32,
    pub days: Vec<DailyTotal>,
}

fn expense_by_day(transactions: &[Transaction]) -> HashMap<NaiveDate, Decimal> {
    let mut map = HashMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let slot = map.entry(t.date.date()).or_insert(Decimal::ZERO);
        *slot = saturating_add(*slot, t.amount);
    }
    map
}

/// All-time expense per category, in table order, skipping empty categories.
pub fn category_breakdown(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategoryShare> {
    let mut map: HashMap<&str, Decimal> = HashMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        let slot = map.entry(t.category_id.as_str()).or_insert(Decimal::ZERO);
        *slot = saturating_add(*slot, t.amount);
    }
    categories
        .iter()
        .filter_map(|c| {
            let total = map.get(c.id).copied().unwrap_or(Decimal::ZERO);
            (total > Decimal::ZERO).then(|| CategoryShare {
                category_id: c.id.to_string(),
                name: c.name.to_string(),
                color: c.color.to_string(),
                total,
            })
        })
        .collect()
}

/// Expense totals for the `days` days ending at `end`, oldest first.
pub fn daily_totals(transactions: &[Transaction], end: NaiveDate, days: u32) -> Vec<DailyTotal> {
    let by_day = expense_by_day(transactions);
    (0..i64::from(days))
        .rev()
        .map(|back| {
            let date = end - Duration::days(back);
            DailyTotal {
                date,
                total: by_day.get(&date).copied().unwrap_or(Decimal::ZERO),
            }
        })
        .collect()
}

pub fn month_calendar(transactions: &[Transaction], any_day: NaiveDate) -> MonthCalendar {
    let first = first_of_month(any_day);
    let by_day = expense_by_day(transactions);
    let days = (0..days_in_month(first))
        .map(|offset| {
            let date = first + Duration::days(i64::from(offset));
            DailyTotal {
                date,
                total: by_day.get(&date).copied().unwrap_or(Decimal::ZERO),
            }
        })
        .collect();
    MonthCalendar {
        year: first.year(),
        month: first.month(),
        leading_blanks: first.weekday().num_days_from_monday(),
        days,
    }
}
