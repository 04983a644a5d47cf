// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::window::{PeriodMode, PeriodWindows};
use crate::models::{category_by_id, Category, Transaction};
use crate::utils::saturating_add;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// A top category whose change exceeds this many percent is flagged.
pub const HIGHLIGHT_THRESHOLD_PERCENT: i64 = 15;

pub const NO_CATEGORY_NAME: &str = "None yet";
pub const NO_CATEGORY_ICON: &str = "📊";
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";
pub const UNKNOWN_CATEGORY_ICON: &str = "❓";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub mode: PeriodMode,
    pub current_total: Decimal,
    pub previous_total: Decimal,
    /// `None` when nothing was spent in the current window.
    pub top_category_id: Option<String>,
    pub top_category_name: String,
    pub top_category_icon: String,
    pub top_category_diff_percent: i64,
    pub projected_total: Decimal,
    pub budget_limit: Decimal,
    pub is_safe: bool,
    pub highlight_is_bad: bool,
}

/// `Math.round` semantics: halves go towards positive infinity.
pub fn round_half_up(d: Decimal) -> Decimal {
    (d + Decimal::new(5, 1)).floor()
}

fn saturating_i64(d: Decimal) -> i64 {
    d.to_i64().unwrap_or(if d.is_sign_negative() { i64::MIN } else { i64::MAX })
}

/// Expenses whose economic date falls within `[start, end]`, compared by day.
pub fn expenses_between<'a>(
    transactions: &'a [Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |t| {
        let day = t.date.date();
        t.is_expense() && day >= start && day <= end
    })
}

pub fn sum_amounts<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Decimal {
    transactions
        .into_iter()
        .fold(Decimal::ZERO, |acc, t| saturating_add(acc, t.amount))
}

/// Percent change of the top category against the previous window.
///
/// A zero previous total never reaches the division: growth from nothing is
/// reported as exactly 100, and no spending in either window as 0.
pub fn percent_change(current: Decimal, previous: Decimal) -> i64 {
    if previous > Decimal::ZERO {
        let ratio = (current - previous)
            .checked_div(previous)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED));
        match ratio {
            Some(r) => saturating_i64(round_half_up(r)),
            None => i64::MAX,
        }
    } else if current > Decimal::ZERO {
        100
    } else {
        0
    }
}

/// Linear run-rate: average per elapsed day times the period length.
pub fn project_run_rate(total: Decimal, days_passed: u32, total_days: u32) -> Decimal {
    let days_passed = days_passed.max(1);
    total
        .checked_div(Decimal::from(days_passed))
        .and_then(|per_day| per_day.checked_mul(Decimal::from(total_days)))
        .map(round_half_up)
        .unwrap_or(Decimal::MAX)
}

pub fn aggregate(
    transactions: &[Transaction],
    windows: &PeriodWindows,
    categories: &[Category],
) -> Analysis {
    let today = windows.now.date();
    let current: Vec<&Transaction> =
        expenses_between(transactions, windows.current_start, today).collect();
    let previous: Vec<&Transaction> =
        expenses_between(transactions, windows.previous_start, windows.previous_end).collect();

    let current_total = sum_amounts(current.iter().copied());
    let previous_total = sum_amounts(previous.iter().copied());

    // keyed by id so ties resolve to the lowest category id
    let mut per_category: BTreeMap<&str, Decimal> = BTreeMap::new();
    for t in &current {
        let slot = per_category.entry(t.category_id.as_str()).or_insert(Decimal::ZERO);
        *slot = saturating_add(*slot, t.amount);
    }
    let mut top: Option<(&str, Decimal)> = None;
    for (id, total) in &per_category {
        let best = top.map(|(_, v)| v).unwrap_or(Decimal::ZERO);
        if *total > best {
            top = Some((*id, *total));
        }
    }

    let (top_id, top_current) = match top {
        Some((id, v)) => (Some(id.to_string()), v),
        None => (None, Decimal::ZERO),
    };
    let top_previous = match top_id.as_deref() {
        Some(id) => sum_amounts(previous.iter().copied().filter(|t| t.category_id == id)),
        None => Decimal::ZERO,
    };
    let (top_name, top_icon) = match top_id.as_deref() {
        None => (NO_CATEGORY_NAME, NO_CATEGORY_ICON),
        Some(id) => match category_by_id(categories, id) {
            Some(c) => (c.name, c.icon),
            None => (UNKNOWN_CATEGORY_NAME, UNKNOWN_CATEGORY_ICON),
        },
    };

    let diff_percent = percent_change(top_current, top_previous);
    let projected_total = project_run_rate(current_total, windows.days_passed, windows.total_days);

    Analysis {
        mode: windows.mode,
        current_total,
        previous_total,
        top_category_id: top_id,
        top_category_name: top_name.to_string(),
        top_category_icon: top_icon.to_string(),
        top_category_diff_percent: diff_percent,
        projected_total,
        budget_limit: windows.budget_limit,
        is_safe: projected_total <= windows.budget_limit,
        highlight_is_bad: diff_percent > HIGHLIGHT_THRESHOLD_PERCENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_like_math_round() {
        assert_eq!(round_half_up(Decimal::new(25, 1)), Decimal::from(3));
        assert_eq!(round_half_up(Decimal::new(-25, 1)), Decimal::from(-2));
        assert_eq!(round_half_up(Decimal::new(-26, 1)), Decimal::from(-3));
        assert_eq!(round_half_up(Decimal::new(24, 1)), Decimal::from(2));
    }

    #[test]
    fn percent_change_branches() {
        assert_eq!(percent_change(Decimal::from(50), Decimal::ZERO), 100);
        assert_eq!(percent_change(Decimal::ZERO, Decimal::ZERO), 0);
        assert_eq!(percent_change(Decimal::ZERO, Decimal::from(40)), -100);
        assert_eq!(percent_change(Decimal::from(115), Decimal::from(100)), 15);
        assert_eq!(percent_change(Decimal::from(1), Decimal::from(3)), -67);
    }

    #[test]
    fn projection_never_divides_by_zero() {
        assert_eq!(project_run_rate(Decimal::from(70), 0, 7), Decimal::from(490));
        assert_eq!(project_run_rate(Decimal::from(100), 3, 7), Decimal::from(233));
    }
}
