// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::aggregate::sum_amounts;
use super::window::{first_of_month, last_of_month};
use crate::models::Transaction;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    NotSet,
    Healthy,
    RunningLow,
    OverBudget,
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BudgetStatus::NotSet => "not set",
            BudgetStatus::Healthy => "healthy",
            BudgetStatus::RunningLow => "running low",
            BudgetStatus::OverBudget => "over budget",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWarning {
    pub total_budget: Decimal,
    pub remaining: Decimal,
    /// Running low: less than a fifth of the budget left.
    pub warn: bool,
    pub over_budget: bool,
}

impl BudgetWarning {
    pub fn status(&self) -> BudgetStatus {
        if self.total_budget <= Decimal::ZERO {
            BudgetStatus::NotSet
        } else if self.over_budget {
            BudgetStatus::OverBudget
        } else if self.warn {
            BudgetStatus::RunningLow
        } else {
            BudgetStatus::Healthy
        }
    }
}

pub fn low_balance_threshold(total_budget: Decimal) -> Decimal {
    total_budget * Decimal::new(2, 1)
}

/// Month-scoped low-balance check. An unset (zero) budget never warns and is
/// never reported as over budget.
pub fn should_warn(total_budget: Decimal, month_expense: Decimal) -> BudgetWarning {
    let remaining = total_budget - month_expense;
    let configured = total_budget > Decimal::ZERO;
    let over_budget = configured && remaining < Decimal::ZERO;
    let warn = configured
        && remaining > Decimal::ZERO
        && remaining < low_balance_threshold(total_budget);
    BudgetWarning {
        total_budget,
        remaining,
        warn,
        over_budget,
    }
}

/// Expenses dated anywhere in the calendar month containing `now`.
pub fn month_expense(transactions: &[Transaction], now: NaiveDateTime) -> Decimal {
    let today = now.date();
    sum_amounts(super::aggregate::expenses_between(
        transactions,
        first_of_month(today),
        last_of_month(today),
    ))
}

pub fn today_expense(transactions: &[Transaction], now: NaiveDateTime) -> Decimal {
    let today = now.date();
    sum_amounts(super::aggregate::expenses_between(transactions, today, today))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_flags() {
        let w = should_warn(Decimal::from(1000), Decimal::from(1200));
        assert!(w.over_budget && !w.warn);
        assert_eq!(w.status(), BudgetStatus::OverBudget);
        let healthy = should_warn(Decimal::from(1000), Decimal::from(100));
        assert_eq!(healthy.status(), BudgetStatus::Healthy);
        assert_eq!(should_warn(Decimal::ZERO, Decimal::from(100)).status(), BudgetStatus::NotSet);
    }
}
