// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::aggregate::sum_amounts;
use crate::models::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// History search: every set criterion must match. Date and amount bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub search: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Empty means every category.
    pub categories: Vec<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl HistoryFilter {
    pub fn is_active(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self.start.is_some()
            || self.end.is_some()
            || !self.categories.is_empty()
            || self.min_amount.is_some()
            || self.max_amount.is_some()
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        if let Some(term) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if !t.note.to_lowercase().contains(&term.to_lowercase()) {
                return false;
            }
        }
        let day = t.date.date();
        if self.start.is_some_and(|s| day < s) || self.end.is_some_and(|e| day > e) {
            return false;
        }
        if !self.categories.is_empty() && !self.categories.iter().any(|c| *c == t.category_id) {
            return false;
        }
        if self.min_amount.is_some_and(|m| t.amount < m)
            || self.max_amount.is_some_and(|m| t.amount > m)
        {
            return false;
        }
        true
    }

    /// Keeps the input order.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Expense total of an already-filtered list.
pub fn expense_total(transactions: &[&Transaction]) -> Decimal {
    sum_amounts(transactions.iter().copied().filter(|t| t.is_expense()))
}
