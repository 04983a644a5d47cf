// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::saturating_add;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_NOTE: &str = "No note";
pub const FALLBACK_CATEGORY_ID: &str = "7";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Expense,
    Income,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Expense => "expense",
            TransactionKind::Income => "income",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(TransactionKind::Expense),
            "income" => Ok(TransactionKind::Income),
            other => Err(format!("unknown transaction type '{}'", other)),
        }
    }
}

/// Where the money moved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Cash,
    Bank,
    Momo,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Cash => "cash",
            Source::Bank => "bank",
            Source::Momo => "momo",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Source::Cash),
            "bank" => Ok(Source::Bank),
            "momo" => Ok(Source::Momo),
            other => Err(format!("unknown source '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

pub const CATEGORIES: [Category; 7] = [
    Category { id: "1", name: "Food & Drink", icon: "🍟", color: "#FF9500" },
    Category { id: "2", name: "Transport", icon: "🚕", color: "#5856D6" },
    Category { id: "3", name: "Shopping", icon: "🛒", color: "#FF2D55" },
    Category { id: "4", name: "Bills", icon: "🧾", color: "#AF52DE" },
    Category { id: "5", name: "Entertainment", icon: "🎮", color: "#32ADE6" },
    Category { id: "6", name: "Salary", icon: "💵", color: "#34C759" },
    Category { id: "7", name: "Other", icon: "🌈", color: "#8E8E93" },
];

pub fn category_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == id)
}

/// Case-insensitive lookup, used for CLI input and AI-parsed names.
pub fn category_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    let needle = name.trim().to_lowercase();
    categories.iter().find(|c| c.name.to_lowercase() == needle)
}

pub fn fallback_category() -> &'static Category {
    &CATEGORIES[CATEGORIES.len() - 1]
}

/// A transaction as submitted to the store, before it has an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category_id: String,
    pub note: String,
    pub date: NaiveDateTime,
    pub source: Source,
}

impl NewTransaction {
    pub fn new(
        amount: Decimal,
        kind: TransactionKind,
        category_id: impl Into<String>,
        note: Option<&str>,
        date: NaiveDateTime,
        source: Source,
    ) -> Self {
        let note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_NOTE)
            .to_string();
        Self {
            amount,
            kind,
            category_id: category_id.into(),
            note,
            date,
            source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub kind: TransactionKind,
    pub category_id: String,
    pub note: String,
    pub date: NaiveDateTime,
    pub source: Source,
    pub created_at: NaiveDateTime,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn category(&self) -> Option<&'static Category> {
        category_by_id(&CATEGORIES, &self.category_id)
    }
}

/// Funds available per source at the start of the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub cash: Decimal,
    pub bank: Decimal,
    #[serde(rename = "eWallet")]
    pub e_wallet: Decimal,
}

impl BudgetConfig {
    pub fn total(&self) -> Decimal {
        saturating_add(saturating_add(self.cash, self.bank), self.e_wallet)
    }

    pub fn is_valid(&self) -> bool {
        !self.cash.is_sign_negative()
            && !self.bank.is_sign_negative()
            && !self.e_wallet.is_sign_negative()
    }
}
