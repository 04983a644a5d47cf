// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{StructuredRequest, StructuredService};
use crate::models::{
    category_by_name, fallback_category, Category, NewTransaction, Source, TransactionKind,
};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

/// Response schema of the parsing service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub category_name: String,
    pub note: String,
}

pub fn parse_prompt(text: &str, categories: &[Category]) -> StructuredRequest {
    let names: Vec<&str> = categories.iter().map(|c| c.name).collect();
    StructuredRequest {
        prompt: format!(
            "Turn the following sentence into transaction data: \"{}\". Available categories: {}.",
            text.trim(),
            names.join(", ")
        ),
        schema: json!({
            "type": "OBJECT",
            "properties": {
                "amount": { "type": "NUMBER", "description": "Transaction amount" },
                "type": { "type": "STRING", "description": "income or expense" },
                "categoryName": {
                    "type": "STRING",
                    "description": "Best matching category name from the given list"
                },
                "note": { "type": "STRING", "description": "Short note" }
            },
            "required": ["amount", "type", "categoryName", "note"]
        }),
    }
}

/// Converts a parsed answer into a transaction dated `now`, paid in cash.
/// Unknown category names land in the fallback category; a non-finite or
/// negative amount rejects the whole answer.
pub fn into_new_transaction(
    parsed: &ParsedTransaction,
    categories: &[Category],
    now: NaiveDateTime,
) -> Option<NewTransaction> {
    if !parsed.amount.is_finite() || parsed.amount < 0.0 {
        return None;
    }
    let amount = Decimal::try_from(parsed.amount).ok()?;
    let category_id = category_by_name(categories, &parsed.category_name)
        .map(|c| c.id)
        .unwrap_or(fallback_category().id);
    Some(NewTransaction::new(
        amount,
        parsed.kind,
        category_id,
        Some(parsed.note.as_str()),
        now,
        Source::Cash,
    ))
}

/// Fails closed: any service or shape error yields `None`.
pub fn parse_transaction<S: StructuredService>(
    service: &S,
    text: &str,
    categories: &[Category],
    now: NaiveDateTime,
) -> Option<NewTransaction> {
    if text.trim().is_empty() {
        return None;
    }
    match service.generate_structured::<ParsedTransaction>(&parse_prompt(text, categories)) {
        Ok(parsed) => into_new_transaction(&parsed, categories, now),
        Err(e) => {
            warn!(error = %e, "transaction parsing failed");
            None
        }
    }
}
