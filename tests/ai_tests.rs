// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use smartfin::ai::parse::parse_transaction;
use smartfin::ai::{GeminiClient, StructuredRequest, StructuredService};
use smartfin::config::AppConfig;
use smartfin::error::ServiceError;
use smartfin::models::{Source, TransactionKind, CATEGORIES, FALLBACK_CATEGORY_ID};

struct Canned(&'static str);

impl StructuredService for Canned {
    fn complete(&self, _request: &StructuredRequest) -> Result<String, ServiceError> {
        Ok(self.0.to_string())
    }
}

struct Down;

impl StructuredService for Down {
    fn complete(&self, _request: &StructuredRequest) -> Result<String, ServiceError> {
        Err(ServiceError::Empty)
    }
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 1)
        .unwrap()
        .and_hms_opt(7, 30, 0)
        .unwrap()
}

#[test]
fn parsed_answer_becomes_a_cash_transaction_dated_now() {
    let svc = Canned(
        r#"{"amount": 45000, "type": "expense", "categoryName": "food & drink", "note": "Morning pho"}"#,
    );
    let tx = parse_transaction(&svc, "pho 45k", &CATEGORIES, now()).unwrap();
    assert_eq!(tx.amount, Decimal::from(45_000));
    assert_eq!(tx.kind, TransactionKind::Expense);
    assert_eq!(tx.category_id, "1");
    assert_eq!(tx.note, "Morning pho");
    assert_eq!(tx.date, now());
    assert_eq!(tx.source, Source::Cash);
}

#[test]
fn unknown_category_falls_back_to_other() {
    let svc = Canned(
        "```json\n{\"amount\": 20, \"type\": \"income\", \"categoryName\": \"Gifts\", \"note\": \"\"}\n```",
    );
    let tx = parse_transaction(&svc, "got 20 as a gift", &CATEGORIES, now()).unwrap();
    assert_eq!(tx.category_id, FALLBACK_CATEGORY_ID);
    assert_eq!(tx.kind, TransactionKind::Income);
    assert_eq!(tx.note, "No note");
}

#[test]
fn malformed_or_failed_answers_create_nothing() {
    let cases = [
        Canned("{\"amount\": \"lots\"}"),
        Canned(""),
        Canned("{\"amount\": -3, \"type\": \"expense\", \"categoryName\": \"Bills\", \"note\": \"x\"}"),
        Canned("{\"amount\": 3, \"type\": \"transfer\", \"categoryName\": \"Bills\", \"note\": \"x\"}"),
    ];
    for svc in &cases {
        assert!(parse_transaction(svc, "something", &CATEGORIES, now()).is_none());
    }
    assert!(parse_transaction(&Down, "coffee 30k", &CATEGORIES, now()).is_none());
    assert!(parse_transaction(&Canned("{}"), "   ", &CATEGORIES, now()).is_none());
}

#[test]
fn gemini_client_needs_a_key() {
    let config = AppConfig::from_lookup(|_| None);
    let client = reqwest::blocking::Client::new();
    assert!(matches!(
        GeminiClient::new(client, &config.ai),
        Err(ServiceError::NotConfigured(_))
    ));
}
