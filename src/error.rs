// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised by the transaction and budget stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Transaction {0} not found")]
    NotFound(i64),
    #[error("Amount must not be negative (got {0})")]
    NegativeAmount(Decimal),
    #[error("Budget amounts must not be negative")]
    NegativeBudget,
    #[error("Corrupt record: {0}")]
    Corrupt(String),
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),
}

/// Failures talking to the text-completion services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("AI service not configured: {0}")]
    NotConfigured(String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Service returned an empty response")]
    Empty,
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid file: expected a header line and at least one row")]
    TooShort,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
