// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::ImportError;
use crate::models::{NewTransaction, Source, TransactionKind};
use crate::store::TransactionStore;
use crate::utils::{parse_amount, parse_datetime};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

const BOM: char = '\u{feff}';

#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub transactions: Vec<NewTransaction>,
    pub skipped: usize,
}

pub fn handle<S: TransactionStore>(store: &S, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => import_transactions(store, sub),
        _ => Ok(()),
    }
}

fn import_transactions<S: TransactionStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").context("path missing")?.trim();
    let content = std::fs::read_to_string(path).with_context(|| format!("Open CSV {}", path))?;
    let outcome = parse_csv(&content).with_context(|| format!("Read CSV {}", path))?;

    let mut imported = 0usize;
    for tx in outcome.transactions {
        store.append(tx).context("Failed to save imported transaction")?;
        imported += 1;
    }
    info!(imported, skipped = outcome.skipped, path, "import finished");
    println!(
        "Imported {} transactions ({} rows skipped)",
        imported, outcome.skipped
    );
    Ok(())
}

/// Parses a backup file: header line, then `ID,Date,Amount,Type,CategoryId,Note[,Source]`.
/// The ID column is ignored; rows that cannot be read are counted and skipped.
pub fn parse_csv(content: &str) -> Result<ImportOutcome, ImportError> {
    let content = content.strip_prefix(BOM).unwrap_or(content);
    if content.lines().count() < 2 {
        return Err(ImportError::TooShort);
    }
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut outcome = ImportOutcome::default();
    for (line, result) in rdr.records().enumerate() {
        let rec = result?;
        if rec.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        match row_to_transaction(&rec) {
            Some(tx) => outcome.transactions.push(tx),
            None => {
                debug!(line = line + 2, "skipping malformed import row");
                outcome.skipped += 1;
            }
        }
    }
    Ok(outcome)
}

fn row_to_transaction(rec: &StringRecord) -> Option<NewTransaction> {
    if rec.len() < 6 {
        return None;
    }
    let date = parse_datetime(rec.get(1)?)?;
    let amount = parse_amount(rec.get(2)?).ok()?;
    let kind = rec.get(3)?.trim().parse::<TransactionKind>().ok()?;
    let category_id = rec.get(4)?.trim();
    let source = rec
        .get(6)
        .and_then(|s| s.trim().parse::<Source>().ok())
        .unwrap_or_default();
    Some(NewTransaction::new(
        amount,
        kind,
        category_id,
        rec.get(5),
        date,
        source,
    ))
}
