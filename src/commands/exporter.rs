// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Transaction;
use crate::store::TransactionStore;
use crate::utils::format_datetime;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

pub const HEADERS: [&str; 7] = ["ID", "Date", "Amount", "Type", "CategoryId", "Note", "Source"];

pub fn handle<S: TransactionStore>(store: &S, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

pub fn default_file_name(today: NaiveDate) -> String {
    format!("SmartFin_Backup_{}.csv", today.format("%Y-%m-%d"))
}

fn export_transactions<S: TransactionStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let set = store.snapshot()?;
    if set.is_empty() {
        println!("Nothing to export yet.");
        return Ok(());
    }
    let out = sub
        .get_one::<String>("out")
        .cloned()
        .unwrap_or_else(|| default_file_name(chrono::Local::now().date_naive()));
    let file = std::fs::File::create(&out).with_context(|| format!("Create {}", out))?;
    write_csv(file, &set)?;
    println!("Exported {} transactions to {}", set.len(), out);
    Ok(())
}

/// UTF-8 with a BOM so spreadsheet apps pick the right encoding.
pub fn write_csv<W: Write>(mut w: W, transactions: &[Transaction]) -> Result<()> {
    w.write_all("\u{feff}".as_bytes())?;
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .from_writer(w);
    wtr.write_record(HEADERS)?;
    for t in transactions {
        wtr.write_record([
            t.id.to_string(),
            format_datetime(&t.date),
            t.amount.to_string(),
            t.kind.to_string(),
            t.category_id.clone(),
            t.note.clone(),
            t.source.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
