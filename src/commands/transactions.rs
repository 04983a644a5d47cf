// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::categories::resolve_category;
use crate::ai::parse::parse_transaction;
use crate::ai::GeminiClient;
use crate::config::AppConfig;
use crate::error::StoreError;
use crate::history::{expense_total, HistoryFilter};
use crate::models::{NewTransaction, Source, TransactionKind, CATEGORIES};
use crate::store::TransactionStore;
use crate::utils::{
    fmt_amount, format_datetime, http_client, maybe_print_json, parse_amount, parse_date,
    pretty_table,
};
use anyhow::{anyhow, Context, Result};
use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

pub fn handle<S: TransactionStore>(
    store: &S,
    config: &AppConfig,
    m: &clap::ArgMatches,
) -> Result<()> {
    let now = chrono::Local::now().naive_local();
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub, now)?,
        Some(("quick", sub)) => quick(store, config, sub, now)?,
        Some(("rm", sub)) => remove(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Builds a manual entry from `tx add` arguments.
pub fn new_transaction_from(
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<NewTransaction> {
    let amount = parse_amount(sub.get_one::<String>("amount").context("amount missing")?)?;
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionKind>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or(TransactionKind::Expense);
    let category = match sub.get_one::<String>("category") {
        Some(c) => resolve_category(c)?,
        None => &CATEGORIES[0],
    };
    let source = sub
        .get_one::<String>("source")
        .map(|s| s.parse::<Source>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();
    let date = if sub.get_flag("yesterday") {
        now - Duration::days(1)
    } else if let Some(d) = sub.get_one::<String>("date") {
        parse_date(d)?.and_time(now.time())
    } else {
        now
    };
    let note = sub.get_one::<String>("note").map(String::as_str);
    Ok(NewTransaction::new(amount, kind, category.id, note, date, source))
}

fn add<S: TransactionStore>(store: &S, sub: &clap::ArgMatches, now: NaiveDateTime) -> Result<()> {
    let tx = new_transaction_from(sub, now)?;
    let (amount, kind, date) = (tx.amount, tx.kind, tx.date);
    let id = store.append(tx).context("Failed to save transaction")?;
    println!(
        "Recorded {} {} on {} (id {})",
        kind,
        fmt_amount(&amount),
        date.date(),
        id
    );
    Ok(())
}

fn quick<S: TransactionStore>(
    store: &S,
    config: &AppConfig,
    sub: &clap::ArgMatches,
    now: NaiveDateTime,
) -> Result<()> {
    let text = sub
        .get_many::<String>("text")
        .map(|v| v.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    if !config.ai.is_configured() {
        eprintln!("AI is not configured; set SMARTFIN_API_KEY to use quick entry.");
        return Ok(());
    }
    let client = GeminiClient::new(http_client()?, &config.ai)?;
    match parse_transaction(&client, &text, &CATEGORIES, now) {
        Some(tx) => {
            let (amount, kind, category_id) = (tx.amount, tx.kind, tx.category_id.clone());
            let id = store.append(tx).context("Failed to save transaction")?;
            println!(
                "Recorded {} {} in category {} (id {})",
                kind,
                fmt_amount(&amount),
                category_id,
                id
            );
        }
        None => println!("Could not understand that; no transaction was created."),
    }
    Ok(())
}

fn remove<S: TransactionStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("id missing")?;
    match store.delete(id) {
        Ok(()) => println!("Removed transaction {}", id),
        Err(StoreError::NotFound(_)) => {
            eprintln!("Could not delete: transaction {} not found", id)
        }
        Err(e) => return Err(e).context("Failed to delete transaction"),
    }
    Ok(())
}

pub fn filter_from(sub: &clap::ArgMatches) -> Result<HistoryFilter> {
    let categories = match sub.get_many::<String>("category") {
        Some(vals) => vals
            .map(|c| resolve_category(c).map(|cat| cat.id.to_string()))
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };
    Ok(HistoryFilter {
        search: sub.get_one::<String>("search").cloned(),
        start: sub.get_one::<String>("from").map(|s| parse_date(s)).transpose()?,
        end: sub.get_one::<String>("to").map(|s| parse_date(s)).transpose()?,
        categories,
        min_amount: sub.get_one::<String>("min").map(|s| parse_amount(s)).transpose()?,
        max_amount: sub.get_one::<String>("max").map(|s| parse_amount(s)).transpose()?,
    })
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub note: String,
    pub source: String,
}

pub struct HistoryPage {
    pub rows: Vec<TransactionRow>,
    /// Expense total over every match, before `--limit`.
    pub expense_total: rust_decimal::Decimal,
    pub filtered: bool,
}

pub fn query_rows<S: TransactionStore>(
    store: &S,
    sub: &clap::ArgMatches,
) -> Result<HistoryPage> {
    let filter = filter_from(sub)?;
    let set = store.snapshot()?;
    let matched = filter.apply(&set);
    let total = expense_total(&matched);
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    let rows = matched
        .into_iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id,
            date: format_datetime(&t.date),
            kind: t.kind.to_string(),
            amount: t.amount.to_string(),
            category: t
                .category()
                .map(|c| c.name.to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            note: t.note.clone(),
            source: t.source.to_string(),
        })
        .collect();
    Ok(HistoryPage {
        rows,
        expense_total: total,
        filtered: filter.is_active(),
    })
}

fn list<S: TransactionStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let page = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &page.rows)? {
        let rows: Vec<Vec<String>> = page
            .rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.amount.clone(),
                    r.category.clone(),
                    r.note.clone(),
                    r.source.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Amount", "Category", "Note", "Source"],
                rows,
            )
        );
        let label = if page.filtered { "Total spent (filtered)" } else { "Total spent" };
        println!("{}: {}", label, fmt_amount(&page.expense_total));
    }
    Ok(())
}
