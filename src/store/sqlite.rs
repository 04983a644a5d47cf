// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{BudgetStore, Channel, Listener, Subscription, TransactionSet, TransactionStore};
use crate::db;
use crate::error::StoreError;
use crate::models::{BudgetConfig, NewTransaction, Source, Transaction, TransactionKind};
use crate::utils::{format_datetime, parse_datetime};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info};

/// Local stand-in for the remote document store: one SQLite connection plus
/// the live listeners for both collections.
pub struct SqliteStore {
    conn: Connection,
    transactions: Channel<TransactionSet>,
    budget: Channel<Option<BudgetConfig>>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            transactions: Channel::new(),
            budget: Channel::new(),
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(db::open_at(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(db::open_in_memory()?))
    }

    fn notify_transactions(&self) -> Result<(), StoreError> {
        if self.transactions.listener_count() > 0 {
            let set = self.snapshot()?;
            self.transactions.publish(&set);
        }
        Ok(())
    }
}

fn decimal_col(r: &Row<'_>, idx: usize, what: &str) -> Result<Decimal, StoreError> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>()
        .map_err(|_| StoreError::Corrupt(format!("invalid {} '{}'", what, s)))
}

fn row_to_transaction(r: &Row<'_>) -> Result<Transaction, StoreError> {
    let id: i64 = r.get(0)?;
    let amount = decimal_col(r, 1, "amount")?;
    let kind_s: String = r.get(2)?;
    let kind = kind_s
        .parse::<TransactionKind>()
        .map_err(StoreError::Corrupt)?;
    let category_id: String = r.get(3)?;
    let note: String = r.get(4)?;
    let date_s: String = r.get(5)?;
    let date = parse_datetime(&date_s)
        .ok_or_else(|| StoreError::Corrupt(format!("invalid date '{}' on {}", date_s, id)))?;
    let source_s: String = r.get(6)?;
    let source = source_s.parse::<Source>().unwrap_or_default();
    let created_s: String = r.get(7)?;
    let created_at = parse_datetime(&created_s).ok_or_else(|| {
        StoreError::Corrupt(format!("invalid created_at '{}' on {}", created_s, id))
    })?;
    Ok(Transaction {
        id,
        amount,
        kind,
        category_id,
        note,
        date,
        source,
        created_at,
    })
}

impl TransactionStore for SqliteStore {
    fn append(&self, tx: NewTransaction) -> Result<i64, StoreError> {
        if tx.amount.is_sign_negative() && !tx.amount.is_zero() {
            return Err(StoreError::NegativeAmount(tx.amount));
        }
        let created_at = chrono::Local::now().naive_local();
        self.conn.execute(
            "INSERT INTO transactions(amount, kind, category_id, note, date, source, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tx.amount.to_string(),
                tx.kind.as_str(),
                tx.category_id,
                tx.note,
                format_datetime(&tx.date),
                tx.source.as_str(),
                format_datetime(&created_at),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, amount = %tx.amount, kind = %tx.kind, "transaction appended");
        self.notify_transactions()?;
        Ok(id)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!(id, "transaction deleted");
        self.notify_transactions()
    }

    fn snapshot(&self) -> Result<TransactionSet, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, kind, category_id, note, date, source, created_at
             FROM transactions
             ORDER BY created_at DESC, id DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(row_to_transaction(r)?);
        }
        Ok(Rc::from(out))
    }

    fn subscribe(&self, listener: Listener<TransactionSet>) -> Result<Subscription, StoreError> {
        let set = self.snapshot()?;
        Ok(self.transactions.subscribe(&set, listener))
    }
}

impl BudgetStore for SqliteStore {
    fn load_budget(&self) -> Result<Option<BudgetConfig>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT cash, bank, e_wallet FROM budget WHERE id=1",
                [],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;
        let Some((cash, bank, e_wallet)) = row else {
            return Ok(None);
        };
        let parse = |s: &str| {
            s.parse::<Decimal>()
                .map_err(|_| StoreError::Corrupt(format!("invalid budget amount '{}'", s)))
        };
        Ok(Some(BudgetConfig {
            cash: parse(&cash)?,
            bank: parse(&bank)?,
            e_wallet: parse(&e_wallet)?,
        }))
    }

    fn overwrite_budget(&self, config: &BudgetConfig) -> Result<(), StoreError> {
        if !config.is_valid() {
            return Err(StoreError::NegativeBudget);
        }
        self.conn.execute(
            "INSERT INTO budget(id, cash, bank, e_wallet) VALUES (1, ?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                cash=excluded.cash, bank=excluded.bank, e_wallet=excluded.e_wallet",
            params![
                config.cash.to_string(),
                config.bank.to_string(),
                config.e_wallet.to_string()
            ],
        )?;
        info!(total = %config.total(), "budget overwritten");
        if self.budget.listener_count() > 0 {
            self.budget.publish(&Some(*config));
        }
        Ok(())
    }

    fn subscribe_budget(
        &self,
        listener: Listener<Option<BudgetConfig>>,
    ) -> Result<Subscription, StoreError> {
        let current = self.load_budget()?;
        Ok(self.budget.subscribe(&current, listener))
    }
}
