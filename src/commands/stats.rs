// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::{BudgetStatus, PeriodMode};
use crate::session::Session;
use crate::store::{BudgetStore, TransactionStore};
use crate::utils::{fmt_amount, format_short, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub today_expense: Decimal,
    pub month_expense: Decimal,
    pub total_budget: Decimal,
    pub remaining: Decimal,
    pub status: BudgetStatus,
}

pub fn overview(session: &Session, now: NaiveDateTime) -> Overview {
    let warning = session.budget_warning(now);
    Overview {
        today_expense: session.today_expense(now),
        month_expense: session.month_expense(now),
        total_budget: warning.total_budget,
        remaining: warning.remaining,
        status: warning.status(),
    }
}

pub fn handle<S>(store: &S, m: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + BudgetStore,
{
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let now = chrono::Local::now().naive_local();
    let session = Session::attach(store, PeriodMode::Month)?;
    let ov = overview(&session, now);
    session.detach();

    if maybe_print_json(json_flag, jsonl_flag, &ov)? {
        return Ok(());
    }
    let row = |label: &str, v: &Decimal| vec![label.to_string(), format_short(v), fmt_amount(v)];
    let data = vec![
        row("Today", &ov.today_expense),
        row("This month", &ov.month_expense),
        row("Budget", &ov.total_budget),
        row("Remaining", &ov.remaining),
    ];
    println!("{}", pretty_table(&["", "Short", "Amount"], data));
    match ov.status {
        BudgetStatus::RunningLow => println!(
            "Warning: running low, only {} left this month.",
            fmt_amount(&ov.remaining)
        ),
        BudgetStatus::OverBudget => println!(
            "Warning: over budget by {}.",
            fmt_amount(&ov.remaining.abs())
        ),
        BudgetStatus::NotSet => println!("No budget set."),
        BudgetStatus::Healthy => {}
    }
    Ok(())
}
