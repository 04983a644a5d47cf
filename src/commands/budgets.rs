// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::BudgetConfig;
use crate::store::BudgetStore;
use crate::utils::{fmt_amount, maybe_print_json, parse_amount, pretty_table};
use anyhow::{Context, Result};

pub fn handle<S: BudgetStore>(store: &S, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(store, sub)?,
        Some(("set", sub)) => set(store, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn config_from(sub: &clap::ArgMatches) -> Result<BudgetConfig> {
    let get = |name: &str| -> Result<rust_decimal::Decimal> {
        let raw = sub.get_one::<String>(name).map(String::as_str).unwrap_or("0");
        parse_amount(raw).with_context(|| format!("Invalid --{}", name))
    };
    Ok(BudgetConfig {
        cash: get("cash")?,
        bank: get("bank")?,
        e_wallet: get("ewallet")?,
    })
}

fn set<S: BudgetStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let config = config_from(sub)?;
    store
        .overwrite_budget(&config)
        .context("Failed to save budget")?;
    println!("Budget saved: total {}", fmt_amount(&config.total()));
    Ok(())
}

fn show<S: BudgetStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let Some(config) = store.load_budget()? else {
        println!("No budget set. Use `smartfin budget set`.");
        return Ok(());
    };
    if !maybe_print_json(json_flag, jsonl_flag, &config)? {
        let data = vec![
            vec!["Cash".to_string(), fmt_amount(&config.cash)],
            vec!["Bank".to_string(), fmt_amount(&config.bank)],
            vec!["E-wallet".to_string(), fmt_amount(&config.e_wallet)],
            vec!["Total".to_string(), fmt_amount(&config.total())],
        ];
        println!("{}", pretty_table(&["Source", "Amount"], data));
    }
    Ok(())
}
