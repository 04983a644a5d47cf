// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use smartfin::analysis::{BudgetStatus, PeriodMode};
use smartfin::commands::{analysis, stats};
use smartfin::config::AppConfig;
use smartfin::models::{BudgetConfig, NewTransaction, Source, TransactionKind};
use smartfin::session::Session;
use smartfin::store::{BudgetStore, SqliteStore, TransactionStore};
use smartfin::{cli, utils};

#[test]
fn overview_reports_running_low() {
    let store = SqliteStore::open_in_memory().unwrap();
    let now = NaiveDate::from_ymd_opt(2025, 4, 10)
        .unwrap()
        .and_hms_opt(20, 0, 0)
        .unwrap();
    store
        .overwrite_budget(&BudgetConfig {
            bank: Decimal::from(1_000_000),
            ..BudgetConfig::default()
        })
        .unwrap();
    store
        .append(NewTransaction::new(
            Decimal::from(850_000),
            TransactionKind::Expense,
            "4",
            Some("Rent share"),
            now,
            Source::Bank,
        ))
        .unwrap();

    let session = Session::attach(&store, PeriodMode::Month).unwrap();
    let ov = stats::overview(&session, now);
    assert_eq!(ov.today_expense, Decimal::from(850_000));
    assert_eq!(ov.remaining, Decimal::from(150_000));
    assert_eq!(ov.status, BudgetStatus::RunningLow);
    assert_eq!(utils::format_short(&ov.month_expense), "850k");
}

#[test]
fn analysis_without_ai_key_still_prints() {
    utils::init_tracing();
    let store = SqliteStore::open_in_memory().unwrap();
    let config = AppConfig::from_lookup(|_| None);
    let matches = cli::build_cli().get_matches_from([
        "smartfin", "analysis", "--mode", "week", "--advice", "--json",
    ]);
    let Some(("analysis", sub)) = matches.subcommand() else {
        panic!("no analysis subcommand");
    };
    analysis::handle(&store, &config, sub).unwrap();
}

#[test]
fn mode_must_be_week_or_month() {
    let res = cli::build_cli().try_get_matches_from(["smartfin", "analysis", "--mode", "year"]);
    assert!(res.is_err());
}

#[test]
fn json_and_jsonl_conflict() {
    let res = cli::build_cli().try_get_matches_from(["smartfin", "stats", "--json", "--jsonl"]);
    assert!(res.is_err());
}
