// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use smartfin::models::{NewTransaction, Source, TransactionKind, DEFAULT_NOTE};
use smartfin::store::{SqliteStore, TransactionStore};
use smartfin::{cli, commands::transactions};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn setup() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    let rows = [
        ("50000", TransactionKind::Expense, "1", "Lunch with team", at(2025, 1, 1)),
        ("120000", TransactionKind::Expense, "3", "New shoes", at(2025, 1, 2)),
        ("9000000", TransactionKind::Income, "6", "January salary", at(2025, 1, 3)),
    ];
    for (amount, kind, cat, note, date) in rows {
        store
            .append(NewTransaction::new(
                amount.parse().unwrap(),
                kind,
                cat,
                Some(note),
                date,
                Source::Cash,
            ))
            .unwrap();
    }
    store
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["smartfin", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", tx_m)) => match tx_m.subcommand() {
            Some(("list", list_m)) => list_m.clone(),
            _ => panic!("no list subcommand"),
        },
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn list_limit_respected() {
    let store = setup();
    let page = transactions::query_rows(&store, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.rows[0].note, "January salary");
    // the total covers every match, not just the shown page
    assert_eq!(page.expense_total, Decimal::from(170_000));
    // a limit alone does not narrow the total
    assert!(!page.filtered);
}

#[test]
fn list_filters_combine() {
    let store = setup();
    let page = transactions::query_rows(
        &store,
        &list_matches(&["--search", "LUNCH", "--from", "2025-01-01", "--to", "2025-01-01"]),
    )
    .unwrap();
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].category, "Food & Drink");
    assert!(page.filtered);

    let page = transactions::query_rows(
        &store,
        &list_matches(&["--category", "shopping", "--category", "6", "--min", "100000"]),
    )
    .unwrap();
    assert_eq!(page.rows.len(), 2);
    assert_eq!(page.expense_total, Decimal::from(120_000));
}

#[test]
fn list_rejects_unknown_category() {
    let store = setup();
    assert!(transactions::query_rows(&store, &list_matches(&["--category", "Pets"])).is_err());
}

#[test]
fn add_arguments_build_a_retroactive_entry() {
    let matches = cli::build_cli().get_matches_from([
        "smartfin", "tx", "add", "--amount", "35000", "--category", "transport", "--note", "  ",
        "--yesterday", "--source", "momo",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("add", add_m)) = tx_m.subcommand() else {
        panic!("no add subcommand");
    };
    let now = at(2025, 3, 1);
    let tx = transactions::new_transaction_from(add_m, now).unwrap();
    assert_eq!(tx.date, at(2025, 2, 28));
    assert_eq!(tx.category_id, "2");
    assert_eq!(tx.note, DEFAULT_NOTE);
    assert_eq!(tx.kind, TransactionKind::Expense);
    assert_eq!(tx.source, Source::Momo);
}

#[test]
fn add_with_explicit_date_keeps_time_of_day() {
    let matches = cli::build_cli().get_matches_from([
        "smartfin", "tx", "add", "--amount", "10", "--type", "income", "--date", "2025-02-14",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("add", add_m)) = tx_m.subcommand() else {
        panic!("no add subcommand");
    };
    let tx = transactions::new_transaction_from(add_m, at(2025, 3, 1)).unwrap();
    assert_eq!(tx.date, at(2025, 2, 14));
    assert_eq!(tx.kind, TransactionKind::Income);
    assert_eq!(tx.category_id, "1");
}

#[test]
fn yesterday_conflicts_with_date() {
    let res = cli::build_cli().try_get_matches_from([
        "smartfin", "tx", "add", "--amount", "10", "--date", "2025-02-14", "--yesterday",
    ]);
    assert!(res.is_err());
}

#[test]
fn removing_missing_id_is_reported_not_fatal() {
    let store = setup();
    let matches = cli::build_cli().get_matches_from(["smartfin", "tx", "rm", "--id", "999"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let config = smartfin::config::AppConfig::from_lookup(|_| None);
    transactions::handle(&store, &config, tx_m).unwrap();
    assert_eq!(store.snapshot().unwrap().len(), 3);
}

#[test]
fn quick_entry_without_a_key_is_a_no_op() {
    let store = setup();
    let matches =
        cli::build_cli().get_matches_from(["smartfin", "tx", "quick", "coffee", "30k"]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let config = smartfin::config::AppConfig::from_lookup(|_| None);
    assert!(!config.ai.is_configured());
    transactions::handle(&store, &config, tx_m).unwrap();
    assert_eq!(store.snapshot().unwrap().len(), 3);
}
