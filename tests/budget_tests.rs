// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use smartfin::store::{BudgetStore, SqliteStore};
use smartfin::{cli, commands::budgets};

fn budget_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["smartfin", "budget"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("budget", b)) => b.clone(),
        _ => panic!("no budget subcommand"),
    }
}

#[test]
fn set_replaces_the_whole_record() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.load_budget().unwrap().is_none());

    budgets::handle(&store, &budget_matches(&["set", "--cash", "500000", "--bank", "2000000"]))
        .unwrap();
    let cfg = store.load_budget().unwrap().unwrap();
    assert_eq!(cfg.total(), Decimal::from(2_500_000));

    // omitted sources reset to zero rather than keeping old values
    budgets::handle(&store, &budget_matches(&["set", "--ewallet", "300000"])).unwrap();
    let cfg = store.load_budget().unwrap().unwrap();
    assert_eq!(cfg.cash, Decimal::ZERO);
    assert_eq!(cfg.bank, Decimal::ZERO);
    assert_eq!(cfg.e_wallet, Decimal::from(300_000));
}

#[test]
fn negative_budget_is_rejected() {
    let store = SqliteStore::open_in_memory().unwrap();
    let res = budgets::handle(&store, &budget_matches(&["set", "--cash=-5"]));
    assert!(res.is_err());
    assert!(store.load_budget().unwrap().is_none());
}

#[test]
fn show_without_budget_is_not_an_error() {
    let store = SqliteStore::open_in_memory().unwrap();
    budgets::handle(&store, &budget_matches(&["show", "--json"])).unwrap();
}
