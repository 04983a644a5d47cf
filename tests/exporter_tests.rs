// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use smartfin::commands::importer::parse_csv;
use smartfin::models::{NewTransaction, Source, TransactionKind};
use smartfin::store::{SqliteStore, TransactionStore};
use smartfin::{cli, commands::exporter};
use tempfile::tempdir;

fn seeded_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    let date = NaiveDate::from_ymd_opt(2025, 1, 2)
        .unwrap()
        .and_hms_opt(8, 15, 0)
        .unwrap();
    store
        .append(NewTransaction::new(
            Decimal::new(1234, 2),
            TransactionKind::Expense,
            "1",
            Some("Coffee \"large\", oat"),
            date,
            Source::Bank,
        ))
        .unwrap();
    store
}

#[test]
fn export_transactions_writes_bom_and_quoted_notes() {
    let store = seeded_store();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("backup.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["smartfin", "export", "transactions", "--out", &out_str]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&store, export_m).unwrap();
    } else {
        panic!("no export subcommand");
    }

    let content = std::fs::read_to_string(&out_path).unwrap();
    assert!(content.starts_with('\u{feff}'));
    let mut lines = content.trim_start_matches('\u{feff}').lines();
    assert_eq!(
        lines.next().unwrap(),
        "\"ID\",\"Date\",\"Amount\",\"Type\",\"CategoryId\",\"Note\",\"Source\""
    );
    let row = lines.next().unwrap();
    assert!(row.contains("\"Coffee \"\"large\"\", oat\""));
    assert!(row.contains("12.34"));
    assert!(row.ends_with("\"bank\""));
}

#[test]
fn exported_file_reads_back_as_the_same_entries() {
    let store = seeded_store();
    let set = store.snapshot().unwrap();
    let mut buf = Vec::new();
    exporter::write_csv(&mut buf, &set).unwrap();

    let parsed = parse_csv(&String::from_utf8(buf).unwrap()).unwrap();
    assert_eq!(parsed.skipped, 0);
    assert_eq!(parsed.transactions.len(), 1);
    let tx = &parsed.transactions[0];
    assert_eq!(tx.amount, set[0].amount);
    assert_eq!(tx.note, set[0].note);
    assert_eq!(tx.date, set[0].date);
    assert_eq!(tx.source, Source::Bank);
}

#[test]
fn empty_store_exports_nothing() {
    let store = SqliteStore::open_in_memory().unwrap();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("empty.csv");
    let out_str = out_path.to_string_lossy().to_string();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["smartfin", "export", "transactions", "--out", &out_str]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(&store, export_m).unwrap();
    }
    assert!(!out_path.exists());
}

#[test]
fn default_backup_name_carries_the_date() {
    let day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
    assert_eq!(exporter::default_file_name(day), "SmartFin_Backup_2025-03-09.csv");
}
