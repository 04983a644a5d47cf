// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use smartfin::config::AppConfig;
use smartfin::store::SqliteStore;
use smartfin::{cli, commands, db, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = AppConfig::from_env();
    let path = db::db_path(&config)?;
    let store = SqliteStore::open(&path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&store, &config, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&store, sub)?,
        Some(("stats", sub)) => commands::stats::handle(&store, sub)?,
        Some(("analysis", sub)) => commands::analysis::handle(&store, &config, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, sub)?,
        Some(("category", sub)) => commands::categories::handle(sub)?,
        Some(("import", sub)) => commands::importer::handle(&store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
