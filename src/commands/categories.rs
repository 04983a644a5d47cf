// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{category_by_id, category_by_name, Category, CATEGORIES};
use crate::utils::pretty_table;
use anyhow::{anyhow, Result};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", _)) = m.subcommand() {
        let data = CATEGORIES
            .iter()
            .map(|c| {
                vec![
                    c.id.to_string(),
                    format!("{} {}", c.icon, c.name),
                    c.color.to_string(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Category", "Color"], data));
    }
    Ok(())
}

/// Accepts either a category id ("3") or a name ("shopping").
pub fn resolve_category(input: &str) -> Result<&'static Category> {
    let input = input.trim();
    category_by_id(&CATEGORIES, input)
        .or_else(|| category_by_name(&CATEGORIES, input))
        .ok_or_else(|| anyhow!("Category '{}' not found", input))
}
