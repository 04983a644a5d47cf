// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analysis::breakdown::{category_breakdown, daily_totals, month_calendar, MonthCalendar};
use crate::models::{category_by_id, CATEGORIES};
use crate::store::TransactionStore;
use crate::utils::{fmt_amount, format_short, maybe_print_json, pretty_table, saturating_add};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle<S: TransactionStore>(store: &S, m: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    match m.subcommand() {
        Some(("by-category", sub)) => by_category(store, sub)?,
        Some(("daily", sub)) => daily(store, sub, today)?,
        Some(("calendar", sub)) => calendar(store, sub, today)?,
        _ => {}
    }
    Ok(())
}

fn by_category<S: TransactionStore>(store: &S, sub: &clap::ArgMatches) -> Result<()> {
    let set = store.snapshot()?;
    let shares = category_breakdown(&set, &CATEGORIES);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &shares)? {
        return Ok(());
    }
    let total = shares
        .iter()
        .fold(Decimal::ZERO, |acc, s| saturating_add(acc, s.total));
    let data = shares
        .iter()
        .map(|s| {
            let icon = category_by_id(&CATEGORIES, &s.category_id)
                .map(|c| c.icon)
                .unwrap_or("");
            let pct = if total.is_zero() {
                Decimal::ZERO
            } else {
                (s.total / total * Decimal::ONE_HUNDRED).round_dp(1)
            };
            vec![
                format!("{} {}", icon, s.name),
                fmt_amount(&s.total),
                format!("{}%", pct),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], data));
    Ok(())
}

fn daily<S: TransactionStore>(
    store: &S,
    sub: &clap::ArgMatches,
    today: chrono::NaiveDate,
) -> Result<()> {
    let days = sub.get_one::<u32>("days").copied().unwrap_or(7);
    let set = store.snapshot()?;
    let totals = daily_totals(&set, today, days);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        return Ok(());
    }
    let data = totals
        .iter()
        .map(|d| {
            vec![
                d.date.format("%a %d/%m").to_string(),
                fmt_amount(&d.total),
                format_short(&d.total),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Day", "Spent", "Short"], data));
    Ok(())
}

/// Renders the month as a Monday-first grid, one row per week.
pub fn calendar_grid(cal: &MonthCalendar) -> Vec<Vec<String>> {
    let mut cells: Vec<String> = (0..cal.leading_blanks).map(|_| String::new()).collect();
    for d in &cal.days {
        let day = d.date.format("%-d").to_string();
        if d.total.is_zero() {
            cells.push(day);
        } else {
            cells.push(format!("{}\n{}", day, format_short(&d.total)));
        }
    }
    while cells.len() % 7 != 0 {
        cells.push(String::new());
    }
    cells.chunks(7).map(|w| w.to_vec()).collect()
}

fn calendar<S: TransactionStore>(
    store: &S,
    sub: &clap::ArgMatches,
    today: chrono::NaiveDate,
) -> Result<()> {
    let set = store.snapshot()?;
    let cal = month_calendar(&set, today);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cal)? {
        return Ok(());
    }
    println!("{:04}-{:02}", cal.year, cal.month);
    println!(
        "{}",
        pretty_table(
            &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
            calendar_grid(&cal),
        )
    );
    Ok(())
}
