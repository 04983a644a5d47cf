// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ai::GeminiClient;
use crate::analysis::{Analysis, PeriodMode};
use crate::config::AppConfig;
use crate::session::Session;
use crate::store::{BudgetStore, TransactionStore};
use crate::utils::{fmt_amount, http_client, maybe_print_json, pretty_table};
use anyhow::{anyhow, Result};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisOutput<'a> {
    #[serde(flatten)]
    analysis: &'a Analysis,
    advice: Option<String>,
}

pub fn handle<S>(store: &S, config: &AppConfig, m: &clap::ArgMatches) -> Result<()>
where
    S: TransactionStore + BudgetStore,
{
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let mode = m
        .get_one::<String>("mode")
        .map(|s| s.parse::<PeriodMode>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();
    let now = chrono::Local::now().naive_local();
    let session = Session::attach(store, mode)?;
    let analysis = session.analysis(now);

    if m.get_flag("advice") {
        if config.ai.is_configured() {
            let client = GeminiClient::new(http_client()?, &config.ai)?;
            session.refresh_advice(&client, now);
        } else {
            eprintln!("AI is not configured; set SMARTFIN_API_KEY to get advice.");
        }
    }
    let advice = session.advice();
    session.detach();

    let out = AnalysisOutput {
        analysis: &analysis,
        advice,
    };
    if maybe_print_json(json_flag, jsonl_flag, &out)? {
        return Ok(());
    }

    let label = match mode {
        PeriodMode::Week => "week",
        PeriodMode::Month => "month",
    };
    let top = if analysis.top_category_id.is_some() {
        format!(
            "{} {} ({:+}%)",
            analysis.top_category_icon,
            analysis.top_category_name,
            analysis.top_category_diff_percent
        )
    } else {
        format!("{} {}", analysis.top_category_icon, analysis.top_category_name)
    };
    let data = vec![
        vec![format!("This {}", label), fmt_amount(&analysis.current_total)],
        vec![format!("Last {}", label), fmt_amount(&analysis.previous_total)],
        vec!["Top category".to_string(), top],
        vec!["Projected".to_string(), fmt_amount(&analysis.projected_total)],
        vec!["Budget".to_string(), fmt_amount(&analysis.budget_limit)],
        vec![
            "On track".to_string(),
            if analysis.is_safe { "yes" } else { "no" }.to_string(),
        ],
    ];
    println!("{}", pretty_table(&["", "Value"], data));
    if let Some(text) = &out.advice {
        println!("{}", text);
    }
    Ok(())
}
