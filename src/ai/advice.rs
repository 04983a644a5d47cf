// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{StructuredRequest, StructuredService};
use crate::analysis::{Analysis, PeriodMode, PeriodWindows};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

/// Exact payload shape sent to the advice service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceRequest {
    pub mode: PeriodMode,
    pub current_total: Decimal,
    pub previous_total: Decimal,
    pub top_category_name: String,
    pub top_category_diff_percent: i64,
    pub projected_total: Decimal,
    pub budget_limit: Decimal,
    pub remaining_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResponse {
    pub forecast_text: String,
}

pub fn build_advice_request(analysis: &Analysis, windows: &PeriodWindows) -> AdviceRequest {
    AdviceRequest {
        mode: analysis.mode,
        current_total: analysis.current_total,
        previous_total: analysis.previous_total,
        top_category_name: analysis.top_category_name.clone(),
        top_category_diff_percent: analysis.top_category_diff_percent,
        projected_total: analysis.projected_total,
        budget_limit: analysis.budget_limit,
        remaining_days: windows.total_days.saturating_sub(windows.days_passed),
    }
}

pub fn advice_prompt(req: &AdviceRequest) -> StructuredRequest {
    let period = match req.mode {
        PeriodMode::Week => "Week",
        PeriodMode::Month => "Month",
    };
    let prompt = format!(
        "Act as the SmartFin assistant. Based on this data:\n\
         - Period: {period}\n\
         - Spent so far: {}\n\
         - Budget: {}\n\
         - Top spending category: {} (change {}%)\n\
         - Projected end-of-period total: {}\n\
         - Days remaining: {}\n\n\
         Write exactly one short sentence of commentary or forecast, with an emoji. \
         Example: \"At this pace you will finish the week about 500k under budget, nice work! 🎉\" \
         or \"Warning: the current pace leaves you 200k short by the end of the month ⚠️\"",
        req.current_total,
        req.budget_limit,
        req.top_category_name,
        req.top_category_diff_percent,
        req.projected_total,
        req.remaining_days,
    );
    StructuredRequest {
        prompt,
        schema: json!({
            "type": "OBJECT",
            "properties": { "forecastText": { "type": "STRING" } },
            "required": ["forecastText"]
        }),
    }
}

/// `None` on any failure or blank text; callers keep whatever they showed before.
pub fn request_advice<S: StructuredService>(service: &S, req: &AdviceRequest) -> Option<String> {
    match service.generate_structured::<AdviceResponse>(&advice_prompt(req)) {
        Ok(resp) => {
            let text = resp.forecast_text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        Err(e) => {
            warn!(error = %e, "advice request failed");
            None
        }
    }
}

/// Identifies one advice request; only the newest ticket may apply its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceTicket {
    generation: u64,
}

/// Monotonic request-generation counter guarding against out-of-order answers.
#[derive(Debug, Default)]
pub struct AdviceGuard {
    generation: u64,
}

impl AdviceGuard {
    pub fn issue(&mut self) -> AdviceTicket {
        self.generation += 1;
        AdviceTicket {
            generation: self.generation,
        }
    }

    /// Makes every outstanding ticket stale.
    pub fn invalidate(&mut self) {
        self.generation += 1;
    }

    pub fn is_current(&self, ticket: AdviceTicket) -> bool {
        ticket.generation == self.generation
    }
}
