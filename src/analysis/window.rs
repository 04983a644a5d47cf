// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Calendar windows for the current-vs-previous period comparison.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weeks are budgeted as a quarter of the monthly funds.
const WEEKS_PER_MONTH: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodMode {
    Week,
    #[default]
    Month,
}

impl PeriodMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodMode::Week => "week",
            PeriodMode::Month => "month",
        }
    }
}

impl fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(PeriodMode::Week),
            "month" => Ok(PeriodMode::Month),
            other => Err(format!("unknown period '{}', expected week|month", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodWindows {
    pub mode: PeriodMode,
    /// Upper bound of the current window, kept at full precision.
    pub now: NaiveDateTime,
    pub current_start: NaiveDate,
    pub current_end: NaiveDate,
    pub previous_start: NaiveDate,
    pub previous_end: NaiveDate,
    pub budget_limit: Decimal,
    /// Always within `1..=total_days`.
    pub days_passed: u32,
    pub total_days: u32,
}

pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d - Duration::days(i64::from(d.day0()))
}

pub fn last_of_month(d: NaiveDate) -> NaiveDate {
    // day 1 + 32 days always lands in the following month
    let next_month = first_of_month(first_of_month(d) + Duration::days(32));
    next_month - Duration::days(1)
}

pub fn days_in_month(d: NaiveDate) -> u32 {
    last_of_month(d).day()
}

/// Monday of the week containing `d`.
pub fn week_start(d: NaiveDate) -> NaiveDate {
    d - Duration::days(i64::from(d.weekday().num_days_from_monday()))
}

/// Resolves both comparison windows for `mode` around `now`.
pub fn resolve_windows(
    mode: PeriodMode,
    now: NaiveDateTime,
    total_budget: Decimal,
) -> PeriodWindows {
    let today = now.date();
    match mode {
        PeriodMode::Week => {
            let current_start = week_start(today);
            let previous_start = current_start - Duration::days(7);
            let elapsed = (today - current_start).num_days() + 1;
            PeriodWindows {
                mode,
                now,
                current_start,
                current_end: current_start + Duration::days(6),
                previous_start,
                previous_end: previous_start + Duration::days(6),
                budget_limit: total_budget / Decimal::from(WEEKS_PER_MONTH),
                days_passed: elapsed.clamp(1, 7) as u32,
                total_days: 7,
            }
        }
        PeriodMode::Month => {
            let current_start = first_of_month(today);
            let previous_end = current_start - Duration::days(1);
            PeriodWindows {
                mode,
                now,
                current_start,
                current_end: last_of_month(today),
                previous_start: first_of_month(previous_end),
                previous_end,
                budget_limit: total_budget,
                days_passed: today.day(),
                total_days: days_in_month(today),
            }
        }
    }
}
