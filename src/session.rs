// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Live view state fed by store subscriptions.
//!
//! A [`Session`] owns one subscription per store for its whole lifetime and
//! mirrors the latest transaction set and budget. Every derived figure is
//! recomputed from that mirror on demand. Advice answers pass through an
//! [`AdviceGuard`] so a slow reply to an old request cannot overwrite a newer one.

use crate::ai::advice::{build_advice_request, request_advice};
use crate::ai::{AdviceGuard, AdviceRequest, AdviceTicket, StructuredService};
use crate::analysis::warning::{month_expense, today_expense};
use crate::analysis::{
    aggregate, resolve_windows, should_warn, Analysis, BudgetWarning, PeriodMode, PeriodWindows,
};
use crate::error::StoreError;
use crate::models::{BudgetConfig, CATEGORIES};
use crate::store::{BudgetStore, Subscription, TransactionSet, TransactionStore};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

struct SessionState {
    transactions: TransactionSet,
    budget: BudgetConfig,
    mode: PeriodMode,
    advice: Option<String>,
    guard: AdviceGuard,
}

pub struct Session {
    state: Rc<RefCell<SessionState>>,
    subscriptions: Vec<Subscription>,
}

impl Session {
    pub fn attach<S>(store: &S, mode: PeriodMode) -> Result<Self, StoreError>
    where
        S: TransactionStore + BudgetStore,
    {
        let state = Rc::new(RefCell::new(SessionState {
            transactions: Rc::from(Vec::new()),
            budget: BudgetConfig::default(),
            mode,
            advice: None,
            guard: AdviceGuard::default(),
        }));

        let tx_state = Rc::clone(&state);
        let tx_sub = store.subscribe(Box::new(move |set: &TransactionSet| {
            tx_state.borrow_mut().transactions = Rc::clone(set);
        }))?;

        let budget_state = Rc::clone(&state);
        let budget_sub = store.subscribe_budget(Box::new(move |cfg: &Option<BudgetConfig>| {
            budget_state.borrow_mut().budget = cfg.unwrap_or_default();
        }))?;

        Ok(Self {
            state,
            subscriptions: vec![tx_sub, budget_sub],
        })
    }

    /// Releases both store subscriptions.
    pub fn detach(mut self) {
        for sub in self.subscriptions.drain(..) {
            sub.release();
        }
    }

    pub fn transactions(&self) -> TransactionSet {
        Rc::clone(&self.state.borrow().transactions)
    }

    pub fn budget(&self) -> BudgetConfig {
        self.state.borrow().budget
    }

    pub fn total_budget(&self) -> Decimal {
        self.budget().total()
    }

    pub fn mode(&self) -> PeriodMode {
        self.state.borrow().mode
    }

    /// Switching to a different mode drops the shown advice and any request in flight.
    pub fn set_mode(&self, mode: PeriodMode) {
        let mut st = self.state.borrow_mut();
        if st.mode != mode {
            st.mode = mode;
            st.advice = None;
            st.guard.invalidate();
        }
    }

    pub fn windows(&self, now: NaiveDateTime) -> PeriodWindows {
        resolve_windows(self.mode(), now, self.total_budget())
    }

    pub fn analysis(&self, now: NaiveDateTime) -> Analysis {
        let windows = self.windows(now);
        aggregate(&self.transactions(), &windows, &CATEGORIES)
    }

    pub fn budget_warning(&self, now: NaiveDateTime) -> BudgetWarning {
        should_warn(self.total_budget(), month_expense(&self.transactions(), now))
    }

    pub fn today_expense(&self, now: NaiveDateTime) -> Decimal {
        today_expense(&self.transactions(), now)
    }

    pub fn month_expense(&self, now: NaiveDateTime) -> Decimal {
        month_expense(&self.transactions(), now)
    }

    pub fn advice(&self) -> Option<String> {
        self.state.borrow().advice.clone()
    }

    pub fn begin_advice(&self, now: NaiveDateTime) -> (AdviceTicket, AdviceRequest) {
        let windows = self.windows(now);
        let analysis = aggregate(&self.transactions(), &windows, &CATEGORIES);
        let ticket = self.state.borrow_mut().guard.issue();
        (ticket, build_advice_request(&analysis, &windows))
    }

    /// Applies `text` only when `ticket` is still the newest request.
    /// Returns whether the shown advice changed.
    pub fn finish_advice(&self, ticket: AdviceTicket, text: Option<String>) -> bool {
        let mut st = self.state.borrow_mut();
        if !st.guard.is_current(ticket) {
            debug!("discarding stale advice response");
            return false;
        }
        match text {
            Some(t) => {
                st.advice = Some(t);
                true
            }
            None => false,
        }
    }

    pub fn refresh_advice<S: StructuredService>(&self, service: &S, now: NaiveDateTime) -> bool {
        let (ticket, request) = self.begin_advice(now);
        let text = request_advice(service, &request);
        self.finish_advice(ticket, text)
    }
}
