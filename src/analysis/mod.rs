// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod breakdown;
pub mod warning;
pub mod window;

pub use aggregate::{aggregate, Analysis};
pub use warning::{should_warn, BudgetStatus, BudgetWarning};
pub use window::{resolve_windows, PeriodMode, PeriodWindows};
