// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod sqlite;
pub mod subscription;

pub use sqlite::SqliteStore;
pub use subscription::{Channel, Listener, Subscription};

use crate::error::StoreError;
use crate::models::{BudgetConfig, NewTransaction, Transaction};
use std::rc::Rc;

/// Full ordered transaction set, newest first. Replaced wholesale on every change.
pub type TransactionSet = Rc<[Transaction]>;

pub trait TransactionStore {
    /// Stores the transaction and returns its assigned id.
    fn append(&self, tx: NewTransaction) -> Result<i64, StoreError>;

    /// Fails with [`StoreError::NotFound`] when the id is absent.
    fn delete(&self, id: i64) -> Result<(), StoreError>;

    /// Current contents ordered by creation time, newest first.
    fn snapshot(&self) -> Result<TransactionSet, StoreError>;

    /// Fires once immediately with the current set, then after every mutation.
    fn subscribe(&self, listener: Listener<TransactionSet>) -> Result<Subscription, StoreError>;
}

pub trait BudgetStore {
    fn load_budget(&self) -> Result<Option<BudgetConfig>, StoreError>;

    /// Replaces the whole record.
    fn overwrite_budget(&self, config: &BudgetConfig) -> Result<(), StoreError>;

    fn subscribe_budget(
        &self,
        listener: Listener<Option<BudgetConfig>>,
    ) -> Result<Subscription, StoreError>;
}
