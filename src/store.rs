// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::models::{Category, NewCategory, NewTransaction, Period, Transaction};
use chrono::{DateTime, Utc};
use std::fmt;

/// Identity of the caller on whose behalf the store is accessed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Owner(String);

impl Owner {
    pub fn new(name: impl Into<String>) -> Self {
        Owner(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionQuery {
    /// Half-open `[start, end)` range on the transaction date.
    pub range: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub category_id: Option<String>,
}

impl TransactionQuery {
    pub fn all() -> Self {
        TransactionQuery::default()
    }

    pub fn period(period: Period) -> Self {
        TransactionQuery {
            range: Some(period.bounds()),
            category_id: None,
        }
    }

    /// Every month from `first` through `last` inclusive.
    pub fn periods(first: Period, last: Period) -> Self {
        TransactionQuery {
            range: Some((first.bounds().0, last.bounds().1)),
            category_id: None,
        }
    }

    pub fn with_category(mut self, id: impl Into<String>) -> Self {
        self.category_id = Some(id.into());
        self
    }
}

/// Persistence for transactions and the category catalog.
///
/// Implementations return transactions newest first (date, then id,
/// descending) and categories by name. Deleting an id the owner does not
/// have is `Error::NotFound`.
pub trait RecordStore {
    fn transactions(&self, owner: &Owner, query: &TransactionQuery) -> Result<Vec<Transaction>>;

    fn categories(&self, owner: &Owner) -> Result<Vec<Category>>;

    fn create_transaction(&self, owner: &Owner, new: &NewTransaction) -> Result<Transaction>;

    fn delete_transaction(&self, owner: &Owner, id: i64) -> Result<()>;

    fn create_category(&self, owner: &Owner, new: &NewCategory) -> Result<Category>;

    fn delete_category(&self, owner: &Owner, id: &str) -> Result<()>;
}
