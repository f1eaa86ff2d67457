// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{aggregate, filter::filter, history};
use crate::error::Result;
use crate::models::{MonthlyHistoryItem, Period, Summary, Transaction, TransactionView};
use crate::store::{Owner, RecordStore, TransactionQuery};

/// Entry point for the boundary layer. Holds no state of its own; every
/// call reads a fresh snapshot from the store.
pub struct QueryEngine<'a, S: RecordStore + ?Sized> {
    store: &'a S,
    owner: &'a Owner,
}

impl<'a, S: RecordStore + ?Sized> QueryEngine<'a, S> {
    pub fn new(store: &'a S, owner: &'a Owner) -> Self {
        QueryEngine { store, owner }
    }

    fn fetch(&self, period: Option<Period>) -> Result<Vec<Transaction>> {
        let query = period.map(TransactionQuery::period).unwrap_or_default();
        self.store.transactions(self.owner, &query)
    }

    pub fn list_transactions(
        &self,
        period: Option<Period>,
        search: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        let all = self.fetch(period)?;
        let matched = filter(&all, period, search).into_iter().cloned().collect();
        Ok(matched)
    }

    /// Like [`list_transactions`](Self::list_transactions), with category
    /// name and color attached where the catalog has them.
    pub fn list_transaction_views(
        &self,
        period: Option<Period>,
        search: Option<&str>,
    ) -> Result<Vec<TransactionView>> {
        let transactions = self.list_transactions(period, search)?;
        let categories = self.store.categories(self.owner)?;
        Ok(transactions
            .into_iter()
            .map(|transaction| {
                let category = categories.iter().find(|c| c.id == transaction.category_id);
                TransactionView {
                    category_name: category.map(|c| c.name.clone()),
                    category_color: category.map(|c| c.color.clone()),
                    transaction,
                }
            })
            .collect())
    }

    pub fn get_summary(&self, period: Period) -> Result<Summary> {
        let all = self.fetch(Some(period))?;
        let mut summary = aggregate::summarize(filter(&all, Some(period), None));
        if !summary.category_summary.is_empty() {
            let categories = self.store.categories(self.owner)?;
            aggregate::annotate(&mut summary, &categories);
        }
        Ok(summary)
    }

    /// Negative `months_back` is `InvalidArgument`.
    pub fn get_history(&self, anchor: Period, months_back: i64) -> Result<Vec<MonthlyHistoryItem>> {
        let months_back = history::months_back(months_back)?;
        let start = history::window_start(anchor, months_back)?;
        let window = self
            .store
            .transactions(self.owner, &TransactionQuery::periods(start, anchor))?;
        history::build_history(&window, anchor, months_back)
    }
}
