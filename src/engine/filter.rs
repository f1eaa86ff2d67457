// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Period, Transaction};

/// Narrows `transactions` to those dated inside `period` whose description
/// contains `search`, ignoring case. Either criterion may be omitted; an
/// empty search matches everything. Input order is preserved.
pub fn filter<'a>(
    transactions: &'a [Transaction],
    period: Option<Period>,
    search: Option<&str>,
) -> Vec<&'a Transaction> {
    let needle = search
        .filter(|s| !s.is_empty())
        .map(|s| s.to_uppercase());
    transactions
        .iter()
        .filter(|t| period.is_none_or(|p| p.contains(&t.date)))
        .filter(|t| {
            needle
                .as_deref()
                .is_none_or(|n| t.description.to_uppercase().contains(n))
        })
        .collect()
}
