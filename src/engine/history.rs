// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{aggregate::summarize, filter::filter};
use crate::error::{Error, Result};
use crate::models::{MonthlyHistoryItem, Period, Transaction};

/// Validates a caller-supplied window length.
pub fn months_back(value: i64) -> Result<u32> {
    if value < 0 {
        return Err(Error::invalid(format!(
            "monthsBack must be a non-negative integer, got {}",
            value
        )));
    }
    u32::try_from(value)
        .map_err(|_| Error::invalid(format!("monthsBack {} is out of range", value)))
}

/// Oldest month of the window ending at `anchor`.
pub fn window_start(anchor: Period, months_back: u32) -> Result<Period> {
    anchor.months_before(months_back)
}

/// One item per month from `anchor - months_back` through `anchor`, oldest
/// first. Months without transactions come out as zeros.
pub fn build_history(
    transactions: &[Transaction],
    anchor: Period,
    months_back: u32,
) -> Result<Vec<MonthlyHistoryItem>> {
    let start = window_start(anchor, months_back)?;
    tracing::debug!(%start, %anchor, "building monthly history");

    let mut history = Vec::with_capacity(months_back as usize + 1);
    let mut period = start;
    loop {
        let summary = summarize(filter(transactions, Some(period), None));
        history.push(MonthlyHistoryItem {
            month: period.month(),
            year: period.year(),
            total_income: summary.total_income,
            total_expense: summary.total_expense,
            balance: summary.balance,
        });
        if period == anchor {
            break;
        }
        period = period.next();
    }
    Ok(history)
}
