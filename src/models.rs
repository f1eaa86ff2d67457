// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOME" => Ok(TransactionType::Income),
            "EXPENSE" => Ok(TransactionType::Expense),
            other => Err(Error::invalid(format!(
                "unknown transaction type '{}', expected INCOME or EXPENSE",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    pub r#type: TransactionType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub r#type: TransactionType,
    pub category_id: String,
}

/// Transaction as shown in listings: the record plus whatever the catalog
/// knows about its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionView {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}

/// Largest amount a single transaction may carry (10^15). Sums of these stay
/// far below `Decimal::MAX`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub r#type: TransactionType,
    pub category_id: String,
}

impl NewTransaction {
    /// Checks the record against the category it references. `category` is
    /// the catalog entry for `category_id`, if there is one.
    pub fn validate(&self, category: Option<&Category>) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(Error::invalid("description must not be empty"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::invalid(format!(
                "amount must be greater than zero, got {}",
                self.amount
            )));
        }
        if self.amount > MAX_AMOUNT {
            return Err(Error::invalid(format!(
                "amount {} exceeds the maximum of {}",
                self.amount, MAX_AMOUNT
            )));
        }
        let category = category.ok_or_else(|| Error::not_found("Category", &self.category_id))?;
        if category.r#type != self.r#type {
            return Err(Error::invalid(format!(
                "category '{}' is {} but the transaction is {}",
                category.id, category.r#type, self.r#type
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCategory {
    pub id: String,
    pub name: String,
    pub color: String,
    pub r#type: TransactionType,
}

impl NewCategory {
    pub fn validate(&self) -> Result<()> {
        let id_ok = !self.id.is_empty()
            && self
                .id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if !id_ok {
            return Err(Error::invalid(format!(
                "category id '{}' must be lowercase letters, digits, '-' or '_'",
                self.id
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::invalid("category name must not be empty"));
        }
        Ok(())
    }
}

/// A single calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::invalid(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }
        // chrono must be able to represent the first day
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(Error::invalid(format!("year {} is out of range", year)));
        }
        Ok(Period { year, month })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Period {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Period {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The period `months` months before this one.
    pub fn months_before(&self, months: u32) -> Result<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month - 1) - i64::from(months);
        let year = i32::try_from(index.div_euclid(12))
            .map_err(|_| Error::invalid(format!("{} months before {} is out of range", months, self)))?;
        let month = index.rem_euclid(12) as u32 + 1;
        Period::new(month, year)
    }

    /// Half-open UTC range `[first instant of the month, first instant of the next)`.
    pub fn bounds(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (start_of(*self), start_of(self.next()))
    }
}

fn start_of(period: Period) -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(period.year, period.month, 1, 0, 0, 0) {
        chrono::LocalResult::Single(dt) => dt,
        // only reachable one month past chrono's maximum year
        _ => DateTime::<Utc>::MAX_UTC,
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub r#type: TransactionType,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    pub category_summary: BTreeMap<String, CategorySummary>,
}

impl Default for Summary {
    fn default() -> Self {
        Summary {
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            balance: Decimal::ZERO,
            category_summary: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHistoryItem {
    pub month: u32,
    pub year: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}
