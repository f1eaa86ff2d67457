// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CategorySummary, Summary, Transaction, TransactionType};
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

/// Reduces a set of transactions into income/expense totals and a
/// per-category breakdown. Category labels are left empty; see [`annotate`].
///
/// Amounts are summed as exact decimals, so the result does not depend on
/// the order of the input.
pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut by_category: BTreeMap<(TransactionType, &str), Decimal> = BTreeMap::new();

    // Saturating: records written outside `NewTransaction::validate` may
    // exceed `MAX_AMOUNT`, and summarizing never fails.
    for t in transactions {
        let total = match t.r#type {
            TransactionType::Income => &mut total_income,
            TransactionType::Expense => &mut total_expense,
        };
        *total = total.saturating_add(t.amount);
        let entry = by_category
            .entry((t.r#type, t.category_id.as_str()))
            .or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(t.amount);
    }

    let mut category_summary: BTreeMap<String, CategorySummary> = BTreeMap::new();
    // Income keys come first, so an id that was (wrongly) used for both
    // types ends up reported under EXPENSE.
    for ((kind, id), amount) in by_category {
        let base = match kind {
            TransactionType::Income => total_income,
            TransactionType::Expense => total_expense,
        };
        if category_summary.contains_key(id) {
            tracing::warn!(category = id, "category used by both income and expense transactions");
        }
        category_summary.insert(
            id.to_string(),
            CategorySummary {
                r#type: kind,
                amount,
                percentage: percentage(amount, base),
                category_name: None,
                category_color: None,
            },
        );
    }

    Summary {
        total_income,
        total_expense,
        balance: total_income.saturating_sub(total_expense),
        category_summary,
    }
}

/// `part / whole * 100` rounded to two places; zero when `whole` is zero.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    (part / whole * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Fills in category names and colors from the catalog. Ids the catalog
/// does not know keep `None` labels.
pub fn annotate(summary: &mut Summary, categories: &[Category]) {
    for (id, entry) in summary.category_summary.iter_mut() {
        match categories.iter().find(|c| &c.id == id) {
            Some(c) => {
                entry.category_name = Some(c.name.clone());
                entry.category_color = Some(c.color.clone());
            }
            None => tracing::warn!(category = %id, "summary references unknown category"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn tx(amount: &str, kind: TransactionType, category: &str, day: u32) -> Transaction {
        Transaction {
            id: i64::from(day),
            description: format!("{} {}", category, day),
            amount: amount.parse().unwrap(),
            date: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
            r#type: kind,
            category_id: category.into(),
        }
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn month_with_income_and_expenses() {
        let ts = vec![
            tx("100", TransactionType::Income, "salary", 5),
            tx("40", TransactionType::Expense, "food", 10),
            tx("10", TransactionType::Expense, "food", 20),
        ];
        let s = summarize(&ts);
        assert_eq!(s.total_income, dec("100"));
        assert_eq!(s.total_expense, dec("50"));
        assert_eq!(s.balance, dec("50"));
        assert_eq!(s.category_summary["food"].amount, dec("50"));
        assert_eq!(s.category_summary["food"].percentage, dec("100"));
        assert_eq!(s.category_summary["salary"].amount, dec("100"));
        assert_eq!(s.category_summary["salary"].percentage, dec("100"));
        assert_eq!(s.category_summary["food"].r#type, TransactionType::Expense);
    }

    #[test]
    fn empty_input_is_all_zero() {
        let s = summarize(&Vec::<Transaction>::new());
        assert_eq!(s, Summary::default());
        assert!(s.category_summary.is_empty());
    }

    #[test]
    fn only_expenses_gives_negative_balance() {
        let ts = vec![tx("12.34", TransactionType::Expense, "rent", 1)];
        let s = summarize(&ts);
        assert_eq!(s.total_income, Decimal::ZERO);
        assert_eq!(s.balance, dec("-12.34"));
    }

    #[test]
    fn percentages_are_per_type_and_rounded() {
        let ts = vec![
            tx("1", TransactionType::Expense, "a", 1),
            tx("1", TransactionType::Expense, "b", 2),
            tx("1", TransactionType::Expense, "c", 3),
            tx("30", TransactionType::Income, "salary", 4),
            tx("10", TransactionType::Income, "gift", 5),
        ];
        let s = summarize(&ts);
        assert_eq!(s.category_summary["a"].percentage, dec("33.33"));
        assert_eq!(s.category_summary["salary"].percentage, dec("75"));
        assert_eq!(s.category_summary["gift"].percentage, dec("25"));

        let expense_sum: Decimal = s
            .category_summary
            .values()
            .filter(|c| c.r#type == TransactionType::Expense)
            .map(|c| c.percentage)
            .sum();
        assert!((expense_sum - Decimal::ONE_HUNDRED).abs() <= dec("0.05"));
    }

    #[test]
    fn order_does_not_change_result() {
        let mut ts = vec![
            tx("0.1", TransactionType::Expense, "food", 1),
            tx("0.2", TransactionType::Expense, "food", 2),
            tx("1000000.07", TransactionType::Income, "salary", 3),
            tx("0.3", TransactionType::Expense, "bus", 4),
        ];
        let forward = summarize(&ts);
        ts.reverse();
        assert_eq!(summarize(&ts), forward);
        assert_eq!(forward.total_expense, dec("0.6"));
    }

    #[test]
    fn balance_is_income_minus_expense() {
        let ts = vec![
            tx("19.99", TransactionType::Income, "gift", 1),
            tx("5.01", TransactionType::Expense, "food", 2),
            tx("33.10", TransactionType::Expense, "bus", 3),
        ];
        let s = summarize(&ts);
        assert_eq!(s.total_income - s.total_expense, s.balance);
    }

    #[test]
    fn huge_amounts_saturate_instead_of_panicking() {
        let ts = vec![
            tx("100", TransactionType::Income, "salary", 1),
            Transaction {
                amount: Decimal::MAX,
                ..tx("1", TransactionType::Expense, "food", 2)
            },
            Transaction {
                amount: Decimal::MAX,
                ..tx("1", TransactionType::Expense, "food", 3)
            },
        ];
        let s = summarize(&ts);
        assert_eq!(s.total_expense, Decimal::MAX);
        assert_eq!(s.category_summary["food"].amount, Decimal::MAX);
        assert_eq!(s.category_summary["food"].percentage, dec("100"));
        assert_eq!(s.balance, dec("100") - Decimal::MAX);
    }

    #[test]
    fn percentage_of_zero_total_is_zero() {
        assert_eq!(percentage(dec("5"), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percentage(dec("1"), dec("8")), dec("12.5"));
        assert_eq!(percentage(dec("1"), dec("6")), dec("16.67"));
    }

    #[test]
    fn annotate_leaves_unknown_categories_unlabeled() {
        let ts = vec![
            tx("10", TransactionType::Expense, "food", 1),
            tx("10", TransactionType::Expense, "ghost", 2),
        ];
        let mut s = summarize(&ts);
        let catalog = vec![Category {
            id: "food".into(),
            name: "Food".into(),
            color: "#ef4444".into(),
            r#type: TransactionType::Expense,
        }];
        annotate(&mut s, &catalog);
        assert_eq!(s.category_summary["food"].category_name.as_deref(), Some("Food"));
        assert_eq!(s.category_summary["food"].category_color.as_deref(), Some("#ef4444"));
        assert_eq!(s.category_summary["ghost"].amount, dec("10"));
        assert!(s.category_summary["ghost"].category_name.is_none());
        assert_eq!(s.category_summary["ghost"].percentage, dec("50"));
    }
}
