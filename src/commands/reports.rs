// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::QueryEngine;
use crate::models::{MonthlyHistoryItem, Summary, TransactionType};
use crate::store::{Owner, RecordStore};
use crate::utils::{fmt_money, fmt_percent, maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result};

pub fn handle(store: &dyn RecordStore, owner: &Owner, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, owner, sub)?,
        Some(("history", sub)) => history(store, owner, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn summary_for(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<Summary> {
    let period = parse_month(sub.get_one::<String>("month").context("missing --month")?)?;
    Ok(QueryEngine::new(store, owner).get_summary(period)?)
}

pub fn history_for(
    store: &dyn RecordStore,
    owner: &Owner,
    sub: &clap::ArgMatches,
) -> Result<Vec<MonthlyHistoryItem>> {
    let anchor = parse_month(sub.get_one::<String>("month").context("missing --month")?)?;
    let months_back = *sub.get_one::<i64>("months-back").unwrap_or(&5);
    Ok(QueryEngine::new(store, owner).get_history(anchor, months_back)?)
}

fn breakdown_rows(s: &Summary, kind: TransactionType) -> Vec<Vec<String>> {
    let mut items: Vec<_> = s
        .category_summary
        .iter()
        .filter(|(_, c)| c.r#type == kind)
        .collect();
    items.sort_by(|a, b| b.1.amount.cmp(&a.1.amount).then_with(|| a.0.cmp(b.0)));
    items
        .into_iter()
        .map(|(id, c)| {
            vec![
                c.category_name.clone().unwrap_or_else(|| format!("({})", id)),
                fmt_money(&c.amount),
                fmt_percent(&c.percentage),
            ]
        })
        .collect()
}

fn summary(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let s = summary_for(store, owner, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    println!(
        "{}",
        pretty_table(
            &["Income", "Expense", "Balance"],
            vec![vec![
                fmt_money(&s.total_income),
                fmt_money(&s.total_expense),
                fmt_money(&s.balance),
            ]],
        )
    );
    for (kind, title) in [
        (TransactionType::Income, "Income category"),
        (TransactionType::Expense, "Expense category"),
    ] {
        let rows = breakdown_rows(&s, kind);
        if !rows.is_empty() {
            println!("{}", pretty_table(&[title, "Amount", "Share"], rows));
        }
    }
    Ok(())
}

fn history(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let data = history_for(store, owner, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|i| {
                vec![
                    format!("{:04}-{:02}", i.year, i.month),
                    fmt_money(&i.total_income),
                    fmt_money(&i.total_expense),
                    fmt_money(&i.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expense", "Balance"], rows)
        );
    }
    Ok(())
}
