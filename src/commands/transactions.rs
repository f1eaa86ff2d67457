// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::QueryEngine;
use crate::models::{NewTransaction, TransactionType, TransactionView};
use crate::store::{Owner, RecordStore};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month, pretty_table};
use anyhow::{Context, Result};

pub fn handle(store: &dyn RecordStore, owner: &Owner, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, owner, sub)?,
        Some(("list", sub)) => list(store, owner, sub)?,
        Some(("rm", sub)) => remove(store, owner, sub)?,
        _ => {}
    }
    Ok(())
}

fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("missing --{}", name))
}

pub fn parse_new(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    Ok(NewTransaction {
        description: required(sub, "description")?.to_string(),
        amount: parse_decimal(required(sub, "amount")?)?,
        date: parse_date(required(sub, "date")?)?,
        r#type: required(sub, "type")?.parse::<TransactionType>()?,
        category_id: required(sub, "category")?.trim().to_string(),
    })
}

fn add(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let new = parse_new(sub)?;
    let tx = store
        .create_transaction(owner, &new)
        .context("Failed to record transaction")?;
    println!(
        "Recorded #{} {} {} on {} ({})",
        tx.id,
        tx.r#type,
        fmt_money(&tx.amount),
        tx.date.format("%Y-%m-%d"),
        tx.description
    );
    Ok(())
}

pub fn query_rows(
    store: &dyn RecordStore,
    owner: &Owner,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionView>> {
    let period = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let search = sub.get_one::<String>("search").map(String::as_str);
    let rows = QueryEngine::new(store, owner).list_transaction_views(period, search)?;
    Ok(rows)
}

fn list(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, owner, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|v| {
                let t = &v.transaction;
                let signed = match t.r#type {
                    TransactionType::Income => format!("+{}", fmt_money(&t.amount)),
                    TransactionType::Expense => format!("-{}", fmt_money(&t.amount)),
                };
                vec![
                    t.id.to_string(),
                    t.date.format("%Y-%m-%d").to_string(),
                    t.description.clone(),
                    v.category_name.clone().unwrap_or_else(|| t.category_id.clone()),
                    signed,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Description", "Category", "Amount"], rows)
        );
    }
    Ok(())
}

fn remove(store: &dyn RecordStore, owner: &Owner, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("missing transaction id")?;
    store.delete_transaction(owner, id)?;
    println!("Deleted transaction #{}", id);
    Ok(())
}
