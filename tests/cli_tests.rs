// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneytrail::commands::{categories, reports, transactions};
use moneytrail::db::SqliteStore;
use moneytrail::store::{Owner, RecordStore, TransactionQuery};
use moneytrail::{cli, Error};
use rust_decimal::Decimal;

fn leaf(args: &[&str]) -> clap::ArgMatches {
    let mut m = cli::build_cli().get_matches_from(args.iter().copied());
    while let Some((_, sub)) = m.subcommand() {
        m = sub.clone();
    }
    m
}

fn run(store: &SqliteStore, owner: &Owner, args: &[&str]) {
    let matches = cli::build_cli().get_matches_from(args.iter().copied());
    match matches.subcommand() {
        Some(("category", sub)) => categories::handle(store, owner, sub).unwrap(),
        Some(("tx", sub)) => transactions::handle(store, owner, sub).unwrap(),
        other => panic!("unexpected command {:?}", other.map(|(n, _)| n)),
    }
}

fn setup() -> (SqliteStore, Owner) {
    let store = SqliteStore::open_in_memory().unwrap();
    let owner = Owner::new("ana");
    run(&store, &owner, &["moneytrail", "category", "add", "food", "--name", "Food", "--type", "expense"]);
    run(&store, &owner, &["moneytrail", "category", "add", "salary", "--name", "Salary", "-t", "income", "--color", "#22c55e"]);
    run(&store, &owner, &["moneytrail", "tx", "add", "-d", "Salary", "-a", "100", "--date", "2024-01-05", "-t", "income", "-c", "salary"]);
    run(&store, &owner, &["moneytrail", "tx", "add", "-d", "Supermarket", "-a", "40", "--date", "2024-01-10", "-t", "expense", "-c", "food"]);
    run(&store, &owner, &["moneytrail", "tx", "add", "-d", "Bakery", "-a", "10", "--date", "2024-01-20", "-t", "expense", "-c", "food"]);
    (store, owner)
}

#[test]
fn list_filters_by_month_and_search() {
    let (store, owner) = setup();
    let m = leaf(&["moneytrail", "tx", "list", "--month", "2024-01", "--search", "MARKET"]);
    let rows = transactions::query_rows(&store, &owner, &m).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].transaction.description, "Supermarket");
    assert_eq!(rows[0].category_name.as_deref(), Some("Food"));

    let m = leaf(&["moneytrail", "tx", "list"]);
    assert_eq!(transactions::query_rows(&store, &owner, &m).unwrap().len(), 3);
}

#[test]
fn invalid_month_is_an_error() {
    let (store, owner) = setup();
    let m = leaf(&["moneytrail", "tx", "list", "--month", "2024-13"]);
    assert!(transactions::query_rows(&store, &owner, &m).is_err());
}

#[test]
fn summary_command_totals() {
    let (store, owner) = setup();
    let m = leaf(&["moneytrail", "report", "summary", "--month", "2024-01"]);
    let s = reports::summary_for(&store, &owner, &m).unwrap();
    assert_eq!(s.total_income, Decimal::new(100, 0));
    assert_eq!(s.total_expense, Decimal::new(50, 0));
    assert_eq!(s.balance, Decimal::new(50, 0));
    assert_eq!(s.category_summary["salary"].category_color.as_deref(), Some("#22c55e"));
}

#[test]
fn history_defaults_to_six_months() {
    let (store, owner) = setup();
    let m = leaf(&["moneytrail", "report", "history", "--month", "2024-02"]);
    let h = reports::history_for(&store, &owner, &m).unwrap();
    assert_eq!(h.len(), 6);
    assert_eq!((h[0].month, h[0].year), (9, 2023));
    assert_eq!(h[4].balance, Decimal::new(50, 0));
    assert!(h[5].balance.is_zero());
}

#[test]
fn negative_months_back_reaches_engine() {
    let (store, owner) = setup();
    let m = leaf(&["moneytrail", "report", "history", "--month", "2024-01", "--months-back", "-3"]);
    let err = reports::history_for(&store, &owner, &m).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidArgument(_))
    ));
}

#[test]
fn remove_then_remove_again_fails() {
    let (store, owner) = setup();
    let id = store.transactions(&owner, &TransactionQuery::all()).unwrap()[0].id;
    let id_arg = id.to_string();
    run(&store, &owner, &["moneytrail", "tx", "rm", &id_arg]);
    let matches = cli::build_cli().get_matches_from(["moneytrail", "tx", "rm", id_arg.as_str()]);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let err = transactions::handle(&store, &owner, sub).unwrap_err();
    assert!(matches!(err.downcast_ref::<Error>(), Some(Error::NotFound { .. })));
}

#[test]
fn add_rejects_category_of_other_type() {
    let (store, owner) = setup();
    let matches = cli::build_cli().get_matches_from([
        "moneytrail", "tx", "add", "-d", "Refund", "-a", "5", "--date", "2024-01-11", "-t", "income", "-c", "food",
    ]);
    let Some(("tx", sub)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    assert!(transactions::handle(&store, &owner, sub).is_err());
    assert_eq!(store.transactions(&owner, &TransactionQuery::all()).unwrap().len(), 3);
}
