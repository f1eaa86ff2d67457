// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{DB_ENV, USER_ENV};
use clap::{value_parser, Arg, ArgAction, Command};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn type_arg(required: bool) -> Arg {
    Arg::new("type")
        .long("type")
        .short('t')
        .required(required)
        .value_parser(["income", "expense", "INCOME", "EXPENSE"])
        .help("income or expense")
}

pub fn build_cli() -> Command {
    Command::new("moneytrail")
        .about("Track income and expenses; monthly summaries and history")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env(DB_ENV)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Path to the SQLite database"),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .global(true)
                .env(USER_ENV)
                .help("Owner whose records are read and written"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("id").required(true).help("Slug, e.g. 'food'"))
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("color").long("color").default_value("#9ca3af"))
                        .arg(type_arg(true)),
                )
                .subcommand(json_flags(Command::new("list").arg(type_arg(false))))
                .subcommand(Command::new("rm").arg(Arg::new("id").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record, list and delete transactions")
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .short('d')
                                .required(true),
                        )
                        .arg(Arg::new("amount").long("amount").short('a').required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("YYYY-MM-DD or RFC 3339 timestamp"),
                        )
                        .arg(type_arg(true))
                        .arg(Arg::new("category").long("category").short('c').required(true)),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .short('s')
                                .help("Case-insensitive match on description"),
                        ),
                ))
                .subcommand(
                    Command::new("rm").arg(
                        Arg::new("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Monthly summaries and history")
                .subcommand(json_flags(
                    Command::new("summary")
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM")),
                ))
                .subcommand(json_flags(
                    Command::new("history")
                        .arg(Arg::new("month").long("month").required(true).help("YYYY-MM"))
                        .arg(
                            Arg::new("months-back")
                                .long("months-back")
                                .allow_negative_numbers(true)
                                .value_parser(value_parser!(i64))
                                .default_value("5")
                                .help("Months before the anchor month to include"),
                        ),
                )),
        )
}
