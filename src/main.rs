// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use moneytrail::{cli, commands, config, db};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(config::log_filter()).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg = config::AppConfig::resolve(
        matches.get_one::<PathBuf>("db").cloned(),
        matches.get_one::<String>("user").cloned(),
    )?;
    tracing::debug!(db = %cfg.db_path.display(), owner = %cfg.owner, "resolved configuration");

    let store = db::SqliteStore::open(&cfg.db_path)
        .with_context(|| format!("Open DB at {}", cfg.db_path.display()))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("category", sub)) => commands::categories::handle(&store, &cfg.owner, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&store, &cfg.owner, sub)?,
        Some(("report", sub)) => commands::reports::handle(&store, &cfg.owner, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
