// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{NewCategory, TransactionType};
use crate::store::{Owner, RecordStore};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle(store: &dyn RecordStore, owner: &Owner, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let new = NewCategory {
                id: sub.get_one::<String>("id").context("missing id")?.trim().to_string(),
                name: sub.get_one::<String>("name").context("missing --name")?.to_string(),
                color: sub
                    .get_one::<String>("color")
                    .context("missing --color")?
                    .to_string(),
                r#type: sub
                    .get_one::<String>("type")
                    .context("missing --type")?
                    .parse()?,
            };
            let c = store.create_category(owner, &new)?;
            println!("Added {} category '{}' ({})", c.r#type, c.name, c.id);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("type")
                .map(|s| s.parse::<TransactionType>())
                .transpose()?;
            let data: Vec<_> = store
                .categories(owner)?
                .into_iter()
                .filter(|c| kind.is_none_or(|k| c.r#type == k))
                .collect();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|c| vec![c.id, c.name, c.r#type.to_string(), c.color])
                    .collect();
                println!("{}", pretty_table(&["ID", "Category", "Type", "Color"], rows));
            }
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").context("missing id")?;
            store.delete_category(owner, id)?;
            println!("Removed category '{}'", id);
        }
        _ => {}
    }
    Ok(())
}
