// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Owner;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Moneytrail", "moneytrail"));

pub const DB_ENV: &str = "MONEYTRAIL_DB";
pub const USER_ENV: &str = "MONEYTRAIL_USER";
pub const LOG_ENV: &str = "MONEYTRAIL_LOG";

const DEFAULT_OWNER: &str = "local";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub owner: Owner,
}

impl AppConfig {
    /// Explicit values (command-line flags, or their environment variables
    /// as read by clap) win; anything missing falls back to defaults.
    pub fn resolve(db_path: Option<PathBuf>, user: Option<String>) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => default_db_path()?,
        };
        let owner = user
            .filter(|u| !u.trim().is_empty())
            .map(|u| u.trim().to_string())
            .or_else(os_user)
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());
        Ok(AppConfig {
            db_path,
            owner: Owner::new(owner),
        })
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().join("moneytrail.sqlite"))
}

fn os_user() -> Option<String> {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .ok()
        .filter(|u| !u.is_empty())
}

/// Filter directive for the log subscriber.
pub fn log_filter() -> String {
    env::var(LOG_ENV)
        .or_else(|_| env::var("RUST_LOG"))
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let cfg = AppConfig::resolve(Some(PathBuf::from("/tmp/x.sqlite")), Some(" ana ".into()))
            .unwrap();
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/x.sqlite"));
        assert_eq!(cfg.owner.as_str(), "ana");
    }

    #[test]
    fn blank_user_falls_back() {
        let cfg = AppConfig::resolve(Some(PathBuf::from("db.sqlite")), Some("  ".into())).unwrap();
        assert!(!cfg.owner.as_str().trim().is_empty());
    }
}
