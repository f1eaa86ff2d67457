// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use crate::models::{Category, NewCategory, NewTransaction, Transaction, TransactionType};
use crate::store::{Owner, RecordStore, TransactionQuery};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row, ToSql};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

/// SQLite-backed [`RecordStore`]. Every row is scoped by owner.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        tracing::debug!(path = %path.display(), "opening database");
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        init_schema(&conn)?;
        Ok(SqliteStore { conn })
    }

    fn category(&self, owner: &Owner, id: &str) -> Result<Option<Category>> {
        let category = self
            .conn
            .query_row(
                "SELECT id, name, color, type FROM categories WHERE owner=?1 AND id=?2",
                params![owner.as_str(), id],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                        r.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?;
        category.map(category_from_parts).transpose()
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS categories(
        owner TEXT NOT NULL,
        id TEXT NOT NULL,
        name TEXT NOT NULL,
        color TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        PRIMARY KEY(owner, id)
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner TEXT NOT NULL,
        description TEXT NOT NULL,
        amount TEXT NOT NULL,
        date INTEGER NOT NULL, -- Unix epoch milliseconds
        type TEXT NOT NULL CHECK(type IN ('INCOME','EXPENSE')),
        category_id TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(owner, category_id) REFERENCES categories(owner, id)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_owner_date ON transactions(owner, date);
    "#,
    )?;
    Ok(())
}

fn parse_timestamp(millis: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
        .ok_or_else(|| Error::Corrupt(format!("invalid stored date {}", millis)))
}

fn parse_type(s: &str) -> Result<TransactionType> {
    s.parse()
        .map_err(|_| Error::Corrupt(format!("invalid stored type '{}'", s)))
}

fn category_from_parts((id, name, color, kind): (String, String, String, String)) -> Result<Category> {
    Ok(Category {
        id,
        name,
        color,
        r#type: parse_type(&kind)?,
    })
}

struct RawTransaction {
    id: i64,
    description: String,
    amount: String,
    date: i64,
    kind: String,
    category_id: String,
}

impl RawTransaction {
    fn from_row(r: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(RawTransaction {
            id: r.get(0)?,
            description: r.get(1)?,
            amount: r.get(2)?,
            date: r.get(3)?,
            kind: r.get(4)?,
            category_id: r.get(5)?,
        })
    }

    fn decode(self) -> Result<Transaction> {
        let amount = self.amount.parse::<Decimal>().map_err(|e| {
            Error::Corrupt(format!(
                "invalid amount '{}' on transaction {}: {}",
                self.amount, self.id, e
            ))
        })?;
        Ok(Transaction {
            id: self.id,
            description: self.description,
            amount,
            date: parse_timestamp(self.date)?,
            r#type: parse_type(&self.kind)?,
            category_id: self.category_id,
        })
    }
}

fn is_constraint(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(f, _) if f.code == ErrorCode::ConstraintViolation)
}

impl RecordStore for SqliteStore {
    fn transactions(&self, owner: &Owner, query: &TransactionQuery) -> Result<Vec<Transaction>> {
        let mut sql = String::from(
            "SELECT id, description, amount, date, type, category_id FROM transactions WHERE owner=?",
        );
        let mut params_vec: Vec<Box<dyn ToSql>> = vec![Box::new(owner.as_str().to_string())];

        if let Some((start, end)) = &query.range {
            sql.push_str(" AND date>=? AND date<?");
            params_vec.push(Box::new(start.timestamp_millis()));
            params_vec.push(Box::new(end.timestamp_millis()));
        }
        if let Some(cat) = &query.category_id {
            sql.push_str(" AND category_id=?");
            params_vec.push(Box::new(cat.clone()));
        }
        sql.push_str(" ORDER BY date DESC, id DESC");
        tracing::debug!(%owner, ?query, "querying transactions");

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(
            rusqlite::params_from_iter(params_vec.iter().map(|p| p.as_ref())),
            RawTransaction::from_row,
        )?;
        let mut data = Vec::new();
        for row in rows {
            data.push(row?.decode()?);
        }
        Ok(data)
    }

    fn categories(&self, owner: &Owner) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, color, type FROM categories WHERE owner=?1 ORDER BY name, id",
        )?;
        let rows = stmt.query_map(params![owner.as_str()], |r| {
            Ok((
                r.get::<_, String>(0)?,
                r.get::<_, String>(1)?,
                r.get::<_, String>(2)?,
                r.get::<_, String>(3)?,
            ))
        })?;
        let mut data = Vec::new();
        for row in rows {
            data.push(category_from_parts(row?)?);
        }
        Ok(data)
    }

    fn create_transaction(&self, owner: &Owner, new: &NewTransaction) -> Result<Transaction> {
        let category = self.category(owner, &new.category_id)?;
        new.validate(category.as_ref())?;

        let description = new.description.trim().to_string();
        let millis = new.date.timestamp_millis();
        self.conn.execute(
            "INSERT INTO transactions(owner, description, amount, date, type, category_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                owner.as_str(),
                description,
                new.amount.to_string(),
                millis,
                new.r#type.as_str(),
                new.category_id,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::info!(%owner, id, amount = %new.amount, "recorded transaction");
        Ok(Transaction {
            id,
            description,
            amount: new.amount,
            date: parse_timestamp(millis)?,
            r#type: new.r#type,
            category_id: new.category_id.clone(),
        })
    }

    fn delete_transaction(&self, owner: &Owner, id: i64) -> Result<()> {
        let n = self.conn.execute(
            "DELETE FROM transactions WHERE owner=?1 AND id=?2",
            params![owner.as_str(), id],
        )?;
        if n == 0 {
            return Err(Error::not_found("Transaction", id));
        }
        tracing::info!(%owner, id, "deleted transaction");
        Ok(())
    }

    fn create_category(&self, owner: &Owner, new: &NewCategory) -> Result<Category> {
        new.validate()?;
        let name = new.name.trim().to_string();
        self.conn
            .execute(
                "INSERT INTO categories(owner, id, name, color, type) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![owner.as_str(), new.id, name, new.color, new.r#type.as_str()],
            )
            .map_err(|e| {
                if is_constraint(&e) {
                    Error::Conflict(format!("category '{}' already exists", new.id))
                } else {
                    Error::from(e)
                }
            })?;
        tracing::info!(%owner, id = %new.id, "added category");
        Ok(Category {
            id: new.id.clone(),
            name,
            color: new.color.clone(),
            r#type: new.r#type,
        })
    }

    fn delete_category(&self, owner: &Owner, id: &str) -> Result<()> {
        let in_use: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE owner=?1 AND category_id=?2",
            params![owner.as_str(), id],
            |r| r.get(0),
        )?;
        if in_use > 0 {
            return Err(Error::Conflict(format!(
                "category '{}' is used by {} transaction(s)",
                id, in_use
            )));
        }
        let n = self.conn.execute(
            "DELETE FROM categories WHERE owner=?1 AND id=?2",
            params![owner.as_str(), id],
        )?;
        if n == 0 {
            return Err(Error::not_found("Category", id));
        }
        tracing::info!(%owner, id, "removed category");
        Ok(())
    }
}
