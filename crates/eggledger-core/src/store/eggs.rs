//! Egg count records.

use chrono::NaiveDate;
use rusqlite::params;
use rusqlite::types::Type;
use tracing::debug;

use crate::models::egg::EggCount;

use super::{Result, Store};

impl Store {
    /// Log an egg count. Returns the new row id.
    pub fn add_egg_count(&mut self, date: NaiveDate, count: u32, notes: &str) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO egg_counts (date, egg_count, notes) VALUES (?1, ?2, ?3)",
            params![date.format("%Y-%m-%d").to_string(), count, notes],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, %date, count, "logged egg count");
        Ok(id)
    }

    /// All egg counts, newest first.
    pub fn list_egg_counts(&self) -> Result<Vec<EggCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, date, egg_count, notes FROM egg_counts ORDER BY date DESC, id DESC",
        )?;

        let records = stmt
            .query_map([], |row| {
                let date: String = row.get(1)?;
                let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                    .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
                let notes: Option<String> = row.get(3)?;

                Ok(EggCount {
                    id: row.get(0)?,
                    date,
                    count: row.get(2)?,
                    notes: notes.unwrap_or_default(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Total eggs, optionally only from `since` onward.
    pub fn egg_total(&self, since: Option<NaiveDate>) -> Result<u64> {
        let total: Option<i64> = match since {
            Some(date) => self.conn.query_row(
                "SELECT SUM(egg_count) FROM egg_counts WHERE date >= ?1",
                params![date.format("%Y-%m-%d").to_string()],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT SUM(egg_count) FROM egg_counts", [], |row| row.get(0))?,
        };
        Ok(total.map(|t| t.max(0) as u64).unwrap_or(0))
    }
}
