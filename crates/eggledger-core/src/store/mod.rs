//! SQLite persistence for purchases, egg counts, and settings.
//!
//! A [`Store`] owns a single connection. Every write takes `&mut self`, so
//! writes (including the destructive schema recreate) are serialized by
//! the borrow checker within a process.

mod eggs;
mod purchases;
mod schema;
mod settings;

pub use schema::{table_columns, SchemaStatus, PURCHASE_COLUMNS};
pub use settings::DEFAULT_CHICKEN_COUNT;

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::debug;

use crate::error::StoreError;
use crate::models::config::PathsConfig;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Persistent ledger storage.
pub struct Store {
    conn: Connection,
    settings_path: PathBuf,
}

impl Store {
    /// Open (or create) the database at `path`.
    ///
    /// Support tables are created if missing and the purchase table is
    /// checked with [`Store::ensure_schema`].
    pub fn open(path: &Path, settings_path: impl Into<PathBuf>) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Directory {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("opened database {}", path.display());

        Self::init(conn, settings_path.into())
    }

    /// Open the database and settings file named in the configuration.
    pub fn from_config(paths: &PathsConfig) -> Result<Self> {
        Self::open(&paths.database, paths.settings_file.clone())
    }

    /// Open a private in-memory database.
    pub fn open_in_memory(settings_path: impl Into<PathBuf>) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, settings_path.into())
    }

    fn init(conn: Connection, settings_path: PathBuf) -> Result<Self> {
        schema::create_support_tables(&conn)?;

        let mut store = Self {
            conn,
            settings_path,
        };
        store.ensure_schema()?;
        Ok(store)
    }
}
