//! Table definitions and the drop-and-recreate schema check.

use rusqlite::Connection;
use tracing::{info, warn};

use super::{Result, Store};

/// Columns `purchase_items` must have; anything less triggers a recreate.
pub const PURCHASE_COLUMNS: &[&str] = &[
    "id",
    "sku",
    "name",
    "quantity",
    "price",
    "subtotal",
    "tax_exempt",
    "href",
    "product_thumbnail",
    "order_date",
];

const CREATE_PURCHASE_ITEMS: &str = "CREATE TABLE IF NOT EXISTS purchase_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sku TEXT,
    name TEXT,
    quantity INTEGER,
    price REAL,
    subtotal REAL,
    tax_exempt BOOLEAN,
    href TEXT,
    product_thumbnail TEXT,
    order_date TEXT
)";

const CREATE_EGG_COUNTS: &str = "CREATE TABLE IF NOT EXISTS egg_counts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    egg_count INTEGER NOT NULL,
    notes TEXT
)";

// Legacy per-order summary table. Kept for old databases, never written.
const CREATE_FEED_PURCHASES: &str = "CREATE TABLE IF NOT EXISTS feed_purchases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    sku TEXT,
    product_name TEXT,
    quantity INTEGER,
    price REAL
)";

/// Outcome of a schema check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaStatus {
    /// Table already had every required column.
    Current,
    /// Table did not exist and was created.
    Created,
    /// Table was dropped and recreated; all previous rows are gone.
    Recreated { missing: Vec<String> },
}

/// Column names of `table`, empty if the table does not exist.
pub fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

pub(crate) fn create_support_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(&format!("{CREATE_EGG_COUNTS};\n{CREATE_FEED_PURCHASES};"))
}

impl Store {
    /// Make sure `purchase_items` exists with every required column.
    ///
    /// An out-of-date table is dropped and recreated. This loses every
    /// stored purchase row.
    pub fn ensure_schema(&mut self) -> Result<SchemaStatus> {
        let columns = table_columns(&self.conn, "purchase_items")?;

        if columns.is_empty() {
            self.conn.execute_batch(CREATE_PURCHASE_ITEMS)?;
            info!("created purchase_items table");
            return Ok(SchemaStatus::Created);
        }

        let missing: Vec<String> = PURCHASE_COLUMNS
            .iter()
            .filter(|required| !columns.iter().any(|c| c == *required))
            .map(|c| c.to_string())
            .collect();

        if missing.is_empty() {
            return Ok(SchemaStatus::Current);
        }

        warn!(
            missing = ?missing,
            "purchase_items schema is out of date, dropping table and all stored purchases"
        );

        let tx = self.conn.transaction()?;
        tx.execute_batch("DROP TABLE IF EXISTS purchase_items")?;
        tx.execute_batch(CREATE_PURCHASE_ITEMS)?;
        tx.commit()?;

        Ok(SchemaStatus::Recreated { missing })
    }
}
