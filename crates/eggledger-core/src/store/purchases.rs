//! Purchase item queries.

use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params, OptionalExtension, Row};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::models::purchase::{PurchaseItem, PurchaseRecord, PurchaseUpdate, SortColumn, SortOrder};

use super::{Result, Store};

const SELECT_PURCHASES: &str = "SELECT id, order_date, sku, name, quantity, price, subtotal, \
     tax_exempt, href, product_thumbnail FROM purchase_items";

impl Store {
    /// Insert a batch of items in one transaction. Returns rows written.
    pub fn insert_batch(&mut self, items: &[PurchaseItem]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO purchase_items (sku, name, quantity, price, subtotal, tax_exempt, \
                 href, product_thumbnail, order_date) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;

            for item in items {
                stmt.execute(params![
                    item.sku,
                    item.name,
                    item.quantity,
                    to_real(item.unit_price),
                    to_real(item.subtotal),
                    item.tax_exempt,
                    item.detail_link,
                    item.thumbnail_url,
                    date_to_text(item.order_date),
                ])?;
            }
        }
        tx.commit()?;

        info!("inserted {} purchase items", items.len());
        Ok(items.len())
    }

    /// List stored purchases sorted by an allow-listed column.
    pub fn list_purchases(&self, sort: SortColumn, order: SortOrder) -> Result<Vec<PurchaseRecord>> {
        let sql = format!(
            "{SELECT_PURCHASES} ORDER BY {expr} {dir}, id {dir}",
            expr = sort.sql_expr(),
            dir = order.sql_keyword(),
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    /// Fetch one purchase by id.
    pub fn get_purchase(&self, id: i64) -> Result<Option<PurchaseRecord>> {
        let record = self
            .conn
            .query_row(
                &format!("{SELECT_PURCHASES} WHERE id = ?1"),
                params![id],
                row_to_record,
            )
            .optional()?;
        Ok(record)
    }

    /// Number of stored purchases.
    pub fn count_purchases(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM purchase_items", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete one purchase. Returns whether a row was removed.
    pub fn delete_purchase(&mut self, id: i64) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM purchase_items WHERE id = ?1", params![id])?;
        debug!(id, removed, "deleted purchase");
        Ok(removed > 0)
    }

    /// Delete several purchases. Unknown ids are ignored.
    ///
    /// Returns the number of rows actually removed.
    pub fn delete_purchases(&mut self, ids: &[i64]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut removed = 0;
        {
            let mut stmt = tx.prepare_cached("DELETE FROM purchase_items WHERE id = ?1")?;
            for id in ids {
                removed += stmt.execute(params![id])?;
            }
        }
        tx.commit()?;

        debug!(requested = ids.len(), removed, "deleted purchases");
        Ok(removed)
    }

    /// Overwrite every editable field of a purchase.
    ///
    /// Returns whether the row existed.
    pub fn update_purchase(&mut self, id: i64, update: &PurchaseUpdate) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE purchase_items SET order_date = ?1, sku = ?2, name = ?3, quantity = ?4, \
             price = ?5, subtotal = ?6, href = ?7, product_thumbnail = ?8, tax_exempt = ?9 \
             WHERE id = ?10",
            params![
                date_to_text(update.order_date),
                update.sku,
                update.name,
                update.quantity,
                to_real(update.unit_price),
                to_real(update.subtotal),
                update.detail_link,
                update.thumbnail_url,
                update.tax_exempt,
                id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Sum of known subtotals, optionally only for orders on or after `since`.
    ///
    /// Rows without an order date only count toward the unbounded total.
    pub fn purchase_cost(&self, since: Option<NaiveDate>) -> Result<Decimal> {
        let total: Option<f64> = match since {
            Some(date) => self.conn.query_row(
                "SELECT SUM(subtotal) FROM purchase_items WHERE date(order_date) >= date(?1)",
                params![date_to_text(Some(date))],
                |row| row.get(0),
            )?,
            None => self
                .conn
                .query_row("SELECT SUM(subtotal) FROM purchase_items", [], |row| row.get(0))?,
        };
        Ok(from_real(total).unwrap_or(Decimal::ZERO))
    }
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<PurchaseRecord> {
    let order_date: Option<String> = row.get(1)?;
    let quantity: Option<i64> = row.get(4)?;

    Ok(PurchaseRecord {
        id: row.get(0)?,
        item: PurchaseItem {
            order_date: order_date.as_deref().and_then(text_to_date),
            sku: row.get(2)?,
            name: row.get(3)?,
            quantity: quantity.and_then(|q| u32::try_from(q).ok()),
            unit_price: from_real(row.get(5)?),
            subtotal: from_real(row.get(6)?),
            tax_exempt: value_as_bool(row.get(7)?),
            detail_link: row.get(8)?,
            thumbnail_url: row.get(9)?,
        },
    })
}

fn to_real(value: Option<Decimal>) -> Option<f64> {
    value.and_then(|d| d.to_f64())
}

fn from_real(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64)
}

fn date_to_text(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

fn text_to_date(text: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok();
    if date.is_none() {
        debug!(value = text, "ignoring non-ISO order date in stored row");
    }
    date
}

// Older databases stored the flag as TEXT.
fn value_as_bool(value: Value) -> bool {
    match value {
        Value::Integer(n) => n != 0,
        Value::Real(f) => f != 0.0,
        Value::Text(s) => matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"),
        Value::Null | Value::Blob(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn store() -> Store {
        Store::open_in_memory(std::env::temp_dir().join("eggledger-purchases-test.txt")).unwrap()
    }

    fn item(sku: &str, price: &str, date: Option<(i32, u32, u32)>) -> PurchaseItem {
        PurchaseItem {
            sku: Some(sku.to_string()),
            name: Some(format!("{sku} feed")),
            quantity: Some(1),
            unit_price: Decimal::from_str(price).ok(),
            subtotal: Decimal::from_str(price).ok(),
            order_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            ..Default::default()
        }
    }

    fn skus(records: &[PurchaseRecord]) -> Vec<String> {
        records.iter().map(|r| r.item.sku.clone().unwrap()).collect()
    }

    #[test]
    fn test_insert_and_read_back() {
        let mut store = store();
        let mut original = item("LAY-50", "18.99", Some((2024, 3, 6)));
        original.tax_exempt = true;
        original.detail_link = Some("/p/lay".to_string());
        original.quantity = None;

        assert_eq!(store.insert_batch(&[original.clone()]).unwrap(), 1);

        let records = store.list_purchases(SortColumn::default(), SortOrder::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item, original);
    }

    #[test]
    fn test_list_sorting() {
        let mut store = store();
        store
            .insert_batch(&[
                item("B", "5.00", Some((2024, 1, 10))),
                item("A", "20.00", Some((2024, 3, 1))),
                item("C", "1.00", Some((2023, 12, 31))),
            ])
            .unwrap();

        let by_date = store.list_purchases(SortColumn::OrderDate, SortOrder::Desc).unwrap();
        assert_eq!(skus(&by_date), vec!["A", "B", "C"]);

        let by_sku = store.list_purchases(SortColumn::Sku, SortOrder::Asc).unwrap();
        assert_eq!(skus(&by_sku), vec!["A", "B", "C"]);

        let by_price = store.list_purchases(SortColumn::Price, SortOrder::Asc).unwrap();
        assert_eq!(skus(&by_price), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_delete_many_ignores_unknown_ids() {
        let mut store = store();
        store
            .insert_batch(&[item("A", "1", None), item("B", "2", None), item("C", "3", None)])
            .unwrap();
        let ids: Vec<i64> = store
            .list_purchases(SortColumn::Sku, SortOrder::Asc)
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();

        let removed = store.delete_purchases(&[ids[0], 9_999, ids[2]]).unwrap();

        assert_eq!(removed, 2);
        let remaining = store.list_purchases(SortColumn::Sku, SortOrder::Asc).unwrap();
        assert_eq!(skus(&remaining), vec!["B"]);
    }

    #[test]
    fn test_delete_one() {
        let mut store = store();
        store.insert_batch(&[item("A", "1", None)]).unwrap();
        let id = store.list_purchases(SortColumn::Sku, SortOrder::Asc).unwrap()[0].id;

        assert!(store.delete_purchase(id).unwrap());
        assert!(!store.delete_purchase(id).unwrap());
        assert_eq!(store.count_purchases().unwrap(), 0);
    }

    #[test]
    fn test_update_overwrites_row() {
        let mut store = store();
        store.insert_batch(&[item("A", "1", Some((2024, 1, 1)))]).unwrap();
        let id = store.list_purchases(SortColumn::Sku, SortOrder::Asc).unwrap()[0].id;

        let update = PurchaseUpdate {
            sku: Some("A-2".to_string()),
            subtotal: Decimal::from_str("3.50").ok(),
            tax_exempt: true,
            ..Default::default()
        };
        assert!(store.update_purchase(id, &update).unwrap());
        assert!(!store.update_purchase(id + 100, &update).unwrap());

        let record = store.get_purchase(id).unwrap().unwrap();
        assert_eq!(record.item.sku.as_deref(), Some("A-2"));
        assert_eq!(record.item.subtotal, Decimal::from_str("3.50").ok());
        assert_eq!(record.item.name, None);
        assert_eq!(record.item.order_date, None);
        assert!(record.item.tax_exempt);
    }

    #[test]
    fn test_purchase_cost_windows() {
        let mut store = store();
        let mut unknown = item("X", "0", Some((2024, 3, 5)));
        unknown.subtotal = None;
        store
            .insert_batch(&[
                item("A", "10.25", Some((2024, 3, 5))),
                item("B", "4.75", Some((2024, 1, 1))),
                item("C", "2.00", None),
                unknown,
            ])
            .unwrap();

        assert_eq!(store.purchase_cost(None).unwrap(), Decimal::from_str("17").unwrap());
        let since = NaiveDate::from_ymd_opt(2024, 3, 1);
        assert_eq!(store.purchase_cost(since).unwrap(), Decimal::from_str("10.25").unwrap());
    }

    #[test]
    fn test_legacy_text_flags() {
        assert!(value_as_bool(Value::Text("1".to_string())));
        assert!(!value_as_bool(Value::Text("0".to_string())));
        assert!(value_as_bool(Value::Integer(1)));
        assert!(!value_as_bool(Value::Null));
    }
}
