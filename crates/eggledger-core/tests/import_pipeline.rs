use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use eggledger_core::{
    BatchImporter, LedgerConfig, SchemaStatus, SortColumn, SortOrder, Store,
};

fn block(sku: &str, price: &str) -> String {
    format!(
        r#"<li><span>SKU</span><span>{sku}</span></li>
           <li><a href="https://shop.example/p/{sku}">Feed {sku}</a></li>
           <li><a href="https://shop.example/p/{sku}"><img src="https://cdn.example/{sku}.jpg"></a></li>
           <li><span>Quantity</span><span>1</span></li>
           <li><span>Price</span><span>{price}</span></li>
           <li><span>Subtotal</span><span>{price}</span></li>"#
    )
}

fn order_page(date: &str, items: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
  <body>
    <div class="order-summary">
      <ul class="order-detail">
        <li><span>{date}</span></li>
        <li><span>Order #1001</span></li>
      </ul>
    </div>
    <ul class="flex mr-6">
      {items}
    </ul>
  </body>
</html>"#
    )
}

fn setup(dir: &Path) -> (LedgerConfig, Store) {
    let config = LedgerConfig::default().rooted_at(dir);
    fs::create_dir_all(&config.paths.inbox_dir).unwrap();
    let store = Store::from_config(&config.paths).unwrap();
    (config, store)
}

fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn imports_two_pages_and_archives_them() {
    let dir = tempfile::tempdir().unwrap();
    let (config, mut store) = setup(dir.path());

    let first = order_page(
        "March 6, 2024",
        &format!("{}{}", block("LAY-50", "$18.99"), block("SCR-25", "$12.49")),
    );
    let partial: String = block("OYS-5", "$6.00")
        .lines()
        .take(4)
        .collect::<Vec<_>>()
        .join("\n");
    let second = order_page("2024-03-10", &format!("{}{}", block("GRIT-1", "$4.00"), partial));

    fs::write(config.paths.inbox_dir.join("order-1.html"), first).unwrap();
    fs::write(config.paths.inbox_dir.join("order-2.HTML"), second).unwrap();

    let importer = BatchImporter::from_config(&config).unwrap();
    let summary = importer.import_all(&mut store).unwrap();

    assert_eq!(summary.items_imported, 3);
    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.files_failed, 0);
    assert_eq!(summary.skipped_blocks, 1);
    assert_eq!(summary.schema, Some(SchemaStatus::Current));

    assert!(dir_entries(&config.paths.inbox_dir).is_empty());
    assert_eq!(
        dir_entries(&config.paths.archive_dir),
        vec!["order-1.html".to_string(), "order-2.HTML".to_string()]
    );

    let records = store.list_purchases(SortColumn::Sku, SortOrder::Asc).unwrap();
    let skus: Vec<_> = records.iter().map(|r| r.item.sku.clone().unwrap()).collect();
    assert_eq!(skus, vec!["GRIT-1", "LAY-50", "SCR-25"]);

    let lay = &records[1].item;
    assert_eq!(lay.order_date, NaiveDate::from_ymd_opt(2024, 3, 6));
    assert_eq!(lay.unit_price, Some(Decimal::new(1899, 2)));
    assert_eq!(lay.detail_link.as_deref(), Some("https://shop.example/p/LAY-50"));
    assert_eq!(lay.thumbnail_url.as_deref(), Some("https://cdn.example/LAY-50.jpg"));
    assert_eq!(records[0].item.order_date, NaiveDate::from_ymd_opt(2024, 3, 10));
}

#[test]
fn empty_inbox_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let (config, mut store) = setup(dir.path());
    let importer = BatchImporter::from_config(&config).unwrap();

    let summary = importer.import_all(&mut store).unwrap();

    assert_eq!(summary.items_imported, 0);
    assert_eq!(summary.files_processed, 0);
    assert_eq!(summary.schema, None);
    assert_eq!(store.count_purchases().unwrap(), 0);
}

#[test]
fn page_without_items_is_still_archived() {
    let dir = tempfile::tempdir().unwrap();
    let (config, mut store) = setup(dir.path());
    fs::write(
        config.paths.inbox_dir.join("receipt.html"),
        "<html><body><p>Thanks for your order</p></body></html>",
    )
    .unwrap();

    let importer = BatchImporter::from_config(&config).unwrap();
    let summary = importer.import_all(&mut store).unwrap();
    assert_eq!((summary.items_imported, summary.files_processed), (0, 1));
    assert!(config.paths.archive_dir.join("receipt.html").exists());

    let again = importer.import_all(&mut store).unwrap();
    assert_eq!((again.items_imported, again.files_processed), (0, 0));
}

#[test]
fn imported_rows_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let (config, mut store) = setup(dir.path());
    fs::write(
        config.paths.inbox_dir.join("order.html"),
        order_page("Mar 6, 2024", &block("LAY-50", "(2.00)")),
    )
    .unwrap();

    BatchImporter::from_config(&config)
        .unwrap()
        .import_all(&mut store)
        .unwrap();
    drop(store);

    let store = Store::from_config(&config.paths).unwrap();
    let records = store.list_purchases(SortColumn::OrderDate, SortOrder::Desc).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].item.subtotal, Some(Decimal::new(-2, 0)));
}
