//! Purchases command - list, show, edit, and delete imported purchases.

use clap::{Args, Subcommand};
use console::style;
use rust_decimal::Decimal;

use eggledger_core::extract::rules::{parse_currency, try_parse_date};
use eggledger_core::{PurchaseRecord, PurchaseUpdate, SortColumn, SortOrder};

use super::{load_config, open_store, OutputFormat};

/// Arguments for the purchases command.
#[derive(Args)]
pub struct PurchasesArgs {
    #[command(subcommand)]
    command: PurchasesCommand,
}

#[derive(Subcommand)]
enum PurchasesCommand {
    /// List stored purchases
    List {
        /// Sort column: order_date, sku, name, or price
        #[arg(long, default_value = "order_date")]
        sort_by: String,

        /// Sort direction: asc or desc
        #[arg(long, default_value = "desc")]
        order: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a single purchase
    Show {
        id: i64,
    },

    /// Edit a purchase; omitted fields keep their current value
    Edit(EditArgs),

    /// Delete one or more purchases
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

#[derive(Args)]
struct EditArgs {
    id: i64,

    /// Order date in any supported format
    #[arg(long)]
    order_date: Option<String>,

    #[arg(long)]
    sku: Option<String>,

    #[arg(long)]
    name: Option<String>,

    #[arg(long)]
    quantity: Option<u32>,

    /// Unit price, e.g. "$18.99" or "(2.00)"
    #[arg(long)]
    price: Option<String>,

    #[arg(long)]
    subtotal: Option<String>,

    /// Product page link
    #[arg(long)]
    href: Option<String>,

    /// Product image link
    #[arg(long)]
    thumbnail: Option<String>,

    #[arg(long)]
    tax_exempt: Option<bool>,
}

pub fn run(args: PurchasesArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let mut store = open_store(&config)?;

    match args.command {
        PurchasesCommand::List {
            sort_by,
            order,
            format,
        } => {
            let records = store.list_purchases(
                SortColumn::parse_or_default(&sort_by),
                SortOrder::parse_or_default(&order),
            )?;
            print_records(&records, format)
        }
        PurchasesCommand::Show { id } => match store.get_purchase(id)? {
            Some(record) => {
                println!("{}", serde_json::to_string_pretty(&record)?);
                Ok(())
            }
            None => anyhow::bail!("No purchase with id {}", id),
        },
        PurchasesCommand::Edit(edit) => {
            let Some(record) = store.get_purchase(edit.id)? else {
                anyhow::bail!("No purchase with id {}", edit.id);
            };
            let id = edit.id;
            let update = apply_edits(record, edit)?;
            store.update_purchase(id, &update)?;
            println!("{} Updated purchase {}", style("✓").green(), id);
            Ok(())
        }
        PurchasesCommand::Delete { ids } => {
            let removed = store.delete_purchases(&ids)?;
            println!(
                "{} Deleted {} of {} requested purchases",
                style("✓").green(),
                removed,
                ids.len()
            );
            Ok(())
        }
    }
}

fn apply_edits(record: PurchaseRecord, edit: EditArgs) -> anyhow::Result<PurchaseUpdate> {
    let mut update = PurchaseUpdate::from(record.item);

    if let Some(date) = edit.order_date {
        update.order_date = Some(
            try_parse_date(&date).ok_or_else(|| anyhow::anyhow!("Unrecognized date: {}", date))?,
        );
    }
    if let Some(price) = edit.price {
        update.unit_price = Some(parse_amount(&price)?);
    }
    if let Some(subtotal) = edit.subtotal {
        update.subtotal = Some(parse_amount(&subtotal)?);
    }
    if edit.sku.is_some() {
        update.sku = edit.sku;
    }
    if edit.name.is_some() {
        update.name = edit.name;
    }
    if edit.quantity.is_some() {
        update.quantity = edit.quantity;
    }
    if edit.href.is_some() {
        update.detail_link = edit.href;
    }
    if edit.thumbnail.is_some() {
        update.thumbnail_url = edit.thumbnail;
    }
    if let Some(tax_exempt) = edit.tax_exempt {
        update.tax_exempt = tax_exempt;
    }

    Ok(update)
}

fn parse_amount(text: &str) -> anyhow::Result<Decimal> {
    parse_currency(text).ok_or_else(|| anyhow::anyhow!("Not an amount: {}", text))
}

fn print_records(records: &[PurchaseRecord], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => print!("{}", format_records_csv(records)?),
        OutputFormat::Text => {
            if records.is_empty() {
                println!("{} No purchases stored.", style("ℹ").blue());
                return Ok(());
            }
            println!(
                "{:>5}  {:<10}  {:<12}  {:<36}  {:>4}  {:>9}  {:>9}  {}",
                "id", "date", "sku", "name", "qty", "price", "subtotal", "tax"
            );
            for record in records {
                let item = &record.item;
                println!(
                    "{:>5}  {:<10}  {:<12}  {:<36}  {:>4}  {:>9}  {:>9}  {}",
                    record.id,
                    opt(item.order_date),
                    item.sku.as_deref().unwrap_or(""),
                    truncate(item.name.as_deref().unwrap_or(""), 36),
                    opt(item.quantity),
                    opt(item.unit_price),
                    opt(item.subtotal),
                    if item.tax_exempt { "exempt" } else { "" },
                );
            }
        }
    }
    Ok(())
}

fn format_records_csv(records: &[PurchaseRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "id",
        "order_date",
        "sku",
        "name",
        "quantity",
        "price",
        "subtotal",
        "tax_exempt",
        "href",
        "product_thumbnail",
    ])?;

    for record in records {
        let item = &record.item;
        let id = record.id.to_string();
        let order_date = opt(item.order_date);
        let quantity = opt(item.quantity);
        let price = opt(item.unit_price);
        let subtotal = opt(item.subtotal);

        wtr.write_record([
            id.as_str(),
            order_date.as_str(),
            item.sku.as_deref().unwrap_or(""),
            item.name.as_deref().unwrap_or(""),
            quantity.as_str(),
            price.as_str(),
            subtotal.as_str(),
            if item.tax_exempt { "1" } else { "0" },
            item.detail_link.as_deref().unwrap_or(""),
            item.thumbnail_url.as_deref().unwrap_or(""),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}
