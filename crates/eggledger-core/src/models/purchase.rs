//! Feed purchase data models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single product line extracted from an order page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    /// Product code as printed on the order page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,

    /// Product display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Ordered quantity; `None` if the page text was not a number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,

    /// Price per unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,

    /// Line total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Decimal>,

    /// Whether the line carried a tax exemption note.
    #[serde(default)]
    pub tax_exempt: bool,

    /// Link to the product page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_link: Option<String>,

    /// Product image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    /// Order date, shared by every item of the same order page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_date: Option<NaiveDate>,
}

/// A purchase item as stored, with its row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: i64,

    #[serde(flatten)]
    pub item: PurchaseItem,
}

/// Replacement values for an existing purchase row.
///
/// Every field is written, mirroring an edit form that submits the whole row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PurchaseUpdate {
    pub order_date: Option<NaiveDate>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub quantity: Option<u32>,
    pub unit_price: Option<Decimal>,
    pub subtotal: Option<Decimal>,
    pub detail_link: Option<String>,
    pub thumbnail_url: Option<String>,
    pub tax_exempt: bool,
}

impl From<PurchaseItem> for PurchaseUpdate {
    fn from(item: PurchaseItem) -> Self {
        Self {
            order_date: item.order_date,
            sku: item.sku,
            name: item.name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal,
            detail_link: item.detail_link,
            thumbnail_url: item.thumbnail_url,
            tax_exempt: item.tax_exempt,
        }
    }
}

/// Columns the purchase listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    #[default]
    OrderDate,
    Sku,
    Name,
    Price,
}

impl SortColumn {
    /// Parse a column name, falling back to the order date for anything
    /// outside the allow-list.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "order_date" | "date" => Self::OrderDate,
            "sku" => Self::Sku,
            "name" => Self::Name,
            "price" => Self::Price,
            _ => Self::default(),
        }
    }

    /// SQL expression used in the ORDER BY clause.
    pub(crate) fn sql_expr(&self) -> &'static str {
        match self {
            Self::OrderDate => "date(order_date)",
            Self::Sku => "sku",
            Self::Name => "name",
            Self::Price => "price",
        }
    }
}

/// Sort direction for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parse "asc"/"desc", falling back to descending.
    pub fn parse_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "asc" => Self::Asc,
            "desc" => Self::Desc,
            _ => Self::default(),
        }
    }

    pub(crate) fn sql_keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}
