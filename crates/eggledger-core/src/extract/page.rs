//! Order page extractor.
//!
//! Saved order pages list each product as a run of six sibling `<li>`
//! elements inside a line-item container:
//!
//! | index | content                                   |
//! |-------|-------------------------------------------|
//! | 0     | label + SKU                               |
//! | 1     | product link (name, href)                 |
//! | 2     | thumbnail link wrapping an `<img>`        |
//! | 3     | label + quantity                          |
//! | 4     | label + unit price                        |
//! | 5     | label + subtotal                          |
//!
//! The order date lives in the header's first list item.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::purchase::PurchaseItem;

use super::rules::{parse_currency, parse_flexible_date, parse_quantity, TAX_EXEMPTION};
use super::{OrderExtractor, PageExtraction, Result};

/// Number of sibling elements that make up one product block.
pub const GROUP_SIZE: usize = 6;

lazy_static! {
    static ref DEFAULT_HEADER: Selector = Selector::parse(".order-detail").unwrap();
    static ref DEFAULT_CONTAINER: Selector = Selector::parse(".mr-6").unwrap();
    static ref LIST_ITEM: Selector = Selector::parse("li").unwrap();
    static ref SPAN: Selector = Selector::parse("span").unwrap();
    static ref ANCHOR: Selector = Selector::parse("a").unwrap();
    static ref IMAGE: Selector = Selector::parse("img").unwrap();
}

/// Extracts purchase items from saved order detail pages.
#[derive(Debug, Clone)]
pub struct OrderPageExtractor {
    header: Selector,
    container: Selector,
}

impl OrderPageExtractor {
    /// Create an extractor with the default selectors.
    pub fn new() -> Self {
        Self {
            header: DEFAULT_HEADER.clone(),
            container: DEFAULT_CONTAINER.clone(),
        }
    }

    /// Create an extractor from configured selectors.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            header: compile(&config.header_selector)?,
            container: compile(&config.container_selector)?,
        })
    }

    /// Read the order date from the header's first list item.
    fn order_date(&self, document: &Html) -> Option<NaiveDate> {
        let header = document.select(&self.header).next()?;
        let first_item = header.select(&LIST_ITEM).next()?;
        let label = first_item.select(&SPAN).next()?;

        let text = visible_text(label);
        if text.is_empty() {
            return None;
        }
        Some(parse_flexible_date(&text))
    }

    /// Interpret one complete block of six elements.
    fn parse_group(
        &self,
        group: &[ElementRef<'_>],
        order_date: Option<NaiveDate>,
    ) -> Result<PurchaseItem> {
        let sku = second_child_text(group[0], "sku")?;
        let quantity = second_child_text(group[3], "quantity")?;
        let unit_price = second_child_text(group[4], "unit_price")?;
        let subtotal = second_child_text(group[5], "subtotal")?;

        let name_link = group[1].select(&ANCHOR).next();
        let thumb_link = group[2].select(&ANCHOR).next();

        let name = name_link.map(visible_text).and_then(non_empty);
        let detail_link = name_link
            .or(thumb_link)
            .and_then(|a| a.value().attr("href"))
            .map(str::to_string);
        let thumbnail_url = thumb_link
            .and_then(|a| a.select(&IMAGE).next())
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string);

        let tax_exempt = group
            .iter()
            .any(|el| TAX_EXEMPTION.is_match(&visible_text(*el)));

        Ok(PurchaseItem {
            sku: non_empty(sku),
            name,
            quantity: parse_quantity(&quantity),
            unit_price: parse_currency(&unit_price),
            subtotal: parse_currency(&subtotal),
            tax_exempt,
            detail_link,
            thumbnail_url,
            order_date,
        })
    }
}

impl Default for OrderPageExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderExtractor for OrderPageExtractor {
    fn extract(&self, html: &str) -> PageExtraction {
        let document = Html::parse_document(html);
        let order_date = self.order_date(&document);
        if order_date.is_none() {
            debug!("order header not found, items will have no order date");
        }

        let mut result = PageExtraction {
            order_date,
            ..Default::default()
        };

        let containers: Vec<ElementRef<'_>> = document.select(&self.container).collect();
        if containers.is_empty() {
            info!("no line-item containers found in order page");
            return result;
        }
        result.containers = containers.len();

        for container in containers {
            let children: Vec<ElementRef<'_>> = container
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|el| el.value().name() == "li")
                .collect();

            let groups = children.chunks_exact(GROUP_SIZE);
            let remainder = groups.remainder().len();
            if remainder > 0 {
                debug!(remainder, "dropping incomplete product block");
                result.skipped_blocks += 1;
            }

            for (index, group) in groups.enumerate() {
                match self.parse_group(group, order_date) {
                    Ok(item) => result.items.push(item),
                    Err(e) => {
                        warn!("Error parsing product block at index {}: {}", index * GROUP_SIZE, e);
                        result.skipped_blocks += 1;
                        result.warnings.push(e.to_string());
                    }
                }
            }
        }

        debug!(
            items = result.items.len(),
            skipped = result.skipped_blocks,
            "order page extracted"
        );

        result
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ExtractionError::Selector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}

/// Trimmed text nodes of an element, concatenated.
fn visible_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

fn second_child_text(element: ElementRef<'_>, field: &'static str) -> Result<String> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .nth(1)
        .map(visible_text)
        .ok_or(ExtractionError::MissingChild { field, index: 1 })
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
