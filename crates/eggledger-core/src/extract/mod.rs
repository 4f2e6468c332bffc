//! Order page extraction module.

mod page;
pub mod rules;

pub use page::{OrderPageExtractor, GROUP_SIZE};

use chrono::NaiveDate;

use crate::error::ExtractionError;
use crate::models::purchase::PurchaseItem;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Items extracted from one order page.
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    /// Extracted items in document order.
    pub items: Vec<PurchaseItem>,
    /// Order date read from the page header, if present.
    pub order_date: Option<NaiveDate>,
    /// Number of line-item containers found.
    pub containers: usize,
    /// Product blocks dropped as incomplete or malformed.
    pub skipped_blocks: usize,
    /// Reasons for malformed blocks.
    pub warnings: Vec<String>,
}

/// Trait for order page extractors.
///
/// Extraction never fails as a whole; bad product blocks are skipped.
pub trait OrderExtractor {
    /// Extract purchase items from an HTML document.
    fn extract(&self, html: &str) -> PageExtraction;
}
