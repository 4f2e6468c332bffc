//! Core library for the egg and feed ledger.
//!
//! This crate provides:
//! - Order page extraction from saved HTML (product blocks, order date)
//! - Field normalization (currency, quantities, permissive dates)
//! - SQLite storage for purchases and egg counts
//! - Batch import from an inbox directory with archiving
//! - Cost-per-egg dashboard figures

pub mod dashboard;
pub mod error;
pub mod extract;
pub mod import;
pub mod models;
pub mod store;

pub use dashboard::{DashboardSummary, WindowSummary};
pub use error::{LedgerError, Result};
pub use extract::{OrderExtractor, OrderPageExtractor, PageExtraction};
pub use import::{BatchImporter, FileReport, ImportSummary};
pub use models::config::LedgerConfig;
pub use models::egg::EggCount;
pub use models::purchase::{PurchaseItem, PurchaseRecord, PurchaseUpdate, SortColumn, SortOrder};
pub use store::{SchemaStatus, Store};
