//! Error types for the eggledger-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the eggledger library.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Persistence error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Order page extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Inbox discovery error.
    #[error("invalid inbox pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to the SQLite store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the database file.
    #[error("failed to open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to create the directory holding the database.
    #[error("failed to create directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A query or statement failed.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to write the settings file.
    #[error("failed to write settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while interpreting a single product block.
///
/// These never abort a document; the extractor logs them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// A CSS selector could not be compiled.
    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    /// A product block is missing one of its positional children.
    #[error("product block field {field} has no child element at index {index}")]
    MissingChild { field: &'static str, index: usize },
}

/// Result type for the eggledger library.
pub type Result<T> = std::result::Result<T, LedgerError>;
