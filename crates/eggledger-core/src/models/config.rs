//! Configuration structures for the ledger.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for eggledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// File and directory locations.
    pub paths: PathsConfig,

    /// Batch import configuration.
    pub import: ImportConfig,

    /// Order page extraction configuration.
    pub extraction: ExtractionConfig,
}

/// File and directory locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// SQLite database file.
    pub database: PathBuf,

    /// Directory holding saved order pages waiting to be imported.
    pub inbox_dir: PathBuf,

    /// Directory that imported pages are moved into.
    pub archive_dir: PathBuf,

    /// Plain text file holding the number of chickens.
    pub settings_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("egg_data.db"),
            inbox_dir: PathBuf::from("purchases"),
            archive_dir: PathBuf::from("processed"),
            settings_file: PathBuf::from("num_chickens.txt"),
        }
    }
}

/// Batch import configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// File extension of importable pages, matched case-insensitively.
    pub extension: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            extension: "html".to_string(),
        }
    }
}

/// Order page extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Selector for the order header whose first list item holds the date.
    pub header_selector: String,

    /// Selector for line-item containers.
    pub container_selector: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            header_selector: ".order-detail".to_string(),
            container_selector: ".mr-6".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Resolve every relative path against `base`.
    pub fn rooted_at(mut self, base: &std::path::Path) -> Self {
        let paths = &mut self.paths;
        for path in [
            &mut paths.database,
            &mut paths.inbox_dir,
            &mut paths.archive_dir,
            &mut paths.settings_file,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}
