//! Batch import of saved order pages.
//!
//! Every page in the inbox is extracted and then moved to the archive, even
//! when it yields no items, so a page is never imported twice. Items from
//! all pages are written in a single batch at the end.

use std::fs;
use std::path::{Path, PathBuf};

use glob::{glob_with, MatchOptions, Pattern};
use tracing::{debug, info, warn};

use crate::error::{LedgerError, Result};
use crate::extract::{OrderExtractor, OrderPageExtractor};
use crate::models::config::LedgerConfig;
use crate::models::purchase::PurchaseItem;
use crate::store::{SchemaStatus, Store};

/// Totals for one import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Purchase items written to the store.
    pub items_imported: usize,
    /// Pages extracted and archived.
    pub files_processed: usize,
    /// Pages that could not be read or archived; they stay in the inbox.
    pub files_failed: usize,
    /// Product blocks dropped as incomplete or malformed.
    pub skipped_blocks: usize,
    /// Schema check result, if the store was touched.
    pub schema: Option<SchemaStatus>,
}

/// Outcome for a single page.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub items: usize,
    pub skipped_blocks: usize,
    pub error: Option<String>,
}

/// Imports every pending order page from an inbox directory.
pub struct BatchImporter<E = OrderPageExtractor> {
    inbox_dir: PathBuf,
    archive_dir: PathBuf,
    extension: String,
    extractor: E,
}

impl BatchImporter<OrderPageExtractor> {
    /// Create an importer from the ledger configuration.
    pub fn from_config(config: &LedgerConfig) -> Result<Self> {
        let extractor = OrderPageExtractor::from_config(&config.extraction)?;
        Ok(BatchImporter::new(
            config.paths.inbox_dir.clone(),
            config.paths.archive_dir.clone(),
            extractor,
        )
        .with_extension(&config.import.extension))
    }
}

impl<E: OrderExtractor> BatchImporter<E> {
    /// Create an importer reading `.html` pages from `inbox_dir`.
    pub fn new(inbox_dir: impl Into<PathBuf>, archive_dir: impl Into<PathBuf>, extractor: E) -> Self {
        Self {
            inbox_dir: inbox_dir.into(),
            archive_dir: archive_dir.into(),
            extension: "html".to_string(),
            extractor,
        }
    }

    /// Set the page file extension (matched case-insensitively).
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn inbox_dir(&self) -> &Path {
        &self.inbox_dir
    }

    pub fn archive_dir(&self) -> &Path {
        &self.archive_dir
    }

    /// Pages currently waiting in the inbox.
    ///
    /// A missing inbox is reported as empty; nothing is created.
    pub fn pending_files(&self) -> Result<Vec<PathBuf>> {
        if !self.inbox_dir.is_dir() {
            return Ok(Vec::new());
        }

        let inbox = self.inbox_dir.to_str().ok_or_else(|| {
            LedgerError::Config(format!(
                "inbox path is not valid UTF-8: {}",
                self.inbox_dir.display()
            ))
        })?;
        let pattern = format!(
            "{}/*.{}",
            Pattern::escape(inbox),
            Pattern::escape(&self.extension)
        );
        let options = MatchOptions {
            case_sensitive: false,
            ..Default::default()
        };

        let files = glob_with(&pattern, options)?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        Ok(files)
    }

    /// Import every pending page into `store`.
    pub fn import_all(&self, store: &mut Store) -> Result<ImportSummary> {
        self.import_all_with(store, |_| {})
    }

    /// Import every pending page, reporting each page to `on_file`.
    pub fn import_all_with<F>(&self, store: &mut Store, mut on_file: F) -> Result<ImportSummary>
    where
        F: FnMut(&FileReport),
    {
        fs::create_dir_all(&self.inbox_dir)?;
        fs::create_dir_all(&self.archive_dir)?;
        let files = self.pending_files()?;
        let mut summary = ImportSummary::default();

        if files.is_empty() {
            debug!("inbox {} is empty", self.inbox_dir.display());
            return Ok(summary);
        }

        let mut all_items: Vec<PurchaseItem> = Vec::new();
        for path in files {
            let report = match self.process_file(&path) {
                Ok((items, skipped_blocks)) => {
                    summary.files_processed += 1;
                    summary.skipped_blocks += skipped_blocks;
                    let report = FileReport {
                        path,
                        items: items.len(),
                        skipped_blocks,
                        error: None,
                    };
                    all_items.extend(items);
                    report
                }
                Err(e) => {
                    warn!("Failed to import {}: {}", path.display(), e);
                    summary.files_failed += 1;
                    FileReport {
                        path,
                        items: 0,
                        skipped_blocks: 0,
                        error: Some(e.to_string()),
                    }
                }
            };
            on_file(&report);
        }

        if summary.files_processed > 0 {
            summary.schema = Some(store.ensure_schema()?);
            summary.items_imported = store.insert_batch(&all_items)?;
        }

        info!(
            "Imported {} items from {} files",
            summary.items_imported, summary.files_processed
        );

        Ok(summary)
    }

    /// Extract one page and move it to the archive.
    ///
    /// Items are only returned once the page has been archived.
    fn process_file(&self, path: &Path) -> Result<(Vec<PurchaseItem>, usize)> {
        let bytes = fs::read(path)?;
        let html = String::from_utf8_lossy(&bytes);

        let extraction = self.extractor.extract(&html);
        debug!(
            "{}: {} items, {} skipped blocks",
            path.display(),
            extraction.items.len(),
            extraction.skipped_blocks
        );

        self.archive(path)?;
        Ok((extraction.items, extraction.skipped_blocks))
    }

    fn archive(&self, path: &Path) -> Result<PathBuf> {
        let file_name = path.file_name().ok_or_else(|| {
            LedgerError::Config(format!("not a file path: {}", path.display()))
        })?;
        let target = self.archive_dir.join(file_name);

        if fs::rename(path, &target).is_err() {
            // rename fails across filesystems
            copy_then_remove(path, &target, |p| fs::remove_file(p))?;
        }

        debug!("archived {} to {}", path.display(), target.display());
        Ok(target)
    }
}

/// Copy `from` to `to`, then delete `from` with `remove`.
///
/// If the source cannot be removed the copy is deleted again, so the page
/// only ever exists in one place.
fn copy_then_remove<F>(from: &Path, to: &Path, remove: F) -> std::io::Result<()>
where
    F: FnOnce(&Path) -> std::io::Result<()>,
{
    fs::copy(from, to)?;
    if let Err(e) = remove(from) {
        if let Err(cleanup) = fs::remove_file(to) {
            warn!("failed to remove {}: {}", to.display(), cleanup);
        }
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PageExtraction;

    struct CountingExtractor;

    impl OrderExtractor for CountingExtractor {
        fn extract(&self, html: &str) -> PageExtraction {
            let items = html
                .lines()
                .filter(|l| l.starts_with("item"))
                .map(|l| PurchaseItem {
                    sku: Some(l.to_string()),
                    ..Default::default()
                })
                .collect();
            PageExtraction {
                items,
                ..Default::default()
            }
        }
    }

    #[test]
    fn test_extension_matching_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        let inbox = dir.path().join("inbox");
        fs::create_dir_all(&inbox).unwrap();
        fs::write(inbox.join("a.html"), "").unwrap();
        fs::write(inbox.join("b.HTML"), "").unwrap();
        fs::write(inbox.join("notes.txt"), "").unwrap();
        fs::create_dir_all(inbox.join("dir.html")).unwrap();

        let importer = BatchImporter::new(&inbox, dir.path().join("done"), CountingExtractor);
        let mut names: Vec<String> = importer
            .pending_files()
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.html".to_string(), "b.HTML".to_string()]);
    }

    #[test]
    fn test_custom_extractor_and_extension() {
        let dir = tempfile::tempdir().unwrap();
        let inbox = dir.path().join("inbox");
        let archive = dir.path().join("archive");
        fs::create_dir_all(&inbox).unwrap();
        fs::write(inbox.join("one.htm"), "item 1\nitem 2\nfooter").unwrap();
        fs::write(inbox.join("two.htm"), "nothing here").unwrap();

        let importer =
            BatchImporter::new(&inbox, &archive, CountingExtractor).with_extension(".htm");
        let mut store = Store::open_in_memory(dir.path().join("num_chickens.txt")).unwrap();
        let mut reports = Vec::new();

        let summary = importer
            .import_all_with(&mut store, |r| reports.push(r.items))
            .unwrap();

        assert_eq!(summary.items_imported, 2);
        assert_eq!(summary.files_processed, 2);
        reports.sort();
        assert_eq!(reports, vec![0, 2]);
        assert!(archive.join("two.htm").exists());
        assert_eq!(store.count_purchases().unwrap(), 2);
    }

    #[test]
    fn test_copy_then_remove_moves_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("order.html");
        let to = dir.path().join("archived.html");
        fs::write(&from, "page").unwrap();

        copy_then_remove(&from, &to, |p| fs::remove_file(p)).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "page");
    }

    #[test]
    fn test_failed_source_removal_drops_copy() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("order.html");
        let to = dir.path().join("archived.html");
        fs::write(&from, "page").unwrap();

        let result = copy_then_remove(&from, &to, |_| {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "busy"))
        });

        assert!(result.is_err());
        assert!(from.exists());
        assert!(!to.exists());
    }

    #[test]
    fn test_pending_files_leaves_missing_inbox_alone() {
        let dir = tempfile::tempdir().unwrap();
        let inbox = dir.path().join("not-yet");
        let importer = BatchImporter::new(&inbox, dir.path().join("archive"), CountingExtractor);

        assert!(importer.pending_files().unwrap().is_empty());
        assert!(!inbox.exists());
    }

    #[test]
    fn test_missing_inbox_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let inbox = dir.path().join("not-yet");
        let importer = BatchImporter::new(&inbox, dir.path().join("archive"), CountingExtractor);
        let mut store = Store::open_in_memory(dir.path().join("num_chickens.txt")).unwrap();

        let summary = importer.import_all(&mut store).unwrap();

        assert_eq!(summary, ImportSummary::default());
        assert!(inbox.is_dir());
        assert!(dir.path().join("archive").is_dir());
    }
}
