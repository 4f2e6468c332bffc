//! Import command - load saved order pages from the inbox.

use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use eggledger_core::BatchImporter;

use super::{load_config, open_store};

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Only list the pages that would be imported
    #[arg(long)]
    dry_run: bool,
}

pub fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let importer = BatchImporter::from_config(&config)?;

    if args.dry_run {
        let files = importer.pending_files()?;
        println!(
            "{} {} pages waiting in {}",
            style("ℹ").blue(),
            files.len(),
            importer.inbox_dir().display()
        );
        for file in files {
            println!("  - {}", file.display());
        }
        return Ok(());
    }

    let mut store = open_store(&config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message("Importing order pages...");

    let mut failed = Vec::new();
    let summary = importer.import_all_with(&mut store, |report| {
        let name = report
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match &report.error {
            Some(error) => failed.push(format!("{}: {}", name, error)),
            None => spinner.set_message(format!("{} ({} items)", name, report.items)),
        }
    })?;

    spinner.finish_and_clear();

    if summary.files_processed == 0 && summary.files_failed == 0 {
        println!(
            "{} No order pages found in {}",
            style("ℹ").blue(),
            importer.inbox_dir().display()
        );
        return Ok(());
    }

    println!(
        "{} Imported {} items from {} files in {:?}",
        style("✓").green(),
        style(summary.items_imported).green(),
        summary.files_processed,
        start.elapsed()
    );

    if summary.skipped_blocks > 0 {
        println!(
            "   {} incomplete or malformed product blocks skipped",
            style(summary.skipped_blocks).yellow()
        );
    }

    if let Some(eggledger_core::SchemaStatus::Recreated { missing }) = &summary.schema {
        println!(
            "{} Purchase table was out of date (missing {}) and has been recreated",
            style("!").yellow(),
            missing.join(", ")
        );
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files (left in inbox):").red());
        for line in &failed {
            println!("  - {}", line);
        }
    }

    Ok(())
}
