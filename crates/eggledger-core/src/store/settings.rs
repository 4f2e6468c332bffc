//! Chicken count setting, kept in a plain text file next to the database.

use std::fs;

use tracing::{debug, info};

use crate::error::StoreError;

use super::{Result, Store};

/// Chicken count used when the settings file is missing or unreadable.
pub const DEFAULT_CHICKEN_COUNT: u32 = 1;

impl Store {
    /// Current number of chickens.
    pub fn chicken_count(&self) -> u32 {
        match fs::read_to_string(&self.settings_path) {
            Ok(content) => content.trim().parse().unwrap_or_else(|e| {
                debug!(
                    "invalid chicken count in {}: {}",
                    self.settings_path.display(),
                    e
                );
                DEFAULT_CHICKEN_COUNT
            }),
            Err(e) => {
                debug!("no chicken count at {}: {}", self.settings_path.display(), e);
                DEFAULT_CHICKEN_COUNT
            }
        }
    }

    /// Replace the stored chicken count.
    pub fn set_chicken_count(&mut self, count: u32) -> Result<()> {
        let path = &self.settings_path;
        let settings_err = |source| StoreError::Settings {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(settings_err)?;
            }
        }
        fs::write(path, count.to_string()).map_err(settings_err)?;

        info!(count, "chicken count updated");
        Ok(())
    }
}
