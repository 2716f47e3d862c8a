//! Tracker export discovery
//!
//! Exports are dropped into the raw data directory with timestamped names
//! (`goodreads_2024-05-01.json`, `scrapes/linkedin-latest.json`, ...). A
//! source is located by filename prefix and the most recently modified
//! match wins. Every call rescans the directory.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde_json::Value;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A parsed tracker export
#[derive(Debug, Clone)]
pub struct Export {
    /// File the export was read from
    pub path: PathBuf,
    /// Parsed JSON document
    pub data: Value,
}

/// Finds and parses the freshest export for a prefix
#[derive(Debug, Clone)]
pub struct JsonLoader {
    root: PathBuf,
}

impl JsonLoader {
    /// Create a loader searching below `root`
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Newest `{prefix}*.json` below the root, if any
    pub fn find_latest(&self, prefix: &str) -> Option<PathBuf> {
        if !self.root.exists() {
            tracing::warn!("raw data directory does not exist: {}", self.root.display());
            return None;
        }

        let mut candidates: Vec<(SystemTime, PathBuf)> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .is_some_and(|name| name.starts_with(prefix) && name.ends_with(".json"))
            })
            .map(|e| {
                let modified = e
                    .metadata()
                    .ok()
                    .and_then(|m| m.modified().ok())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                (modified, e.into_path())
            })
            .collect();

        // Newest first; identical mtimes fall back to path order.
        candidates.sort_by(|a, b| b.cmp(a));
        candidates.into_iter().next().map(|(_, path)| path)
    }

    /// Load the newest export for `prefix`.
    ///
    /// Returns `Ok(None)` when no file matches, and
    /// [`Error::ExportUnreadable`] when the selected file cannot be read or
    /// is not valid JSON.
    pub fn load(&self, prefix: &str) -> Result<Option<Export>> {
        let Some(path) = self.find_latest(prefix) else {
            tracing::info!(
                "no JSON found for prefix '{}' in {}",
                prefix,
                self.root.display()
            );
            return Ok(None);
        };

        let contents = std::fs::read_to_string(&path).map_err(|e| Error::ExportUnreadable {
            path: path.clone(),
            message: e.to_string(),
        })?;
        let data: Value = serde_json::from_str(&contents).map_err(|e| Error::ExportUnreadable {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let shown = path.strip_prefix(&self.root).unwrap_or(&path);
        tracing::info!("loaded JSON for '{}': {}", prefix, shown.display());
        Ok(Some(Export { path, data }))
    }
}
