//! Path configuration
//!
//! Every pass receives a [`SiteConfig`] instead of reading the environment
//! itself. The CLI fills it from flags and environment variables; tests
//! build one directly around a temporary directory.
//!
//! # Layout
//!
//! - `raw_data` - tracker exports (`goodreads*.json`, `linkedin*.json`, ...)
//! - `notes` - Obsidian folder holding the blog notes
//! - `site_dir` - Jekyll site root receiving `_data/`, `_logs/` and `about.md`

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable overriding the raw tracker data directory
pub const RAW_DATA_ENV: &str = "TRACKER_RAW_DATA";

/// Environment variable overriding the Obsidian notes directory
pub const NOTES_ENV: &str = "OBSIDIAN_NOTES_PATH";

/// Environment variable overriding the site root
pub const SITE_DIR_ENV: &str = "SITE_DIR";

/// Default location of the tracker exports on the build host
pub const DEFAULT_RAW_DATA: &str = "/var/lib/personal-track";

/// Default location of the published notes inside the synced vault
pub const DEFAULT_NOTES: &str =
    "/home/matzalazar/dropbox_montado/Aplicaciones/remotely-save/Notas/blog notes";

/// Input and output locations for one build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Directory searched (recursively) for tracker exports
    pub raw_data: PathBuf,

    /// Directory searched (recursively) for Markdown notes
    pub notes: PathBuf,

    /// Root of the static site
    pub site_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            raw_data: PathBuf::from(DEFAULT_RAW_DATA),
            notes: PathBuf::from(DEFAULT_NOTES),
            site_dir: PathBuf::from("."),
        }
    }
}

impl SiteConfig {
    /// Create a configuration from explicit paths
    pub fn new(
        raw_data: impl Into<PathBuf>,
        notes: impl Into<PathBuf>,
        site_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            raw_data: raw_data.into(),
            notes: notes.into(),
            site_dir: site_dir.into(),
        }
    }

    /// `_data/` directory receiving the YAML data files
    pub fn data_dir(&self) -> PathBuf {
        self.site_dir.join("_data")
    }

    /// `_logs/` directory receiving one Markdown file per published note
    pub fn logs_dir(&self) -> PathBuf {
        self.site_dir.join("_logs")
    }

    /// The generated about page
    pub fn cv_file(&self) -> PathBuf {
        self.site_dir.join("about.md")
    }

    /// Path of a data file such as `reading.yml`
    pub fn data_file(&self, name: &str) -> PathBuf {
        self.data_dir().join(name)
    }

    /// Fail unless the raw data directory exists.
    ///
    /// This is the only precondition that aborts a whole build.
    pub fn ensure_raw_data(&self) -> Result<&Path> {
        if self.raw_data.is_dir() {
            Ok(&self.raw_data)
        } else {
            Err(Error::RawDataMissing {
                path: self.raw_data.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = SiteConfig::default();
        assert_eq!(config.raw_data, PathBuf::from(DEFAULT_RAW_DATA));
        assert_eq!(config.site_dir, PathBuf::from("."));
    }

    #[test]
    fn test_derived_destinations() {
        let config = SiteConfig::new("/raw", "/notes", "/site");
        assert_eq!(config.data_dir(), PathBuf::from("/site/_data"));
        assert_eq!(config.logs_dir(), PathBuf::from("/site/_logs"));
        assert_eq!(config.cv_file(), PathBuf::from("/site/about.md"));
        assert_eq!(
            config.data_file("reading.yml"),
            PathBuf::from("/site/_data/reading.yml")
        );
    }

    #[test]
    fn test_ensure_raw_data_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::new(dir.path().join("nope"), dir.path(), dir.path());
        let err = config.ensure_raw_data().unwrap_err();
        assert!(matches!(err, Error::RawDataMissing { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_ensure_raw_data_present() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::new(dir.path(), dir.path(), dir.path());
        assert_eq!(config.ensure_raw_data().unwrap(), dir.path());
    }
}
