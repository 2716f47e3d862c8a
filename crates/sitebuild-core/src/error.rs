//! Error types for sitebuild-core

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sitebuild-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sitebuild-core
#[derive(Error, Debug)]
pub enum Error {
    /// The raw tracker data directory does not exist
    #[error("raw data directory does not exist: {}", path.display())]
    RawDataMissing {
        /// Path that was checked
        path: PathBuf,
    },

    /// A tracker export was found but could not be read or parsed
    #[error("could not read export '{}': {message}", path.display())]
    ExportUnreadable {
        /// Path of the selected export
        path: PathBuf,
        /// Underlying failure
        message: String,
    },

    /// A tracker export parsed, but its top-level shape is not one we know
    #[error("unrecognized shape for '{source_name}' export")]
    UnrecognizedShape {
        /// Tracker prefix (e.g. `goodreads`)
        source_name: String,
    },

    /// Template rendering error
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
