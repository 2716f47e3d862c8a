//! Runtime error types

/// Result type for build operations
pub type Result<T> = anyhow::Result<T>;

/// Build error (application-level, carries context chains)
pub type Error = anyhow::Error;
