//! Output writers
//!
//! Every generated file is fully overwritten; parent directories are
//! created on demand.

use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Write `content` to `dest`, creating parent directories
pub fn write_text(dest: &Path, content: &str) -> Result<()> {
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(dest, content)?;
    Ok(())
}

/// Serialize `data` as block-style YAML into `dest`.
///
/// Field order follows the serialized type; nothing is re-sorted.
pub fn write_yaml<T: Serialize + ?Sized>(dest: &Path, data: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(data)?;
    write_text(dest, &yaml)
}
