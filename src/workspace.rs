//! Workspace directory creation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::PackageError;

/// Create the output directory for this run.
///
/// A pre-existing directory is a hard error: the workspace is exclusively
/// owned by one run, and stepping into leftovers from a previous run would
/// risk clobbering its artifacts.
pub fn create(target_dir: &Path) -> Result<()> {
    if target_dir.is_dir() {
        return Err(PackageError::TargetDirExists(target_dir.to_path_buf()).into());
    }
    fs::create_dir(target_dir)
        .with_context(|| format!("Failed to create workspace {}", target_dir.display()))?;
    Ok(())
}
