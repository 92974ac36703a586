//! Create-only file writes.
//!
//! Generated outputs must never clobber files from a previous run, so every
//! emitter writes through these helpers, which refuse pre-existing targets.

use anyhow::Result;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use crate::error::PackageError;

/// Write a file, failing with the overwrite-refusal error if it exists.
///
/// `what` is the human-readable name used in the error message (e.g.
/// "Makefile").
pub fn write_new<C: AsRef<[u8]>>(path: &Path, content: C, what: &'static str) -> Result<()> {
    if path.exists() {
        return Err(PackageError::RefusedOverwrite(what).into());
    }
    fs::write(path, content)?;
    Ok(())
}

/// Write a file with specific Unix permissions, refusing pre-existing targets.
///
/// # Arguments
/// * `path` - Path to the file to write
/// * `content` - Content to write
/// * `mode` - Unix permission bits (e.g., 0o755 for an executable script)
pub fn write_new_mode<C: AsRef<[u8]>>(
    path: &Path,
    content: C,
    mode: u32,
    what: &'static str,
) -> Result<()> {
    write_new(path, content, what)?;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}
