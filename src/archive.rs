//! Archive production: tar up the application bundle and compress it.

use std::path::Path;

use anyhow::Result;

use crate::config::{Config, Names};
use crate::preflight::TAR_BIN;
use crate::process::Cmd;

/// What the archive step did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// A fresh tarball was created, with this filename.
    Created(String),
    /// An archive was already present; nothing was invoked.
    SkippedExisting(String),
}

/// Produce `{app_name}.{build_date}.tar.bz2` in the workspace.
///
/// If an archive for this application already exists in the workspace, the
/// step short-circuits without invoking tar or bzip2, leaving the existing
/// file untouched.
pub fn bundle_application(
    config: &Config,
    names: &Names,
    workspace: &Path,
) -> Result<ArchiveOutcome> {
    let app_dir = match config.application.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let scratch_tarball = format!("{}.{}.tar", names.app_name, names.build_date);

    if config.debug >= 10 {
        println!("app_name: {}", names.app_name);
        println!("app_dir: {}", app_dir.display());
        println!("tarball_name: {}", names.tarball_name);
    }

    // Check for a pre-existing tarball so we don't step on existing files.
    for existing in [
        format!("{}.tar.bz2", names.app_name),
        format!("{}.tar", names.app_name),
    ] {
        if workspace.join(&existing).exists() {
            println!("{} already exists. Skipping tarball creation.", existing);
            return Ok(ArchiveOutcome::SkippedExisting(existing));
        }
    }

    Cmd::new(TAR_BIN)
        .arg("cf")
        .arg(&scratch_tarball)
        .arg("-C")
        .arg_path(app_dir)
        .arg(&names.installed_app)
        .dir(workspace)
        .error_msg(format!("Archiving {} failed", names.installed_app))
        .run()?;

    // bzip2 replaces the scratch tar with the .tar.bz2 artifact.
    Cmd::new("bzip2")
        .args(["-9", &scratch_tarball])
        .dir(workspace)
        .error_msg(format!("Compressing {} failed", scratch_tarball))
        .run()?;

    Ok(ArchiveOutcome::Created(names.tarball_name.clone()))
}
