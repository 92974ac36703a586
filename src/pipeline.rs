//! The packaging pipeline, stage by stage.
//!
//! Strictly forward flow: host tool checks, workspace creation, archive,
//! preflight script, Makefile, optional downstream Luggage builds. Any stage
//! failure aborts the run; partial output is left in place for inspection.

use std::path::Path;

use anyhow::Result;

use crate::archive;
use crate::config::{Config, Names};
use crate::preflight;
use crate::process::Cmd;
use crate::recipe;
use crate::script;
use crate::workspace;

/// Run the whole pipeline for a resolved configuration.
pub fn run(config: &Config, names: &Names) -> Result<()> {
    preflight::require_host_tools(config)?;

    workspace::create(&names.target_dir)?;
    let workspace = names.target_dir.as_path();

    if config.create_tarball {
        archive::bundle_application(config, names, workspace)?;
    }

    script::write_preflight(config, names, workspace)?;
    recipe::write_makefile(config, names, workspace)?;

    if config.make_dmg {
        make_target(workspace, "dmg")?;
    }
    if config.make_pkg {
        make_target(workspace, "pkg")?;
    }

    Ok(())
}

/// Invoke a Luggage build target against the generated Makefile.
///
/// Runs with inherited stdio: Luggage output streams to the terminal and
/// sudo can prompt for a password.
fn make_target(workspace: &Path, target: &str) -> Result<()> {
    println!("Running make {} in {}", target, workspace.display());
    Cmd::new("sudo")
        .args(["make", target])
        .dir(workspace)
        .error_msg(format!("make {} failed", target))
        .run_interactive()?;
    Ok(())
}
