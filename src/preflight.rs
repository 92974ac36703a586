//! Host tool checks.
//!
//! Verifies the external tools the selected pipeline steps will shell out to
//! before any filesystem work starts. Which tools are required depends on the
//! configuration: tar and bzip2 only matter when a tarball is being created,
//! make and sudo only when a dmg or pkg build was requested.

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::error::PackageError;

/// Apple's tar. Hardcoded rather than resolved from PATH: it preserves
/// resource forks / extended attributes, and a substitute tar can corrupt
/// bundled binaries that stash compressed data there.
pub const TAR_BIN: &str = "/usr/bin/tar";

/// Result of a single host tool check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub tool: String,
    pub found: Option<String>,
    pub hint: String,
}

impl CheckResult {
    fn pass(tool: &str, path: String) -> Self {
        Self {
            tool: tool.to_string(),
            found: Some(path),
            hint: String::new(),
        }
    }

    fn fail(tool: &str, hint: &str) -> Self {
        Self {
            tool: tool.to_string(),
            found: None,
            hint: hint.to_string(),
        }
    }

    pub fn passed(&self) -> bool {
        self.found.is_some()
    }
}

/// Check the tools this run's configuration needs.
pub fn check_host_tools(config: &Config) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if config.create_tarball {
        if Path::new(TAR_BIN).exists() {
            results.push(CheckResult::pass("tar", TAR_BIN.to_string()));
        } else {
            results.push(CheckResult::fail(
                "tar",
                &format!("{} not found. Required to archive the application bundle.", TAR_BIN),
            ));
        }
        results.push(check_in_path(
            "bzip2",
            "Required to compress the application tarball.",
        ));
    }

    if config.make_dmg || config.make_pkg {
        results.push(check_in_path(
            "make",
            "Required to run the generated Luggage Makefile.",
        ));
        results.push(check_in_path(
            "sudo",
            "Required: Luggage builds run privileged.",
        ));
    }

    results
}

/// Check the host tools and fail with the missing-dependency status if any
/// required tool is absent.
pub fn require_host_tools(config: &Config) -> Result<()> {
    let results = check_host_tools(config);

    for check in &results {
        match &check.found {
            Some(path) => {
                if config.debug >= 1 {
                    println!("  [PASS] {}: {}", check.tool, path);
                }
            }
            None => eprintln!("  [FAIL] {}: {}", check.tool, check.hint),
        }
    }

    if let Some(missing) = results.iter().find(|c| !c.passed()) {
        return Err(PackageError::MissingTool {
            tool: missing.tool.clone(),
            hint: missing.hint.clone(),
        }
        .into());
    }
    Ok(())
}

fn check_in_path(tool: &str, purpose: &str) -> CheckResult {
    match which::which(tool) {
        Ok(path) => CheckResult::pass(tool, path.to_string_lossy().into_owned()),
        Err(_) => CheckResult::fail(tool, &format!("Not found in PATH. {}", purpose)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, RawArgs};
    use std::fs;
    use tempfile::TempDir;

    fn config(create_tarball: bool, make_dmg: bool) -> (TempDir, Config) {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("Foo.app");
        fs::create_dir(&app).unwrap();

        let config = Config::resolve(RawArgs {
            application: app,
            create_tarball,
            debug: 0,
            directory_name: None,
            luggage_path: None,
            make_dmg,
            make_pkg: false,
            package_id: "com.example.foo".to_string(),
            package_version: None,
            remove_existing_version: false,
            no_overwrite: false,
            reverse_domain: "com.example".to_string(),
        })
        .unwrap();
        (temp, config)
    }

    #[test]
    fn test_no_tools_needed_when_everything_disabled() {
        let (_temp, config) = config(false, false);
        assert!(check_host_tools(&config).is_empty());
        require_host_tools(&config).unwrap();
    }

    #[test]
    fn test_tarball_checks_tar_and_bzip2() {
        let (_temp, config) = config(true, false);
        let tools: Vec<_> = check_host_tools(&config)
            .into_iter()
            .map(|c| c.tool)
            .collect();
        assert_eq!(tools, ["tar", "bzip2"]);
    }

    #[test]
    fn test_dmg_checks_make_and_sudo() {
        let (_temp, config) = config(false, true);
        let tools: Vec<_> = check_host_tools(&config)
            .into_iter()
            .map(|c| c.tool)
            .collect();
        assert_eq!(tools, ["make", "sudo"]);
    }

    #[test]
    fn test_missing_tool_maps_to_exit_1() {
        let err: anyhow::Error = PackageError::MissingTool {
            tool: "bzip2".into(),
            hint: "Not found in PATH.".into(),
        }
        .into();
        assert_eq!(crate::error::exit_code(&err), 1);
    }
}
