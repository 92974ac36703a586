//! Preflight installer-script generation.
//!
//! Exactly one of three script variants is emitted, selected by the guard
//! flags. The script runs inside the installer framework before the payload
//! is installed; the target volume arrives as the script's third positional
//! parameter, not a value known at generation time.

use std::path::Path;

use anyhow::Result;

use crate::config::{Config, Names};
use crate::files;

/// Output filename, fixed by the Luggage `pack-script-preflight` target.
pub const PREFLIGHT_FILE: &str = "preflight";

/// The three preflight script variants, mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreflightScript {
    /// Delete any existing copy of the application before installing.
    RemoveExisting { installed_app: String },
    /// Halt the installer if the application is already present.
    NoOverwrite { installed_app: String },
    /// No preinstall checks.
    Noop,
}

impl PreflightScript {
    /// Select the variant for this configuration.
    pub fn select(config: &Config, names: &Names) -> Self {
        if config.remove_existing_version {
            PreflightScript::RemoveExisting {
                installed_app: names.installed_app.clone(),
            }
        } else if config.no_overwrite {
            PreflightScript::NoOverwrite {
                installed_app: names.installed_app.clone(),
            }
        } else {
            PreflightScript::Noop
        }
    }

    /// Render the script body.
    pub fn render(&self) -> String {
        match self {
            PreflightScript::RemoveExisting { installed_app } => {
                let app = escape_double_quoted(installed_app);
                format!(
                    "#!/usr/bin/env bash\n\
                     # Automatically generated preflight script. Removes any existing\n\
                     # copy of the application from the target volume before this\n\
                     # package is installed.\n\
                     if [ -e \"$3/Applications/{app}\" ] ; then\n\
                     \x20   rm -Rf \"$3/Applications/{app}\"\n\
                     \x20   exit ${{?}}\n\
                     fi\n\
                     exit 0\n"
                )
            }
            PreflightScript::NoOverwrite { installed_app } => {
                let app = escape_double_quoted(installed_app);
                // Any non-zero exit halts the installer; 1 is as good as the
                // historical negative literal.
                format!(
                    "#!/bin/bash\n\
                     # Automatically generated preflight script. Halts the installer\n\
                     # if the application is already present on the target volume.\n\
                     if [ -e \"$3/Applications/{app}\" ] ; then\n\
                     \x20   logger -s -i -t Installer \"Application \\\"{app}\\\" is already installed on system. This package will not overwrite the currently installed version.\"\n\
                     \x20   exit 1\n\
                     fi\n\
                     exit 0\n"
                )
            }
            PreflightScript::Noop => "#!/bin/bash\n\
                 # Automatically generated preflight script which does nothing\n\
                 # but return success.\n\
                 exit 0\n"
                .to_string(),
        }
    }
}

/// Write the selected preflight script into the workspace, mode 0755.
///
/// Refuses to overwrite an existing `preflight`.
pub fn write_preflight(config: &Config, names: &Names, workspace: &Path) -> Result<()> {
    let script = PreflightScript::select(config, names);
    files::write_new_mode(
        &workspace.join(PREFLIGHT_FILE),
        script.render(),
        0o755,
        "preflight script",
    )
}

/// Escape a name for embedding inside a double-quoted shell string.
///
/// Application names come from the filesystem and can carry any of the
/// characters the shell treats specially inside double quotes.
fn escape_double_quoted(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for ch in name.chars() {
        if matches!(ch, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, RawArgs};
    use crate::error;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use std::process::Command;
    use tempfile::TempDir;

    fn config(remove_existing: bool, no_overwrite: bool) -> (TempDir, Config, Names) {
        let temp = TempDir::new().unwrap();
        let app = temp.path().join("My App.app");
        fs::create_dir(&app).unwrap();

        let config = Config::resolve(RawArgs {
            application: app,
            create_tarball: false,
            debug: 0,
            directory_name: None,
            luggage_path: None,
            make_dmg: false,
            make_pkg: false,
            package_id: "com.example.myapp".to_string(),
            package_version: None,
            remove_existing_version: remove_existing,
            no_overwrite,
            reverse_domain: "com.example".to_string(),
        })
        .unwrap();
        let names = Names::derive_with_date(&config, "2026-08-30");
        (temp, config, names)
    }

    #[test]
    fn test_variant_selection() {
        let (_t, config, names) = config(true, false);
        assert!(matches!(
            PreflightScript::select(&config, &names),
            PreflightScript::RemoveExisting { .. }
        ));

        let (_t, config, names) = self::config(false, true);
        assert!(matches!(
            PreflightScript::select(&config, &names),
            PreflightScript::NoOverwrite { .. }
        ));

        let (_t, config, names) = self::config(false, false);
        assert_eq!(PreflightScript::select(&config, &names), PreflightScript::Noop);
    }

    #[test]
    fn test_remove_variant_body() {
        let script = PreflightScript::RemoveExisting {
            installed_app: "My App.app".to_string(),
        }
        .render();

        assert!(script.starts_with("#!"));
        assert!(script.contains("rm -Rf \"$3/Applications/My App.app\""));
        assert!(script.contains("exit ${?}"));
        assert!(script.ends_with("exit 0\n"));
    }

    #[test]
    fn test_no_overwrite_variant_halts() {
        let script = PreflightScript::NoOverwrite {
            installed_app: "Foo.app".to_string(),
        }
        .render();

        assert!(script.contains("logger -s -i -t Installer"));
        assert!(script.contains("exit 1"));
        assert!(!script.contains("rm -Rf"));
    }

    #[test]
    fn test_noop_variant_only_succeeds() {
        let script = PreflightScript::Noop.render();
        assert!(!script.contains("$3"));
        assert!(script.trim_end().ends_with("exit 0"));
    }

    #[test]
    fn test_shell_significant_names_are_escaped() {
        let script = PreflightScript::RemoveExisting {
            installed_app: r#"Bad "$Name`.app"#.to_string(),
        }
        .render();

        assert!(script.contains(r#"Bad \"\$Name\`.app"#));
        // The unescaped form must not appear anywhere.
        assert!(!script.contains(r#"/Applications/Bad "$Name"#));
    }

    #[test]
    fn test_write_preflight_is_executable_and_create_only() {
        let (temp, config, names) = config(false, false);
        let workspace = temp.path().join("ws");
        fs::create_dir(&workspace).unwrap();

        write_preflight(&config, &names, &workspace).unwrap();
        let path = workspace.join(PREFLIGHT_FILE);
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);

        let err = write_preflight(&config, &names, &workspace).unwrap_err();
        assert_eq!(error::exit_code(&err), 3);
    }

    /// Run the remove-existing script against a fake target volume the way
    /// the installer framework would: volume path as the third argument.
    #[test]
    fn test_remove_script_deletes_installed_app() {
        if which::which("bash").is_err() {
            eprintln!("bash not available; skipping");
            return;
        }

        let (temp, config, names) = config(true, false);
        let workspace = temp.path().join("ws");
        fs::create_dir(&workspace).unwrap();
        write_preflight(&config, &names, &workspace).unwrap();

        let volume = temp.path().join("volume");
        let installed = volume.join("Applications").join("My App.app");
        fs::create_dir_all(&installed).unwrap();
        fs::write(installed.join("stale"), "old version").unwrap();

        let status = Command::new("bash")
            .arg(workspace.join(PREFLIGHT_FILE))
            .args(["pkg-path", "default-location"])
            .arg(&volume)
            .status()
            .unwrap();

        assert!(status.success());
        assert!(!installed.exists());
    }

    /// The no-overwrite script must exit non-zero when the app is present
    /// and zero when it is not.
    #[test]
    fn test_no_overwrite_script_halt_semantics() {
        if which::which("bash").is_err() {
            eprintln!("bash not available; skipping");
            return;
        }

        let (temp, config, names) = config(false, true);
        let workspace = temp.path().join("ws");
        fs::create_dir(&workspace).unwrap();
        write_preflight(&config, &names, &workspace).unwrap();

        let volume = temp.path().join("volume");
        let installed = volume.join("Applications").join("My App.app");

        let run = |volume: &PathBuf| {
            Command::new("bash")
                .arg(workspace.join(PREFLIGHT_FILE))
                .args(["pkg-path", "default-location"])
                .arg(volume)
                .status()
                .unwrap()
        };

        fs::create_dir_all(&installed).unwrap();
        assert!(!run(&volume).success());
        // Still installed: the guard never deletes.
        assert!(installed.exists());

        fs::remove_dir_all(&installed).unwrap();
        assert!(run(&volume).success());
    }
}
