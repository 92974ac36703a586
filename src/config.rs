//! Configuration resolution and name derivation.
//!
//! The raw flag set is validated once into an immutable [`Config`], and the
//! naming conventions every later stage uses are derived once into [`Names`].
//! Nothing here writes to the filesystem.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::error::PackageError;

/// Default location of the Luggage include file.
pub const DEFAULT_LUGGAGE_PATH: &str = "/usr/local/share/luggage/luggage.make";

/// Raw flag values as parsed from the command line.
#[derive(Debug, Clone)]
pub struct RawArgs {
    pub application: PathBuf,
    pub create_tarball: bool,
    pub debug: u32,
    pub directory_name: Option<String>,
    /// None means "not explicitly supplied": the default (or `LUGGAGE_PATH`
    /// from the environment) is used without an existence check.
    pub luggage_path: Option<PathBuf>,
    pub make_dmg: bool,
    pub make_pkg: bool,
    pub package_id: String,
    pub package_version: Option<u32>,
    pub remove_existing_version: bool,
    pub no_overwrite: bool,
    pub reverse_domain: String,
}

/// Validated configuration, immutable for the rest of the run.
#[derive(Debug, Clone)]
pub struct Config {
    pub application: PathBuf,
    pub create_tarball: bool,
    pub debug: u32,
    pub directory_name: Option<String>,
    pub luggage_path: PathBuf,
    pub make_dmg: bool,
    pub make_pkg: bool,
    /// Normalized: spaces replaced with underscores.
    pub package_id: String,
    pub package_version: Option<u32>,
    pub remove_existing_version: bool,
    pub no_overwrite: bool,
    pub reverse_domain: String,
}

impl Config {
    /// Validate the raw flag set.
    ///
    /// Rules, in order, each a distinct error:
    /// - `--application` must exist on disk
    /// - `--luggage-path`, if explicitly supplied, must exist on disk
    /// - `--remove-existing-version` and `--no-overwrite` must not both be set
    ///
    /// Presence of the required flags is enforced by the CLI parser before
    /// this runs.
    pub fn resolve(args: RawArgs) -> Result<Self, PackageError> {
        if !args.application.exists() {
            return Err(PackageError::ApplicationNotFound(args.application));
        }

        let luggage_path = match args.luggage_path {
            Some(path) => {
                if !path.exists() {
                    return Err(PackageError::LuggagePathNotFound(path));
                }
                path
            }
            // The default is not verified here; the tool may be used only to
            // generate the tarball and scripts on a machine without Luggage.
            None => std::env::var("LUGGAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_LUGGAGE_PATH)),
        };

        if args.remove_existing_version && args.no_overwrite {
            return Err(PackageError::ConflictingGuards);
        }

        Ok(Config {
            application: args.application,
            create_tarball: args.create_tarball,
            debug: args.debug,
            directory_name: args.directory_name,
            luggage_path,
            make_dmg: args.make_dmg,
            make_pkg: args.make_pkg,
            package_id: clean_name(&args.package_id),
            package_version: args.package_version,
            remove_existing_version: args.remove_existing_version,
            no_overwrite: args.no_overwrite,
            reverse_domain: args.reverse_domain,
        })
    }

    /// Print configuration for debugging (`--debug 1` and up).
    pub fn print(&self) {
        println!("Configuration:");
        println!("  application: {}", self.application.display());
        println!("  create_tarball: {}", self.create_tarball);
        println!("  directory_name: {:?}", self.directory_name);
        println!("  luggage_path: {}", self.luggage_path.display());
        println!("  make_dmg: {}  make_pkg: {}", self.make_dmg, self.make_pkg);
        println!("  package_id: {}", self.package_id);
        println!("  package_version: {:?}", self.package_version);
        println!(
            "  remove_existing_version: {}  no_overwrite: {}",
            self.remove_existing_version, self.no_overwrite
        );
        println!("  reverse_domain: {}", self.reverse_domain);
    }
}

/// Names derived once from the configuration, read-only afterward.
#[derive(Debug, Clone)]
pub struct Names {
    /// Current UTC date, `YYYY-MM-DD`.
    pub build_date: String,
    /// Basename of the application with spaces normalized to underscores.
    /// Used in filenames and make target names, where spaces are toxic.
    pub app_name: String,
    /// Basename of the application, unnormalized: the literal name as it
    /// will appear inside /Applications.
    pub installed_app: String,
    /// `{app_name}.{build_date}.tar.bz2`
    pub tarball_name: String,
    /// Workspace directory everything is written into.
    pub target_dir: PathBuf,
}

impl Names {
    /// Derive names from the configuration using today's UTC date.
    pub fn derive(config: &Config) -> Self {
        Self::derive_with_date(config, &Utc::now().format("%Y-%m-%d").to_string())
    }

    /// Derive names with an explicit build date.
    pub fn derive_with_date(config: &Config, build_date: &str) -> Self {
        let installed_app = basename(&config.application);
        let app_name = clean_name(&installed_app);
        let tarball_name = format!("{}.{}.tar.bz2", app_name, build_date);
        let target_dir = match &config.directory_name {
            Some(dir) => PathBuf::from(dir),
            None => PathBuf::from(&config.package_id),
        };

        Names {
            build_date: build_date.to_string(),
            app_name,
            installed_app,
            tarball_name,
            target_dir,
        }
    }

    /// Print derived names for debugging (`--debug 1` and up).
    pub fn print(&self) {
        println!("Derived names:");
        println!("  build_date: {}", self.build_date);
        println!("  app_name: {}", self.app_name);
        println!("  installed_app: {}", self.installed_app);
        println!("  tarball_name: {}", self.tarball_name);
        println!("  target_dir: {}", self.target_dir.display());
    }
}

/// Get rid of toxic spaces.
pub fn clean_name(name: &str) -> String {
    name.replace(' ', "_")
}

/// Final component of a path as a string.
fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
