//! app2luggage - wrap a macOS application bundle into a tar.bz2 and generate
//! a Luggage-compatible Makefile, plus an optional installer preflight script.
#![allow(dead_code)]

mod archive;
mod config;
mod error;
mod files;
mod pipeline;
mod preflight;
mod process;
mod recipe;
mod script;
mod workspace;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};

use config::{Config, Names, RawArgs};

#[derive(Parser)]
#[command(name = "app2luggage")]
#[command(version)]
#[command(about = "Wrap an Application into a tar.bz2 and spew out a Luggage-compatible Makefile")]
struct Cli {
    /// Application to package
    #[arg(long, value_name = "PATH")]
    application: PathBuf,

    /// Create tarball for app
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set,
          num_args = 0..=1, default_missing_value = "true")]
    create_tarball: bool,

    /// Set debug level
    #[arg(long, value_name = "LEVEL", default_value_t = 0)]
    debug: u32,

    /// Directory to put Makefile, tarball & dmg into
    #[arg(long, value_name = "DIR")]
    directory_name: Option<String>,

    /// Path to luggage.make
    #[arg(long, value_name = "PATH",
          help = "Path to luggage.make [default: /usr/local/share/luggage/luggage.make]")]
    luggage_path: Option<PathBuf>,

    /// Create dmg after creating subdir
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set,
          num_args = 0..=1, default_missing_value = "true")]
    make_dmg: bool,

    /// Create pkg file after creating subdir
    #[arg(long, action = ArgAction::SetTrue)]
    make_pkg: bool,

    /// Package id (no spaces!)
    #[arg(long, value_name = "ID")]
    package_id: String,

    /// Package version (numeric!)
    #[arg(long, value_name = "N")]
    package_version: Option<u32>,

    /// Remove the previous version of the application prior to installation
    #[arg(long, action = ArgAction::SetTrue)]
    remove_existing_version: bool,

    /// Only install if no previous version of the application is found in
    /// the target volume's /Applications directory
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "remove_existing_version")]
    no_overwrite: bool,

    /// Your domain in reverse format, eg com.example.corp
    #[arg(long, value_name = "DOMAIN")]
    reverse_domain: String,
}

fn main() {
    // Load .env if present, so LUGGAGE_PATH can supply the include default.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{err:#}");
        std::process::exit(error::exit_code(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::resolve(RawArgs {
        application: cli.application,
        create_tarball: cli.create_tarball,
        debug: cli.debug,
        directory_name: cli.directory_name,
        luggage_path: cli.luggage_path,
        make_dmg: cli.make_dmg,
        make_pkg: cli.make_pkg,
        package_id: cli.package_id,
        package_version: cli.package_version,
        remove_existing_version: cli.remove_existing_version,
        no_overwrite: cli.no_overwrite,
        reverse_domain: cli.reverse_domain,
    })?;

    let names = Names::derive(&config);
    if config.debug >= 1 {
        config.print();
        names.print();
    }

    pipeline::run(&config, &names)
}
