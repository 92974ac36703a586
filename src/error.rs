//! Error type carrying the process exit codes the CLI contract reserves.
//!
//! Exit codes: 0 success, 1 missing required tool, 2 validation/usage error
//! (clap uses 2 for its own failures, resolver failures match), 3 refusal to
//! overwrite a generated file, 4 external process or other runtime failure,
//! 5 target output directory already exists.

use std::path::PathBuf;

use thiserror::Error;

/// Fallback exit code for errors that carry no reserved code of their own
/// (external process failures, I/O).
pub const EXIT_RUNTIME: i32 = 4;

#[derive(Debug, Error)]
pub enum PackageError {
    /// `--application` points at a path that does not exist.
    #[error("--application {0}: path does not exist")]
    ApplicationNotFound(PathBuf),

    /// `--luggage-path` was explicitly supplied but does not exist.
    #[error("--luggage-path {0}: path does not exist")]
    LuggagePathNotFound(PathBuf),

    /// `--remove-existing-version` and `--no-overwrite` were both set.
    #[error("--remove-existing-version and --no-overwrite are incompatible with each other")]
    ConflictingGuards,

    /// A tool a selected pipeline step needs is not installed.
    #[error("missing required tool '{tool}': {hint}")]
    MissingTool { tool: String, hint: String },

    /// A generated output file is already present in the workspace.
    #[error("there's already a {0} here. Bailing out.")]
    RefusedOverwrite(&'static str),

    /// The target output directory exists from a previous run.
    #[error("{} already exists. Exiting so we don't step on your data", .0.display())]
    TargetDirExists(PathBuf),
}

impl PackageError {
    /// Exit status reserved for this error by the CLI contract.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackageError::ApplicationNotFound(_)
            | PackageError::LuggagePathNotFound(_)
            | PackageError::ConflictingGuards => 2,
            PackageError::MissingTool { .. } => 1,
            PackageError::RefusedOverwrite(_) => 3,
            PackageError::TargetDirExists(_) => 5,
        }
    }
}

/// Map any pipeline error to its process exit status.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PackageError>() {
        Some(e) => e.exit_code(),
        None => EXIT_RUNTIME,
    }
}
