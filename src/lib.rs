//! app2luggage library exports.
//!
//! The binary in `main.rs` is a thin flag-parsing layer over these modules;
//! they are exported so the integration tests can drive the pipeline stages
//! directly.

pub mod archive;
pub mod config;
pub mod error;
pub mod files;
pub mod pipeline;
pub mod preflight;
pub mod process;
pub mod recipe;
pub mod script;
pub mod workspace;
