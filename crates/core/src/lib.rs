//! FromBones build core - shared types
//!
//! Error taxonomy, the environment snapshot, and the project
//! configuration layer shared by the build engine and the CLI.

pub mod config;
pub mod env;
pub mod error;

pub use config::ProjectConfig;
pub use env::EnvSnapshot;
pub use error::{BuildError, Result};

/// Build-layer version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
