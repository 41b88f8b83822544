//! Error types for the FromBones build layer
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for build configuration and orchestration.
///
/// Every variant is fatal at this layer; there is no retry and no
/// partial degradation.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Manifest file missing, or no version declaration found in it.
    #[error("configuration error: {0}")]
    Config(String),

    /// A properties-file line does not split into exactly one key and one value.
    #[error("format error: {0}")]
    Format(String),

    /// A required credential field resolved to absent.
    #[error("missing credential: {0}")]
    MissingCredential(String),

    /// The external build/packaging invocation exited non-zero.
    #[error("external build failed: {0}")]
    External(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for build-layer operations
pub type Result<T> = std::result::Result<T, BuildError>;
