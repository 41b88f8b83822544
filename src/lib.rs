//! FromBones Android build layer
//!
//! A thin configuration layer over the external native-build and
//! packaging toolchain. It derives the values the packaging pipeline
//! must not get wrong (version code/name, signing identity, native-build
//! arguments, ABI splits) from their external sources of truth and
//! injects them into the external invocation.
//!
//! Organized as a small workspace:
//!
//! - `frombones-build-core`: error taxonomy, environment snapshot,
//!   project configuration
//! - `frombones-build-engine`: version derivation, credential
//!   resolution, variant assembly, external Gradle invocation

pub mod commands;

// Re-export member crates for library usage
pub use frombones_build_core as core;
pub use frombones_build_engine as engine;
