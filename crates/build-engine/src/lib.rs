//! FromBones build engine
//!
//! Derives the packaging metadata the external Android build needs:
//! the version read from the engine's CMake manifest, the signing
//! identity, and the per-variant native-build arguments; and wraps the
//! external Gradle invocation they are injected into.

pub mod gradle;
pub mod signing;
pub mod variant;
pub mod version;

pub use gradle::{remove_staging_dir, GradleInvocation, GradleInvoker};
pub use signing::{resolve_signing, CredentialSource, SigningIdentity};
pub use variant::{
    resolve_variant, AbiTarget, BuildType, GraphicsFlavor, VariantSettings,
};
pub use version::{read_version, SemVer, VersionDecl};
