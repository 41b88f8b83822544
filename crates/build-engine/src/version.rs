//! Version derivation
//!
//! The packaged version is not declared anywhere in this repository: the
//! single source of truth is the `project(... VERSION x.y.z)` declaration
//! in the engine's CMakeLists.txt. This module locates that declaration,
//! parses it into a structured result, and encodes it into the integer
//! ordering key the packaging toolchain requires.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use frombones_build_core::error::{BuildError, Result};

/// Manifest file the version declaration is read from.
pub const MANIFEST_NAME: &str = "CMakeLists.txt";

/// A `project()` declaration carrying a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDecl {
    /// Declared project name.
    pub project: String,
    /// Version literal, exactly as written in the manifest.
    pub version: String,
}

/// Three-part semantic version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemVer {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl SemVer {
    /// Parse a version literal leniently: split on `.`, any missing or
    /// non-numeric component defaults to 0.
    pub fn parse(text: &str) -> Self {
        let parts: Vec<&str> = text.split('.').collect();
        let part = |i: usize| -> u32 {
            parts
                .get(i)
                .and_then(|p| p.trim().parse().ok())
                .unwrap_or(0)
        };
        Self {
            major: part(0),
            minor: part(1),
            patch: part(2),
        }
    }

    /// Integer ordering key: `major*100 + minor*10 + patch`.
    ///
    /// Ordering is monotonic only while minor and patch stay within
    /// [0, 9]; the versioning scheme is constrained to single digits
    /// there, and the encoding must not be widened without renumbering
    /// every shipped release.
    pub fn version_code(self) -> u32 {
        self.major * 100 + self.minor * 10 + self.patch
    }

    /// Display string for the given release channel,
    /// `"<major>.<minor>.<patch>-<channel>"`.
    pub fn version_name(self, channel: &str) -> String {
        format!("{self}-{channel}")
    }
}

impl fmt::Display for SemVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Locate and parse the version declaration under `engine_dir`.
///
/// Fails with a configuration error naming the absolute path when the
/// manifest is missing or carries no version declaration; there is no
/// fallback version.
pub async fn read_version(engine_dir: &Path) -> Result<VersionDecl> {
    let manifest = engine_dir.join(MANIFEST_NAME);
    if !manifest.exists() {
        return Err(BuildError::Config(format!(
            "{} not found",
            absolute(&manifest).display()
        )));
    }

    let content = tokio::fs::read_to_string(&manifest).await?;
    let decl = parse_manifest(&content).ok_or_else(|| {
        BuildError::Config(format!(
            "no version declaration in {}",
            absolute(&manifest).display()
        ))
    })?;

    debug!(
        "Found version {} for project {} in {:?}",
        decl.version, decl.project, manifest
    );
    Ok(decl)
}

/// Scan manifest text line by line for the first well-formed
/// `project(<name> ... VERSION <digits[.digits[.digits]]> ...)`
/// declaration.
pub fn parse_manifest(content: &str) -> Option<VersionDecl> {
    content.lines().find_map(parse_declaration)
}

fn parse_declaration(line: &str) -> Option<VersionDecl> {
    let start = line.find("project")?;
    let rest = line[start + "project".len()..].trim_start();
    let rest = rest.strip_prefix('(')?;
    let args = &rest[..rest.find(')')?];

    let mut tokens = args.split_whitespace();
    let project = tokens.next()?.trim_matches('"').to_string();

    while let Some(token) = tokens.next() {
        if token == "VERSION" {
            let version = tokens.next()?;
            if is_version_literal(version) {
                return Some(VersionDecl {
                    project,
                    version: version.to_string(),
                });
            }
            return None;
        }
    }
    None
}

fn is_version_literal(text: &str) -> bool {
    !text.is_empty()
        && text.chars().any(|c| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || c == '.')
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_MANIFEST: &str = r#"
# Set CMake minimum version
cmake_minimum_required (VERSION 3.10.2)

# Set project name
project (FromBones VERSION 1.4.2)

# Set CMake modules search path
set (CMAKE_MODULE_PATH ${CMAKE_CURRENT_SOURCE_DIR}/cmake/Modules)
"#;

    #[test]
    fn finds_first_version_declaration() {
        let decl = parse_manifest(SAMPLE_MANIFEST).unwrap();
        assert_eq!(decl.project, "FromBones");
        assert_eq!(decl.version, "1.4.2");
    }

    #[test]
    fn surrounding_text_is_ignored() {
        let decl =
            parse_manifest("if (FOO)\nendif ()\nproject(Game VERSION 2.0 LANGUAGES CXX)\n")
                .unwrap();
        assert_eq!(decl.version, "2.0");
    }

    #[test]
    fn declaration_without_version_is_skipped() {
        assert_eq!(parse_manifest("project (FromBones)\n"), None);
        assert_eq!(parse_manifest("project (FromBones VERSION ${VER})\n"), None);
    }

    #[test]
    fn lenient_component_parsing() {
        assert_eq!(
            SemVer::parse("1.2.3"),
            SemVer {
                major: 1,
                minor: 2,
                patch: 3
            }
        );
        assert_eq!(SemVer::parse("2.0").patch, 0);
        assert_eq!(SemVer::parse("x.y.z").version_code(), 0);
    }

    #[test]
    fn version_code_encoding() {
        assert_eq!(SemVer::parse("1.2.3").version_code(), 123);
        assert_eq!(SemVer::parse("2.0").version_code(), 200);
        assert_eq!(SemVer::parse("0.0.0").version_code(), 0);
    }

    #[test]
    fn version_code_collides_past_single_digit_components() {
        // The known precision ceiling: multi-digit minor/patch break
        // monotonicity. Kept as-is; see DESIGN.md.
        assert_eq!(
            SemVer::parse("0.19.0").version_code(),
            SemVer::parse("1.9.0").version_code()
        );
    }

    #[test]
    fn version_name_formatting() {
        assert_eq!(SemVer::parse("1.4.2").version_name("demo"), "1.4.2-demo");
        assert_eq!(SemVer::parse("2.0").version_name("demo"), "2.0.0-demo");
    }

    #[tokio::test]
    async fn read_version_from_manifest_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_NAME), SAMPLE_MANIFEST).unwrap();

        let decl = read_version(dir.path()).await.unwrap();
        assert_eq!(decl.version, "1.4.2");
    }

    #[tokio::test]
    async fn missing_manifest_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_version(dir.path()).await.unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
        assert!(err.to_string().contains(MANIFEST_NAME));
    }

    #[tokio::test]
    async fn versionless_manifest_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_NAME), "project (FromBones)\n").unwrap();

        let err = read_version(dir.path()).await.unwrap_err();
        assert!(matches!(err, BuildError::Config(_)));
    }
}
