//! Signing credential resolution
//!
//! Release artifacts are signed with a four-field credential set that
//! comes atomically from exactly one source: the process environment
//! (when `KEYSTORE_FILE` is set) or a `keystore.properties` file at the
//! project root. The sources form an explicit ordered list; the first
//! applicable one must supply every field, and a missing field is a
//! local error, never a value passed through to the signing stage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use frombones_build_core::env::{self, EnvSnapshot};
use frombones_build_core::error::{BuildError, Result};

/// Credential file looked up at the project root.
pub const PROPERTIES_NAME: &str = "keystore.properties";

const PROP_KEY_ALIAS: &str = "keyAlias";
const PROP_KEY_PASSWORD: &str = "keyPassword";
const PROP_STORE_FILE: &str = "storeFile";
const PROP_STORE_PASSWORD: &str = "storePassword";

/// Credential set required to sign a release artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningIdentity {
    pub key_alias: String,
    pub key_password: String,
    pub store_file: PathBuf,
    pub store_password: String,
}

/// A named credential source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// `KEYSTORE_FILE` / `KEY_ALIAS` / `KEY_PASSWORD` / `KEYSTORE_PASSWORD`.
    Environment,
    /// `keystore.properties` at the project root.
    PropertiesFile,
}

impl CredentialSource {
    /// Resolution order: environment first, then the properties file.
    pub const ORDER: [CredentialSource; 2] =
        [CredentialSource::Environment, CredentialSource::PropertiesFile];

    pub fn name(self) -> &'static str {
        match self {
            CredentialSource::Environment => "environment",
            CredentialSource::PropertiesFile => PROPERTIES_NAME,
        }
    }

    /// Resolve this source: `None` when the source is not applicable, an
    /// error when it is applicable but incomplete.
    async fn resolve(
        self,
        env: &EnvSnapshot,
        project_root: &Path,
    ) -> Result<Option<SigningIdentity>> {
        match self {
            CredentialSource::Environment => resolve_from_env(env),
            CredentialSource::PropertiesFile => resolve_from_properties(project_root).await,
        }
    }
}

/// Resolve the signing identity from the first applicable source.
///
/// With `KEYSTORE_FILE` set, the properties file is never read, even when
/// it exists; incomplete environment credentials fail right here instead
/// of falling through.
pub async fn resolve_signing(
    env: &EnvSnapshot,
    project_root: &Path,
) -> Result<SigningIdentity> {
    for source in CredentialSource::ORDER {
        if let Some(identity) = source.resolve(env, project_root).await? {
            info!("Signing credentials resolved from {}", source.name());
            return Ok(identity);
        }
    }

    Err(BuildError::MissingCredential(format!(
        "no signing credentials: set {} or provide {}",
        env::KEYSTORE_FILE,
        PROPERTIES_NAME
    )))
}

fn resolve_from_env(env: &EnvSnapshot) -> Result<Option<SigningIdentity>> {
    let Some(store_file) = env.get(env::KEYSTORE_FILE) else {
        return Ok(None);
    };

    let require = |name: &str| -> Result<String> {
        env.get(name).map(str::to_string).ok_or_else(|| {
            BuildError::MissingCredential(format!(
                "{} is not set (required when {} is set)",
                name,
                env::KEYSTORE_FILE
            ))
        })
    };

    Ok(Some(SigningIdentity {
        key_alias: require(env::KEY_ALIAS)?,
        key_password: require(env::KEY_PASSWORD)?,
        store_file: PathBuf::from(store_file),
        store_password: require(env::KEYSTORE_PASSWORD)?,
    }))
}

async fn resolve_from_properties(project_root: &Path) -> Result<Option<SigningIdentity>> {
    let path = project_root.join(PROPERTIES_NAME);
    if !path.exists() {
        return Ok(None);
    }

    let props = load_keystore_properties(&path).await?;
    let require = |key: &str| -> Result<String> {
        props.get(key).cloned().ok_or_else(|| {
            BuildError::MissingCredential(format!(
                "{} missing from {}",
                key,
                absolute(&path).display()
            ))
        })
    };

    let store_file = PathBuf::from(require(PROP_STORE_FILE)?);
    let store_file = if store_file.is_relative() {
        project_root.join(store_file)
    } else {
        store_file
    };

    Ok(Some(SigningIdentity {
        key_alias: require(PROP_KEY_ALIAS)?,
        key_password: require(PROP_KEY_PASSWORD)?,
        store_file,
        store_password: require(PROP_STORE_PASSWORD)?,
    }))
}

/// Read and parse a properties file.
pub async fn load_keystore_properties(path: &Path) -> Result<HashMap<String, String>> {
    let text = tokio::fs::read_to_string(path).await?;
    parse_properties(path, &text)
}

/// Parse `key=value` lines.
///
/// Blank lines and lines whose first non-whitespace character is `#` are
/// skipped. Every remaining line must contain exactly one `=`; anything
/// else aborts the whole parse. Keys and values are trimmed, duplicate
/// keys are overwritten by the last occurrence.
pub fn parse_properties(path: &Path, text: &str) -> Result<HashMap<String, String>> {
    let mut props = HashMap::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (key, value) = match (line.matches('=').count(), line.split_once('=')) {
            (1, Some(pair)) => pair,
            _ => {
                return Err(BuildError::Format(format!(
                    "line {} of {} must contain exactly one '=': {:?}",
                    idx + 1,
                    absolute(path).display(),
                    line
                )))
            }
        };

        props.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(props)
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_env() -> EnvSnapshot {
        EnvSnapshot::from_vars([
            (env::KEYSTORE_FILE, "/keys/release.jks"),
            (env::KEY_ALIAS, "frombones"),
            (env::KEY_PASSWORD, "key-pass"),
            (env::KEYSTORE_PASSWORD, "store-pass"),
        ])
    }

    fn write_properties(dir: &Path, contents: &str) {
        std::fs::write(dir.join(PROPERTIES_NAME), contents).unwrap();
    }

    const COMPLETE_PROPERTIES: &str = "\
# release signing
keyAlias=frombones
keyPassword = key-pass
storeFile=keys/release.jks
storePassword=store-pass
";

    #[test]
    fn parses_trimmed_pairs_and_skips_comments() {
        let text = "# comment\n\na=1\nb = 2\n";
        let props = parse_properties(Path::new("keystore.properties"), text).unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props["a"], "1");
        assert_eq!(props["b"], "2");
    }

    #[test]
    fn line_with_two_delimiters_aborts_parse() {
        let err = parse_properties(Path::new("keystore.properties"), "a=1\nc=1=2\n")
            .unwrap_err();
        assert!(matches!(err, BuildError::Format(_)));
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn line_without_delimiter_aborts_parse() {
        let err =
            parse_properties(Path::new("keystore.properties"), "keyAlias\n").unwrap_err();
        assert!(matches!(err, BuildError::Format(_)));
    }

    #[test]
    fn duplicate_keys_last_occurrence_wins() {
        let props =
            parse_properties(Path::new("keystore.properties"), "a=1\na=2\n").unwrap();
        assert_eq!(props["a"], "2");
    }

    #[tokio::test]
    async fn environment_source_wins_over_properties_file() {
        let dir = tempfile::tempdir().unwrap();
        write_properties(dir.path(), COMPLETE_PROPERTIES);

        let identity = resolve_signing(&complete_env(), dir.path()).await.unwrap();
        assert_eq!(identity.key_alias, "frombones");
        assert_eq!(identity.store_file, PathBuf::from("/keys/release.jks"));
    }

    #[tokio::test]
    async fn incomplete_environment_never_falls_through_to_file() {
        let dir = tempfile::tempdir().unwrap();
        write_properties(dir.path(), COMPLETE_PROPERTIES);

        // KEYSTORE_FILE selects the environment source; the complete
        // properties file on disk must not be consulted.
        let env = EnvSnapshot::from_vars([(env::KEYSTORE_FILE, "/keys/release.jks")]);
        let err = resolve_signing(&env, dir.path()).await.unwrap_err();
        assert!(matches!(err, BuildError::MissingCredential(_)));
        assert!(err.to_string().contains(env::KEY_ALIAS));
    }

    #[tokio::test]
    async fn properties_file_source_resolves_relative_store_path() {
        let dir = tempfile::tempdir().unwrap();
        write_properties(dir.path(), COMPLETE_PROPERTIES);

        let identity = resolve_signing(&EnvSnapshot::default(), dir.path())
            .await
            .unwrap();
        assert_eq!(identity.key_alias, "frombones");
        assert_eq!(identity.key_password, "key-pass");
        assert_eq!(identity.store_file, dir.path().join("keys/release.jks"));
    }

    #[tokio::test]
    async fn missing_property_key_is_named() {
        let dir = tempfile::tempdir().unwrap();
        write_properties(dir.path(), "keyAlias=frombones\n");

        let err = resolve_signing(&EnvSnapshot::default(), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingCredential(_)));
        assert!(err.to_string().contains("storeFile"));
    }

    #[tokio::test]
    async fn no_applicable_source_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_signing(&EnvSnapshot::default(), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingCredential(_)));
    }
}
