//! Environment snapshot
//!
//! The build layer reads a handful of environment variables (signing
//! credentials, the optional ccache override). They are captured once at
//! process start into an immutable snapshot that the resolvers receive
//! as input; nothing below the entry points reads the process
//! environment directly.

use std::collections::HashMap;

/// Keystore file path; presence switches the credential source to the
/// environment.
pub const KEYSTORE_FILE: &str = "KEYSTORE_FILE";
/// Key alias, read only when [`KEYSTORE_FILE`] is set.
pub const KEY_ALIAS: &str = "KEY_ALIAS";
/// Key password, read only when [`KEYSTORE_FILE`] is set.
pub const KEY_PASSWORD: &str = "KEY_PASSWORD";
/// Keystore password, read only when [`KEYSTORE_FILE`] is set.
pub const KEYSTORE_PASSWORD: &str = "KEYSTORE_PASSWORD";
/// Native-build cache directory override, passed through unvalidated.
pub const ANDROID_CCACHE: &str = "ANDROID_CCACHE";

const RECOGNIZED: &[&str] = &[
    KEYSTORE_FILE,
    KEY_ALIAS,
    KEY_PASSWORD,
    KEYSTORE_PASSWORD,
    ANDROID_CCACHE,
];

/// Immutable snapshot of the recognized environment variables.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the recognized variables from the process environment.
    pub fn capture() -> Self {
        Self::from_vars(
            std::env::vars().filter(|(k, _)| RECOGNIZED.contains(&k.as_str())),
        )
    }

    /// Build a snapshot from explicit key/value pairs.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable. Unset and set-but-empty are both reported as
    /// absent; an empty credential is as unusable as a missing one.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Whether a variable is present with a non-empty value.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
