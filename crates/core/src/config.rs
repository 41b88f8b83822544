//! Project configuration
//!
//! Static identity of the packaged application plus the toolchain pins the
//! packaging pipeline needs. Values can be overridden from an optional
//! `frombones-build.toml` at the project root; otherwise the defaults
//! below apply.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;

/// Name of the optional configuration file at the project root.
pub const CONFIG_FILE: &str = "frombones-build.toml";

/// Project-level build configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Installable package identifier.
    pub application_id: String,
    /// Application module directory, relative to the project root.
    pub module: String,
    /// Directory holding the engine's CMakeLists.txt, relative to the
    /// project root.
    pub engine_dir: PathBuf,
    /// Release channel suffix appended to the version name.
    pub channel: String,
    /// Native build target handed to the external build system.
    pub native_target: String,
    /// Minimum supported SDK level.
    pub min_sdk: u32,
    /// SDK level the app targets.
    pub target_sdk: u32,
    /// SDK level the app compiles against.
    pub compile_sdk: u32,
    /// Side-by-side NDK version pin.
    pub ndk_version: String,
    /// CMake version pin.
    pub cmake_version: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            application_id: "com.okkomastudio.frombones".to_string(),
            module: "app".to_string(),
            engine_dir: PathBuf::from("."),
            channel: "demo".to_string(),
            native_target: "FromBones".to_string(),
            min_sdk: 21,
            target_sdk: 35,
            compile_sdk: 33,
            ndk_version: "27.2.12479018".to_string(),
            cmake_version: "3.22.1".to_string(),
        }
    }
}

impl ProjectConfig {
    /// Load the configuration for a project, falling back to defaults
    /// when no config file is present.
    pub async fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE);

        if path.exists() {
            debug!("Loading project config from {:?}", path);
            let contents = tokio::fs::read_to_string(&path).await?;
            let config: ProjectConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            info!("No {} found, using defaults", CONFIG_FILE);
            Ok(Self::default())
        }
    }

    /// Directory the version manifest is read from.
    pub fn engine_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.engine_dir)
    }

    /// Application module directory.
    pub fn module_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.module)
    }

    /// Native-build staging directory inside the module.
    pub fn staging_dir(&self, project_root: &Path) -> PathBuf {
        self.module_dir(project_root).join(".cxx")
    }
}
