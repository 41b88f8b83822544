//! External build invocation
//!
//! Wraps the project's Gradle wrapper. Every derived value reaches the
//! external build as a `-P` project property or a child-process
//! environment variable; this layer never inspects what the external
//! build does with them.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info, warn};

use frombones_build_core::error::{BuildError, Result};

/// One external Gradle invocation, fully parameterized.
#[derive(Debug, Clone, Default)]
pub struct GradleInvocation {
    /// Task to run, e.g. `:app:assembleGlRelease`.
    pub task: String,
    /// `-P` project properties, in injection order.
    pub properties: Vec<(String, String)>,
    /// Extra environment for the child process.
    pub env: Vec<(String, String)>,
}

impl GradleInvocation {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            ..Default::default()
        }
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    pub fn env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Command-line arguments for the wrapper.
    fn args(&self) -> Vec<String> {
        let mut args = vec![self.task.clone()];
        for (key, value) in &self.properties {
            args.push(format!("-P{}={}", key, value));
        }
        args
    }
}

/// Runs tasks through the project's Gradle wrapper.
pub struct GradleInvoker {
    project_dir: PathBuf,
}

impl GradleInvoker {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    fn gradlew_path(&self) -> PathBuf {
        let wrapper_name = if cfg!(windows) { "gradlew.bat" } else { "gradlew" };
        self.project_dir.join(wrapper_name)
    }

    pub fn has_gradle_wrapper(&self) -> bool {
        self.gradlew_path().exists()
    }

    /// Run one task with the given parameters.
    pub async fn run(&self, invocation: &GradleInvocation) -> Result<()> {
        if !self.has_gradle_wrapper() {
            return Err(BuildError::External(format!(
                "Gradle wrapper not found in {}",
                self.project_dir.display()
            )));
        }

        let args = invocation.args();
        debug!("Running: gradlew {:?}", args);

        let mut cmd = Command::new(self.gradlew_path());
        cmd.current_dir(&self.project_dir);
        cmd.args(&args);
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }

        let output = cmd.output().await?;

        if !output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BuildError::External(format!("{}\n{}", stdout, stderr)));
        }

        info!("Gradle task {} completed", invocation.task);
        Ok(())
    }

    /// Run the standard clean task. A missing wrapper or a failing task
    /// is logged and tolerated; the caller still removes the staging
    /// directory afterwards.
    pub async fn clean(&self) -> Result<()> {
        if !self.has_gradle_wrapper() {
            warn!("Gradle wrapper not found, skipping clean task");
            return Ok(());
        }

        info!("Cleaning external build...");
        let output = Command::new(self.gradlew_path())
            .current_dir(&self.project_dir)
            .arg("clean")
            .output()
            .await?;

        if !output.status.success() {
            warn!("Gradle clean failed, but continuing...");
        }

        Ok(())
    }
}

/// Remove the native-build staging directory. An already-absent directory
/// is a no-op, not an error.
pub async fn remove_staging_dir(staging: &Path) -> Result<()> {
    match tokio::fs::remove_dir_all(staging).await {
        Ok(()) => {
            info!("Removed staging directory {:?}", staging);
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("Staging directory {:?} already absent", staging);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
