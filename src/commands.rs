//! CLI commands
//!
//! The orchestration entry points. Each command re-resolves everything it
//! needs from scratch; nothing is cached between invocations.

use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use frombones_build_core::env as env_vars;
use frombones_build_core::{EnvSnapshot, ProjectConfig};
use frombones_build_engine::{
    read_version, remove_staging_dir, resolve_signing, resolve_variant, BuildType,
    GradleInvocation, GradleInvoker, GraphicsFlavor, SemVer,
};

/// File the derived identity is written to inside the app module.
pub const VERSION_PROPERTIES: &str = "version.properties";

/// Derived package identity for one build.
struct ResolvedVersion {
    application_id: String,
    code: u32,
    name: String,
    version: SemVer,
}

async fn resolve_version(
    config: &ProjectConfig,
    project_root: &PathBuf,
) -> Result<ResolvedVersion> {
    let decl = read_version(&config.engine_dir(project_root)).await?;
    let version = SemVer::parse(&decl.version);
    Ok(ResolvedVersion {
        application_id: config.application_id.clone(),
        code: version.version_code(),
        name: version.version_name(&config.channel),
        version,
    })
}

/// Derive the version and write it into the app module for the packaging
/// toolchain to consume.
pub struct ApplyVersionCommand {
    pub project_root: PathBuf,
}

impl ApplyVersionCommand {
    pub async fn execute(&self) -> Result<()> {
        let config = ProjectConfig::load(&self.project_root).await?;
        let resolved = resolve_version(&config, &self.project_root).await?;

        let module_dir = config.module_dir(&self.project_root);
        tokio::fs::create_dir_all(&module_dir).await?;

        let path = module_dir.join(VERSION_PROPERTIES);
        let contents = format!(
            "# Generated by frombones-build from CMakeLists.txt\n\
             applicationId={}\n\
             versionCode={}\n\
             versionName={}\n",
            resolved.application_id, resolved.code, resolved.name
        );
        tokio::fs::write(&path, contents).await?;

        info!(
            "Applied version {} (code {}) to {:?}",
            resolved.name, resolved.code, path
        );
        Ok(())
    }
}

/// Derive the version and print the package identity.
pub struct ReportVersionCommand {
    pub project_root: PathBuf,
    pub json: bool,
}

impl ReportVersionCommand {
    pub async fn execute(&self) -> Result<()> {
        let config = ProjectConfig::load(&self.project_root).await?;
        let resolved = resolve_version(&config, &self.project_root).await?;

        if self.json {
            let report = serde_json::json!({
                "applicationId": resolved.application_id,
                "versionCode": resolved.code,
                "versionName": resolved.name,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("📦 ApplicationId : {}", resolved.application_id);
            println!("   versionCode = {}", resolved.code);
            println!("   versionName = {}", resolved.name);
        }
        Ok(())
    }
}

/// Run the external packaging build with every derived parameter injected.
pub struct BuildCommand {
    pub project_root: PathBuf,
    pub release: bool,
}

impl BuildCommand {
    pub async fn execute(&self) -> Result<()> {
        let config = ProjectConfig::load(&self.project_root).await?;
        let env = EnvSnapshot::capture();

        let resolved = resolve_version(&config, &self.project_root).await?;

        let build_type = if self.release {
            BuildType::Release
        } else {
            BuildType::Debug
        };
        let variant = resolve_variant(&env, &config, GraphicsFlavor::Gl, build_type);

        // Debug builds ship unsigned; only the release variant carries a
        // signing config.
        let signing = if build_type.is_signed() {
            Some(resolve_signing(&env, &self.project_root).await?)
        } else {
            None
        };

        let name = variant.version_name(&resolved.name);
        let task = variant.task_name(&config.module);
        info!(
            "Building {} {} (versionCode {})",
            variant.application_id, name, resolved.code
        );

        let abi_filters = variant
            .abis
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(",");

        let mut invocation = GradleInvocation::new(&task)
            .property("applicationId", &variant.application_id)
            .property("versionCode", resolved.code.to_string())
            .property("versionName", &name)
            .property("minSdk", config.min_sdk.to_string())
            .property("targetSdk", config.target_sdk.to_string())
            .property("compileSdk", config.compile_sdk.to_string())
            .property("ndkVersion", &config.ndk_version)
            .property("cmakeVersion", &config.cmake_version)
            .property("nativeTarget", &variant.native_target)
            .property("abiFilters", abi_filters)
            .property("cmakeArgs", variant.cmake_args.join(";"));

        if let Some(identity) = &signing {
            invocation = invocation
                .env_var(env_vars::KEYSTORE_FILE, identity.store_file.to_string_lossy())
                .env_var(env_vars::KEY_ALIAS, &identity.key_alias)
                .env_var(env_vars::KEY_PASSWORD, &identity.key_password)
                .env_var(env_vars::KEYSTORE_PASSWORD, &identity.store_password);
        }

        GradleInvoker::new(&self.project_root).run(&invocation).await?;

        info!("Build finished: {} {}", task, resolved.version);
        Ok(())
    }
}

/// Clean the external build, then remove the native staging directory.
pub struct CleanAllCommand {
    pub project_root: PathBuf,
}

impl CleanAllCommand {
    pub async fn execute(&self) -> Result<()> {
        let config = ProjectConfig::load(&self.project_root).await?;

        GradleInvoker::new(&self.project_root).clean().await?;
        remove_staging_dir(&config.staging_dir(&self.project_root)).await?;

        Ok(())
    }
}
