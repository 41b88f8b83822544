//! Build variant resolution
//!
//! Assembles the native-build argument list and the packaging split set
//! for one build: the static engine feature flags, the optional ccache
//! override from the environment snapshot, and the graphics flavor's
//! contribution. The output is consumed as opaque arguments by the
//! external build; nothing here interprets flag semantics.

use serde::{Deserialize, Serialize};

use frombones_build_core::env::{self, EnvSnapshot};
use frombones_build_core::ProjectConfig;

/// Compile-time engine feature flags common to every variant.
const ENGINE_FLAGS: &[&str] = &[
    "-DURHO3D_LIB_TYPE=STATIC",
    "-DURHO3D_ANGELSCRIPT=0",
    "-DURHO3D_LUA=0",
    "-DURHO3D_LUAJIT=0",
    "-DURHO3D_NETWORK=1",
    "-DSDL_HAPTIC=1",
];

/// Target ABI for packaging splits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbiTarget {
    ArmeabiV7a,
    Arm64V8a,
    X86,
    X86_64,
}

impl AbiTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbiTarget::ArmeabiV7a => "armeabi-v7a",
            AbiTarget::Arm64V8a => "arm64-v8a",
            AbiTarget::X86 => "x86",
            AbiTarget::X86_64 => "x86_64",
        }
    }

    /// The full split set shipped for every flavor.
    pub fn all_targets() -> &'static [AbiTarget] {
        &[
            AbiTarget::ArmeabiV7a,
            AbiTarget::Arm64V8a,
            AbiTarget::X86,
            AbiTarget::X86_64,
        ]
    }
}

/// Build type (debug/release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildType {
    #[default]
    Debug,
    Release,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
        }
    }

    pub fn task_suffix(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }

    /// Release artifacts are minified; debug artifacts are not.
    pub fn is_minified(&self) -> bool {
        matches!(self, BuildType::Release)
    }

    /// Only debug builds keep JNI debugging enabled.
    pub fn is_jni_debuggable(&self) -> bool {
        matches!(self, BuildType::Debug)
    }

    /// Only release artifacts are signed.
    pub fn is_signed(&self) -> bool {
        matches!(self, BuildType::Release)
    }
}

/// Graphics backend flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GraphicsFlavor {
    #[default]
    Gl,
}

impl GraphicsFlavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphicsFlavor::Gl => "gl",
        }
    }

    pub fn application_id_suffix(&self) -> &'static str {
        match self {
            GraphicsFlavor::Gl => ".gl",
        }
    }

    pub fn version_name_suffix(&self) -> &'static str {
        match self {
            GraphicsFlavor::Gl => "-gl",
        }
    }

    /// Backend selection flag for the native build.
    pub fn cmake_arg(&self) -> &'static str {
        match self {
            GraphicsFlavor::Gl => "-DURHO3D_OPENGL=1",
        }
    }
}

/// Resolved parameters for one build variant.
#[derive(Debug, Clone)]
pub struct VariantSettings {
    pub flavor: GraphicsFlavor,
    pub build_type: BuildType,
    /// Package identifier with the flavor suffix applied.
    pub application_id: String,
    /// Native build target handed to the external build system.
    pub native_target: String,
    /// Native-build arguments, in injection order.
    pub cmake_args: Vec<String>,
    /// ABI split set for packaging.
    pub abis: Vec<AbiTarget>,
}

impl VariantSettings {
    /// Full external task name for this variant, e.g.
    /// `:app:assembleGlRelease`.
    pub fn task_name(&self, module: &str) -> String {
        format!(
            ":{}:assemble{}{}",
            module,
            capitalized(self.flavor.as_str()),
            self.build_type.task_suffix()
        )
    }

    /// Display version with the flavor suffix appended.
    pub fn version_name(&self, base: &str) -> String {
        format!("{}{}", base, self.flavor.version_name_suffix())
    }
}

/// Assemble the variant settings for one build invocation.
pub fn resolve_variant(
    env: &EnvSnapshot,
    config: &ProjectConfig,
    flavor: GraphicsFlavor,
    build_type: BuildType,
) -> VariantSettings {
    let mut cmake_args: Vec<String> =
        ENGINE_FLAGS.iter().map(|f| f.to_string()).collect();

    if let Some(ccache) = env.get(env::ANDROID_CCACHE) {
        cmake_args.push(format!("-DANDROID_CCACHE={ccache}"));
    }

    cmake_args.push(flavor.cmake_arg().to_string());

    VariantSettings {
        flavor,
        build_type,
        application_id: format!(
            "{}{}",
            config.application_id,
            flavor.application_id_suffix()
        ),
        native_target: config.native_target.clone(),
        cmake_args,
        abis: AbiTarget::all_targets().to_vec(),
    }
}

fn capitalized(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
