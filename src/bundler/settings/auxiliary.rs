//! Auxiliary runtime acquisition settings.

use super::Platform;

/// Default download mirror for the auxiliary runtime.
pub const DEFAULT_AUXILIARY_BASE_URL: &str = "https://nodejs.org/dist";

/// How the auxiliary runtime is found or fetched.
///
/// Resolution tries a search-path lookup first, then (when `download` is set)
/// a versioned archive from `base_url`. If both fail the bundle is still
/// produced without it.
///
/// # Configuration
///
/// ```toml
/// [auxiliary]
/// executable = "node"
/// version = "v20.10.0"
/// platform = "win-x64"
/// download = true
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AuxiliarySettings {
    /// Skip the auxiliary runtime entirely when false.
    ///
    /// Default: true
    pub enabled: bool,

    /// Executable stem searched for and copied into `bin/`.
    ///
    /// Default: "node"
    pub executable: String,

    /// Version used for downloads, with its leading `v`.
    ///
    /// Default: "v20.10.0"
    pub version: String,

    /// Mirror the versioned archives are fetched from.
    ///
    /// Default: [`DEFAULT_AUXILIARY_BASE_URL`]
    pub base_url: String,

    /// Target platform as `<os>-<arch>`.
    ///
    /// Default: None (host platform)
    pub platform: Option<String>,

    /// Allow falling back to a network download.
    ///
    /// Default: true
    pub download: bool,

    /// Search path used instead of `PATH` for the lookup.
    ///
    /// Default: None
    pub search_path: Option<String>,
}

impl Default for AuxiliarySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            executable: "node".into(),
            version: "v20.10.0".into(),
            base_url: DEFAULT_AUXILIARY_BASE_URL.into(),
            platform: None,
            download: true,
            search_path: None,
        }
    }
}

impl AuxiliarySettings {
    /// Resolved target platform.
    ///
    /// Unparseable values are rejected earlier by the settings builder.
    pub fn platform(&self) -> Platform {
        self.platform
            .as_deref()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(Platform::host)
    }
}
