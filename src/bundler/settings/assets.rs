//! Optional asset selection and cache settings.

use std::{collections::BTreeSet, path::PathBuf};

/// Which cached optional assets go into `data/<namespace>/<category>/`.
///
/// # Configuration
///
/// ```toml
/// [assets]
/// cache_root = "/home/me/.solidlsp/language_servers"
/// selection = ["java", "typescript"]
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Directory holding one subdirectory per cached asset.
    ///
    /// Default: None (first existing well-known location under the home directory)
    pub cache_root: Option<PathBuf>,

    /// Asset names to include.
    ///
    /// Default: None (everything found in the cache)
    pub selection: Option<BTreeSet<String>>,

    /// First directory level under `data/`, also exported by the launchers.
    ///
    /// Default: "solidlsp"
    pub namespace: String,

    /// Second directory level under `data/`.
    ///
    /// Default: "language_servers"
    pub category: String,

    /// Command prefix used to run the cache population script.
    ///
    /// Default: `["uv", "run", "python"]`
    pub fetch_runner: Vec<String>,

    /// Cache population script, relative to the project root.
    ///
    /// Default: "scripts/predownload_language_servers.py"
    pub fetch_script: PathBuf,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            cache_root: None,
            selection: None,
            namespace: "solidlsp".into(),
            category: "language_servers".into(),
            fetch_runner: vec!["uv".into(), "run".into(), "python".into()],
            fetch_script: PathBuf::from("scripts/predownload_language_servers.py"),
        }
    }
}

impl AssetSettings {
    /// Configured cache root, or the detected default.
    pub fn cache_root(&self) -> PathBuf {
        self.cache_root
            .clone()
            .unwrap_or_else(crate::bundler::assets::detect_cache_root)
    }
}
