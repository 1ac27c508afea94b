//! Primary runtime, dependency tool and source locations.

use std::path::PathBuf;

/// Where the primary runtime and first-party source live inside the project.
///
/// # Configuration
///
/// ```toml
/// [runtime]
/// venv_dir = ".venv"
/// config_file = "pyvenv.cfg"
/// source_dir = "src"
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct RuntimeSettings {
    /// Isolated-environment directory, relative to the project root.
    ///
    /// Default: ".venv"
    pub venv_dir: PathBuf,

    /// Key/value file inside `venv_dir` whose `home` entry names the runtime.
    ///
    /// Default: "pyvenv.cfg"
    pub config_file: String,

    /// First-party source root, relative to the project root.
    ///
    /// Default: "src"
    pub source_dir: PathBuf,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            venv_dir: PathBuf::from(".venv"),
            config_file: "pyvenv.cfg".into(),
            source_dir: PathBuf::from("src"),
        }
    }
}

/// External tool used to export and install the pinned dependency set.
///
/// # Configuration
///
/// ```toml
/// [dependencies]
/// tool = "uv"
/// lock_file = "requirements.txt"
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DependencySettings {
    /// Program name or path of the dependency tool.
    ///
    /// Default: "uv"
    pub tool: PathBuf,

    /// Name of the exported lock file, written at the bundle root.
    ///
    /// Default: "requirements.txt"
    pub lock_file: String,
}

impl Default for DependencySettings {
    fn default() -> Self {
        Self {
            tool: PathBuf::from("uv"),
            lock_file: "requirements.txt".into(),
        }
    }
}
