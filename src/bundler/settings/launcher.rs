//! Launcher script generation settings.

use std::path::PathBuf;

/// Script dialect the launchers are written in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LauncherFlavor {
    /// Windows `cmd.exe` batch files (`.bat`)
    Batch,
    /// POSIX `sh` scripts (`.sh`)
    Posix,
}

impl LauncherFlavor {
    /// Flavor native to the running host.
    pub fn host() -> Self {
        if cfg!(windows) {
            LauncherFlavor::Batch
        } else {
            LauncherFlavor::Posix
        }
    }

    /// Launcher file extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            LauncherFlavor::Batch => "bat",
            LauncherFlavor::Posix => "sh",
        }
    }

    /// Path of the interpreter relative to the runtime root.
    pub fn interpreter(self) -> &'static str {
        match self {
            LauncherFlavor::Batch => "python.exe",
            LauncherFlavor::Posix => "bin/python3",
        }
    }

    /// Directory of the runtime holding installed console scripts.
    pub fn script_dir(self) -> &'static str {
        match self {
            LauncherFlavor::Batch => "Scripts",
            LauncherFlavor::Posix => "bin",
        }
    }

    /// Separator between entries of a search path.
    pub fn path_separator(self) -> &'static str {
        match self {
            LauncherFlavor::Batch => ";",
            LauncherFlavor::Posix => ":",
        }
    }

    /// Separator between path components.
    pub fn dir_separator(self) -> char {
        match self {
            LauncherFlavor::Batch => '\\',
            LauncherFlavor::Posix => '/',
        }
    }
}

/// Launcher script settings.
///
/// # Configuration
///
/// ```toml
/// [launcher]
/// flavor = "batch"
/// data_env_var = "SOLIDLSP_DIR"
/// interop_bin_dirs = ["pywin32_system32"]
/// interop_lib_dirs = ["win32", "win32/lib", "Pythonwin"]
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct LauncherSettings {
    /// Script dialect.
    ///
    /// Default: None (host flavor)
    pub flavor: Option<LauncherFlavor>,

    /// Variable pointing at `data/<namespace>`.
    ///
    /// Default: "SOLIDLSP_DIR"
    pub data_env_var: String,

    /// Module search path variable.
    ///
    /// Default: "PYTHONPATH"
    pub module_path_var: String,

    /// Directories under `lib/` added to the executable search path.
    ///
    /// Default: None (`pywin32_system32` for batch, nothing for POSIX)
    pub interop_bin_dirs: Option<Vec<String>>,

    /// Directories under `lib/` added to the module search path.
    ///
    /// Default: None (`win32`, `win32/lib`, `Pythonwin` for batch, nothing for POSIX)
    pub interop_lib_dirs: Option<Vec<String>>,

    /// GUI front-end source injected into the application package.
    ///
    /// Default: None ("resources/launcher.py" relative to the working directory)
    pub resource: Option<PathBuf>,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            flavor: None,
            data_env_var: "SOLIDLSP_DIR".into(),
            module_path_var: "PYTHONPATH".into(),
            interop_bin_dirs: None,
            interop_lib_dirs: None,
            resource: None,
        }
    }
}

impl LauncherSettings {
    /// Resolved script flavor.
    pub fn flavor(&self) -> LauncherFlavor {
        self.flavor.unwrap_or_else(LauncherFlavor::host)
    }

    /// Interop executable directories for the resolved flavor.
    pub fn interop_bin_dirs(&self) -> Vec<String> {
        self.interop_bin_dirs.clone().unwrap_or_else(|| match self.flavor() {
            LauncherFlavor::Batch => vec!["pywin32_system32".into()],
            LauncherFlavor::Posix => Vec::new(),
        })
    }

    /// Interop library directories for the resolved flavor.
    pub fn interop_lib_dirs(&self) -> Vec<String> {
        self.interop_lib_dirs.clone().unwrap_or_else(|| match self.flavor() {
            LauncherFlavor::Batch => vec!["win32".into(), "win32/lib".into(), "Pythonwin".into()],
            LauncherFlavor::Posix => Vec::new(),
        })
    }

    /// GUI resource location.
    pub fn resource(&self) -> PathBuf {
        self.resource
            .clone()
            .unwrap_or_else(|| PathBuf::from("resources").join("launcher.py"))
    }
}
