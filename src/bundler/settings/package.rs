//! Application identity and entry points.

/// Application identity and entry-point configuration.
///
/// Names the first-party package that ends up in `lib/` and the functions the
/// generated entry point and launchers call into.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_portable::bundler::AppSettings;
///
/// let settings = AppSettings {
///     name: "serena".into(),
///     version: Some("0.1.4".into()),
///     ..Default::default()
/// };
/// assert_eq!(settings.package(), "serena");
/// ```
///
/// # Configuration
///
/// ```toml
/// [app]
/// name = "serena"
/// entry_module = "cli"
/// entry_function = "top_level"
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AppSettings {
    /// Application name.
    ///
    /// Used for launcher file names and the generated README. When empty the
    /// CLI fills it from `[project] name` in the project's `pyproject.toml`.
    pub name: String,

    /// Version shown in the README.
    ///
    /// Default: None
    pub version: Option<String>,

    /// Short description shown in the README.
    ///
    /// Default: None
    pub description: Option<String>,

    /// Importable package name inside `lib/`.
    ///
    /// Default: `name` with `-` replaced by `_`
    pub package: Option<String>,

    /// Module of `package` holding the command dispatcher.
    ///
    /// Default: "cli"
    pub entry_module: String,

    /// Function in `entry_module` invoked by the generated `__main__`.
    ///
    /// Default: "top_level"
    pub entry_function: String,

    /// Module name the GUI launcher resource is injected as.
    ///
    /// Default: "launcher"
    pub gui_module: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: None,
            description: None,
            package: None,
            entry_module: "cli".into(),
            entry_function: "top_level".into(),
            gui_module: "launcher".into(),
        }
    }
}

impl AppSettings {
    /// Importable package name.
    pub fn package(&self) -> String {
        self.package
            .clone()
            .unwrap_or_else(|| self.name.replace('-', "_"))
    }

    /// Module path run by the console launcher (`python -m <this>`).
    pub fn console_module(&self) -> String {
        self.package()
    }

    /// Module path run by the windowed launcher.
    pub fn gui_module_path(&self) -> String {
        format!("{}.{}", self.package(), self.gui_module)
    }
}
