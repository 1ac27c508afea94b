//! Core Settings struct and implementations.

use super::{
    AppSettings, AssetSettings, AuxiliarySettings, DependencySettings, LauncherSettings,
    RuntimeSettings,
};
use std::path::{Path, PathBuf};

/// Validated settings for one assembly run.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder), which checks that
/// the project root exists and that the output directory is safe to destroy.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_portable::bundler::{AppSettings, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_portable::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/src/serena")
///     .output_dir("dist/serena-standalone")
///     .app(AppSettings {
///         name: "serena".into(),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    /// Absolute project checkout root.
    project_root: PathBuf,

    /// Absolute bundle root. Destroyed and recreated on every run.
    output_dir: PathBuf,

    app: AppSettings,
    runtime: RuntimeSettings,
    dependencies: DependencySettings,
    auxiliary: AuxiliarySettings,
    assets: AssetSettings,
    launcher: LauncherSettings,
}

impl Settings {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        project_root: PathBuf,
        output_dir: PathBuf,
        app: AppSettings,
        runtime: RuntimeSettings,
        dependencies: DependencySettings,
        auxiliary: AuxiliarySettings,
        assets: AssetSettings,
        launcher: LauncherSettings,
    ) -> Self {
        Self {
            project_root,
            output_dir,
            app,
            runtime,
            dependencies,
            auxiliary,
            assets,
            launcher,
        }
    }

    /// Returns the project root.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Returns the bundle root.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Returns the application identity.
    pub fn app(&self) -> &AppSettings {
        &self.app
    }

    /// Returns the runtime and source locations.
    pub fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    /// Returns the dependency tool settings.
    pub fn dependencies(&self) -> &DependencySettings {
        &self.dependencies
    }

    /// Returns the auxiliary runtime settings.
    pub fn auxiliary(&self) -> &AuxiliarySettings {
        &self.auxiliary
    }

    /// Returns the optional asset settings.
    pub fn assets(&self) -> &AssetSettings {
        &self.assets
    }

    /// Returns the launcher settings.
    pub fn launcher(&self) -> &LauncherSettings {
        &self.launcher
    }

    /// First-party source root inside the project.
    pub fn source_root(&self) -> PathBuf {
        self.project_root.join(&self.runtime.source_dir)
    }

    /// Runtime config artifact inside the project.
    pub fn runtime_config_path(&self) -> PathBuf {
        self.project_root
            .join(&self.runtime.venv_dir)
            .join(&self.runtime.config_file)
    }
}
