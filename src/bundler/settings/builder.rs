//! Builder for constructing Settings.

use super::{
    AppSettings, AssetSettings, AuxiliarySettings, DependencySettings, LauncherSettings, Platform,
    RuntimeSettings, Settings,
};
use crate::bundler::{
    assets::is_valid_asset_name,
    error::{Error, ErrorExt, Result},
};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// # Required
///
/// - `project_root`: no default, must be an existing directory
/// - `output_dir`: must not be the project root, an ancestor of it, or a filesystem root,
///   and must not lie inside the source or environment directory
/// - `app.name`: must be non-empty
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_portable::bundler::{AppSettings, AssetSettings, SettingsBuilder};
///
/// # fn example() -> kodegen_bundler_portable::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .project_root("/src/serena")
///     .output_dir("dist/serena-standalone")
///     .app(AppSettings { name: "serena".into(), ..Default::default() })
///     .assets(AssetSettings {
///         selection: Some(["java".to_string()].into()),
///         ..Default::default()
///     })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    project_root: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    app: AppSettings,
    runtime: RuntimeSettings,
    dependencies: DependencySettings,
    auxiliary: AuxiliarySettings,
    assets: AssetSettings,
    launcher: LauncherSettings,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the project checkout root.
    pub fn project_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the bundle output directory.
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the application identity.
    pub fn app(mut self, settings: AppSettings) -> Self {
        self.app = settings;
        self
    }

    /// Sets runtime and source locations.
    ///
    /// Default: `.venv/pyvenv.cfg`, `src`
    pub fn runtime(mut self, settings: RuntimeSettings) -> Self {
        self.runtime = settings;
        self
    }

    /// Sets the dependency tool.
    ///
    /// Default: `uv`
    pub fn dependencies(mut self, settings: DependencySettings) -> Self {
        self.dependencies = settings;
        self
    }

    /// Sets auxiliary runtime acquisition.
    pub fn auxiliary(mut self, settings: AuxiliarySettings) -> Self {
        self.auxiliary = settings;
        self
    }

    /// Sets optional asset selection.
    pub fn assets(mut self, settings: AssetSettings) -> Self {
        self.assets = settings;
        self
    }

    /// Sets launcher generation.
    pub fn launcher(mut self, settings: LauncherSettings) -> Self {
        self.launcher = settings;
        self
    }

    /// Validates and builds the settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSettings`] for a missing or non-directory project
    /// root, a missing or unsafe output directory, an empty application name,
    /// an asset name that is not a single directory name, or an unparseable
    /// auxiliary platform.
    pub fn build(self) -> Result<Settings> {
        let project_root = self.project_root.ok_or_else(|| {
            Error::InvalidSettings(
                "project_root is required (pass --project-root or set it in the config file)"
                    .into(),
            )
        })?;
        let project_root = absolute(&project_root)?;
        if !project_root.is_dir() {
            return Err(Error::InvalidSettings(format!(
                "project root {} is not an existing directory",
                project_root.display()
            )));
        }

        let output_dir = self
            .output_dir
            .ok_or_else(|| Error::InvalidSettings("output_dir is required".into()))?;
        let output_dir = absolute(&output_dir)?;
        if output_dir.parent().is_none() {
            return Err(Error::InvalidSettings(format!(
                "refusing to use filesystem root {} as output directory",
                output_dir.display()
            )));
        }
        if project_root.starts_with(&output_dir) {
            return Err(Error::InvalidSettings(format!(
                "output directory {} would delete the project root {}",
                output_dir.display(),
                project_root.display()
            )));
        }
        for (what, dir) in [
            ("source directory", &self.runtime.source_dir),
            ("environment directory", &self.runtime.venv_dir),
        ] {
            let dir = absolute(&project_root.join(dir))?;
            if output_dir.starts_with(&dir) {
                return Err(Error::InvalidSettings(format!(
                    "output directory {} is inside the project {} {}, which is copied into the bundle",
                    output_dir.display(),
                    what,
                    dir.display()
                )));
            }
        }

        if self.app.name.trim().is_empty() {
            return Err(Error::InvalidSettings(
                "application name is required (set [app] name or add [project] name to pyproject.toml)"
                    .into(),
            ));
        }

        if let Some(bad) = self
            .assets
            .selection
            .iter()
            .flatten()
            .find(|n| !is_valid_asset_name(n))
        {
            return Err(Error::InvalidSettings(format!(
                "asset name {bad:?} must be a single directory name"
            )));
        }

        if let Some(platform) = &self.auxiliary.platform {
            platform
                .parse::<Platform>()
                .map_err(|e| Error::InvalidSettings(format!("auxiliary platform: {e}")))?;
        }

        Ok(Settings::new(
            project_root,
            output_dir,
            self.app,
            self.runtime,
            self.dependencies,
            self.auxiliary,
            self.assets,
            self.launcher,
        ))
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(path
        .absolutize()
        .fs_context("resolving absolute path", path)?
        .into_owned())
}
