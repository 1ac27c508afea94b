//! Config file loading and command line overrides.
//!
//! ```toml
//! project_root = "../serena"
//! output_dir = "dist/serena-standalone"
//!
//! [app]
//! name = "serena"
//!
//! [assets]
//! selection = ["java", "typescript"]
//!
//! [auxiliary]
//! download = false
//! ```
//!
//! Relative paths in the file are resolved against the file's directory.

use super::args::{Args, BuildArgs};
use crate::{
    bundler::{
        AppSettings, AssetSettings, AuxiliarySettings, DependencySettings, LauncherSettings,
        RuntimeSettings, Settings, SettingsBuilder,
    },
    error::{CliError, Result},
    metadata::load_project_metadata,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Contents of the optional TOML config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BundleConfig {
    /// Project checkout root
    pub project_root: Option<PathBuf>,
    /// Bundle output directory
    pub output_dir: Option<PathBuf>,
    /// `[app]`
    pub app: AppSettings,
    /// `[runtime]`
    pub runtime: RuntimeSettings,
    /// `[dependencies]`
    pub dependencies: DependencySettings,
    /// `[auxiliary]`
    pub auxiliary: AuxiliarySettings,
    /// `[assets]`
    pub assets: AssetSettings,
    /// `[launcher]`
    pub launcher: LauncherSettings,
}

impl BundleConfig {
    /// Reads and parses `path`, anchoring relative paths at its directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::ExecutionFailed {
                command: "read_config".to_string(),
                reason: format!("Failed to read {}: {}", path.display(), e),
            }
        })?;
        let mut config: Self = toml::from_str(&contents)?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let paths = [
            &mut config.project_root,
            &mut config.output_dir,
            &mut config.assets.cache_root,
            &mut config.launcher.resource,
        ];
        for path in paths.into_iter().flatten() {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }

        Ok(config)
    }

    /// Loads the file named by `--config`, or defaults when none was given.
    pub fn from_args(args: &Args) -> Result<Self> {
        match &args.config {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Applies the global command line overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(root) = &args.project_root {
            self.project_root = Some(root.clone());
        }
        if let Some(output) = &args.output {
            self.output_dir = Some(output.clone());
        }
        if let Some(cache_root) = &args.cache_root {
            self.assets.cache_root = Some(cache_root.clone());
        }
        if let Some(name) = &args.name {
            self.app.name = name.clone();
        }
    }

    /// Applies the `build` overrides.
    pub fn apply_build_args(&mut self, build: &BuildArgs) {
        if let Some(assets) = &build.assets {
            self.assets.selection = Some(assets.iter().map(|a| a.trim().to_string()).collect());
        }
        if build.no_download {
            self.auxiliary.download = false;
        }
        if build.no_auxiliary {
            self.auxiliary.enabled = false;
        }
        if let Some(flavor) = build.launcher_flavor {
            self.launcher.flavor = Some(flavor);
        }
    }

    /// Project root, or the error every command reports without one.
    pub fn require_project_root(&self) -> Result<&Path> {
        self.project_root.as_deref().ok_or_else(|| {
            CliError::MissingArgument {
                argument: "--project-root".to_string(),
            }
            .into()
        })
    }

    /// Fills application name, version and description from the project
    /// manifest where the config left them unset.
    pub fn fill_from_manifest(&mut self) -> Result<()> {
        let root = self.require_project_root()?.to_path_buf();
        if !self.app.name.is_empty() && self.app.version.is_some() {
            return Ok(());
        }

        if let Some(metadata) = load_project_metadata(&root)? {
            log::debug!("Read project metadata for {}", metadata.name);
            if self.app.name.is_empty() {
                self.app.name = metadata.name;
            }
            self.app.version = self.app.version.take().or(metadata.version);
            self.app.description = self.app.description.take().or(metadata.description);
        }

        if self.app.name.is_empty() {
            return Err(CliError::MissingArgument {
                argument: "--name".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Validated pipeline settings.
    pub fn into_settings(mut self) -> Result<Settings> {
        self.fill_from_manifest()?;

        let output_dir = self
            .output_dir
            .clone()
            .unwrap_or_else(|| default_output_dir(&self.app.name));

        let mut builder = SettingsBuilder::new()
            .output_dir(output_dir)
            .app(self.app)
            .runtime(self.runtime)
            .dependencies(self.dependencies)
            .auxiliary(self.auxiliary)
            .assets(self.assets)
            .launcher(self.launcher);
        if let Some(root) = self.project_root {
            builder = builder.project_root(root);
        }

        Ok(builder.build()?)
    }
}

/// `./dist/<name>-standalone`
pub fn default_output_dir(name: &str) -> PathBuf {
    PathBuf::from("dist").join(format!("{name}-standalone"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn anchors_relative_paths_at_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.toml");
        std::fs::write(
            &path,
            "project_root = \"project\"\n[app]\nname = \"demo\"\n[assets]\ncache_root = \"/abs/cache\"\n",
        )
        .unwrap();

        let config = BundleConfig::load(&path).unwrap();
        assert_eq!(config.project_root, Some(dir.path().join("project")));
        assert_eq!(config.assets.cache_root, Some(PathBuf::from("/abs/cache")));
        assert_eq!(config.app.name, "demo");
    }

    #[test]
    fn flags_override_file_values() {
        let mut config = BundleConfig {
            project_root: Some("/from/file".into()),
            ..Default::default()
        };
        let args = Args::try_parse_from([
            "kodegen_bundler_portable",
            "build",
            "-p",
            "/from/flag",
            "--no-download",
            "--assets",
            "java",
        ])
        .unwrap();

        config.apply_args(&args);
        if let crate::cli::args::Command::Build(build) = &args.command {
            config.apply_build_args(build);
        }

        assert_eq!(config.project_root, Some(PathBuf::from("/from/flag")));
        assert!(!config.auxiliary.download);
        assert_eq!(
            config.assets.selection,
            Some(["java".to_string()].into_iter().collect())
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.toml");
        std::fs::write(&path, "projct_root = \"typo\"\n").unwrap();
        assert!(BundleConfig::load(&path).is_err());
    }
}
