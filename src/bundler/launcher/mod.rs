//! Relocatable launcher scripts and the bundle README.
//!
//! Two scripts are written to the bundle root, identical except for the module
//! they run: `<app>.<ext>` starts the console entry point and
//! `<app>-launcher.<ext>` starts the windowed front-end.

mod template;

use crate::bundler::{
    BundleLayout,
    error::{ErrorExt, Result},
    runtime::AuxiliaryOutcome,
    settings::{AppSettings, LauncherFlavor, LauncherSettings},
    utils::fs,
};
use handlebars::Handlebars;
use serde::Serialize;
use std::path::{Path, PathBuf};
use template::{BATCH_TEMPLATE, POSIX_TEMPLATE, README_TEMPLATE};

/// Name of the generated README at the bundle root.
pub const README_FILE: &str = "README.txt";

/// Values bound into a launcher template.
#[derive(Serialize)]
struct LauncherData {
    data_env_var: String,
    module_path_var: String,
    data_dir: String,
    script_dir: String,
    interop_bin_dirs: Vec<String>,
    interop_lib_dirs: Vec<String>,
    inherited_module_path: String,
    interpreter: String,
    module: String,
    label: String,
}

/// Launcher file names for `app` in `flavor`, console first.
pub fn launcher_names(app: &AppSettings, flavor: LauncherFlavor) -> [String; 2] {
    let ext = flavor.extension();
    [
        format!("{}.{}", app.name, ext),
        format!("{}-launcher.{}", app.name, ext),
    ]
}

/// Shell expression for `rel` below the directory held in `var`.
fn var_path(flavor: LauncherFlavor, var: &str, rel: &str) -> String {
    let sep = flavor.dir_separator();
    let rel = rel.replace(['/', '\\'], &sep.to_string());
    match flavor {
        LauncherFlavor::Batch => format!("%{var}%{sep}{rel}"),
        LauncherFlavor::Posix => format!("${var}{sep}{rel}"),
    }
}

fn new_registry() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
}

/// Renders one launcher script running `module`.
fn render_launcher(
    layout: &BundleLayout,
    settings: &LauncherSettings,
    module: String,
    label: String,
) -> Result<String> {
    let flavor = settings.flavor();
    let data_rel = format!("data/{}", layout.namespace());

    let data = LauncherData {
        data_env_var: settings.data_env_var.clone(),
        module_path_var: settings.module_path_var.clone(),
        data_dir: var_path(flavor, "BASE_DIR", &data_rel),
        script_dir: var_path(flavor, "RUNTIME_HOME", flavor.script_dir()),
        interop_bin_dirs: settings
            .interop_bin_dirs()
            .iter()
            .map(|d| var_path(flavor, "LIB_DIR", d))
            .collect(),
        interop_lib_dirs: settings
            .interop_lib_dirs()
            .iter()
            .map(|d| var_path(flavor, "LIB_DIR", d))
            .collect(),
        // Appended only when already set, so no empty entry lands on the path.
        inherited_module_path: format!(
            "${{{var}:+:${var}}}",
            var = settings.module_path_var
        ),
        interpreter: var_path(flavor, "RUNTIME_HOME", flavor.interpreter()),
        module,
        label,
    };

    let template = match flavor {
        LauncherFlavor::Batch => BATCH_TEMPLATE,
        LauncherFlavor::Posix => POSIX_TEMPLATE,
    };
    let rendered = new_registry().render_template(template, &data)?;

    Ok(match flavor {
        LauncherFlavor::Batch => rendered.replace('\n', "\r\n"),
        LauncherFlavor::Posix => rendered,
    })
}

async fn write_script(path: &Path, contents: &str, flavor: LauncherFlavor) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .fs_context("writing launcher", path)?;
    if flavor == LauncherFlavor::Posix {
        fs::make_executable(path).await?;
    }
    Ok(())
}

/// Writes the console and windowed launchers into the bundle root.
///
/// Returns their paths, console first.
pub async fn emit(
    layout: &BundleLayout,
    app: &AppSettings,
    settings: &LauncherSettings,
) -> Result<Vec<PathBuf>> {
    let flavor = settings.flavor();
    let [console_name, gui_name] = launcher_names(app, flavor);
    log::info!("Creating launcher scripts ({:?})...", flavor);

    let console = render_launcher(layout, settings, app.console_module(), app.name.clone())?;
    let gui = render_launcher(layout, settings, app.gui_module_path(), "Launcher".into())?;

    let console_path = layout.root().join(console_name);
    let gui_path = layout.root().join(gui_name);
    write_script(&console_path, &console, flavor).await?;
    write_script(&gui_path, &gui, flavor).await?;

    Ok(vec![console_path, gui_path])
}

/// Values bound into the README template.
#[derive(Serialize)]
pub struct ReadmeContext<'a> {
    /// Application display name
    pub name: &'a str,
    /// Application version, if known
    pub version: Option<&'a str>,
    /// One-line description, if known
    pub description: Option<&'a str>,
    /// Console launcher file name
    pub console_launcher: String,
    /// Windowed launcher file name
    pub gui_launcher: String,
    /// Auxiliary executable name
    pub aux_executable: &'a str,
    /// Whether the auxiliary runtime made it into `bin/`
    pub aux_installed: bool,
    /// Asset directory relative to the root
    pub assets_dir: String,
    /// Assets that were copied
    pub assets: &'a [String],
    /// Lock file name
    pub lock_file: &'a str,
}

impl<'a> ReadmeContext<'a> {
    /// Collects README values from the finished pipeline steps.
    pub fn new(
        layout: &BundleLayout,
        app: &'a AppSettings,
        flavor: LauncherFlavor,
        aux_executable: &'a str,
        aux: &AuxiliaryOutcome,
        assets: &'a [String],
        lock_file: &'a str,
    ) -> Self {
        let [console_launcher, gui_launcher] = launcher_names(app, flavor);
        Self {
            name: &app.name,
            version: app.version.as_deref(),
            description: app.description.as_deref(),
            console_launcher,
            gui_launcher,
            aux_executable,
            aux_installed: aux.is_installed(),
            assets_dir: format!("data/{}/{}", layout.namespace(), layout.category()),
            assets,
            lock_file,
        }
    }
}

/// Renders and writes `README.txt` at the bundle root.
pub async fn write_readme(layout: &BundleLayout, context: &ReadmeContext<'_>) -> Result<PathBuf> {
    let contents = new_registry().render_template(README_TEMPLATE, context)?;
    let path = layout.root().join(README_FILE);
    tokio::fs::write(&path, contents)
        .await
        .fs_context("writing README", &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_in_flavor_syntax() {
        assert_eq!(
            var_path(LauncherFlavor::Batch, "LIB_DIR", "win32/lib"),
            "%LIB_DIR%\\win32\\lib"
        );
        assert_eq!(
            var_path(LauncherFlavor::Posix, "RUNTIME_HOME", "bin/python3"),
            "$RUNTIME_HOME/bin/python3"
        );
    }

    #[test]
    fn names_console_and_windowed_launchers() {
        let app = AppSettings {
            name: "serena".into(),
            ..Default::default()
        };
        assert_eq!(
            launcher_names(&app, LauncherFlavor::Batch),
            ["serena.bat".to_string(), "serena-launcher.bat".to_string()]
        );
    }

    #[test]
    fn batch_launcher_has_no_baked_paths() {
        let layout = BundleLayout::new("/abs/bundle", "solidlsp", "language_servers");
        let settings = LauncherSettings {
            flavor: Some(LauncherFlavor::Batch),
            ..Default::default()
        };
        let script =
            render_launcher(&layout, &settings, "serena".into(), "serena".into()).unwrap();

        assert!(!script.contains("/abs/bundle"));
        assert!(script.contains("set \"SOLIDLSP_DIR=%BASE_DIR%\\data\\solidlsp\"\r\n"));
        assert!(script.contains(
            "set \"PATH=%RUNTIME_HOME%;%RUNTIME_HOME%\\Scripts;%AUX_HOME%;%LIB_DIR%\\pywin32_system32;%PATH%\""
        ));
        assert!(script.contains(
            "set \"PYTHONPATH=%LIB_DIR%;%LIB_DIR%\\win32;%LIB_DIR%\\win32\\lib;%LIB_DIR%\\Pythonwin;%PYTHONPATH%\""
        ));
        assert!(script.contains("\"%RUNTIME_HOME%\\python.exe\" -m serena %*"));
    }
}
