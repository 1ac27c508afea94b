//! First-party source injection and entry-point synthesis.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::AppSettings,
    utils::fs,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Name prefixes of source directories that are never copied.
const RESERVED_PREFIXES: &[&str] = &[".", "__"];

/// What source injection did.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SourceInjection {
    /// Top-level packages copied into `lib/`, in name order
    pub packages: Vec<String>,
    /// Generated `__main__` module
    pub entry_point: PathBuf,
    /// Injected GUI front-end module, if the resource existed
    pub gui_module: Option<PathBuf>,
}

/// Whether a source directory name is hidden or private.
pub fn is_reserved(name: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|p| name.starts_with(p))
}

/// Copies every non-reserved top-level package directory of `source_root`
/// into `lib_dir`, replacing same-named directories, then writes the
/// application's `__main__` module and injects the GUI resource when present.
///
/// # Errors
///
/// - unreadable source root or failed copies
/// - [`Error::MissingAppPackage`] when the application package was not among
///   the copied directories
///
/// A missing GUI resource only logs a warning.
pub async fn inject_source(
    app: &AppSettings,
    source_root: &Path,
    lib_dir: &Path,
    gui_resource: &Path,
) -> Result<SourceInjection> {
    log::info!("Copying {} source code...", app.name);

    let mut entries = Vec::new();
    let mut dir = tokio::fs::read_dir(source_root)
        .await
        .fs_context("reading source root", source_root)?;
    while let Some(entry) = dir
        .next_entry()
        .await
        .fs_context("reading source root", source_root)?
    {
        let file_type = entry
            .file_type()
            .await
            .fs_context("inspecting source entry", entry.path())?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if file_type.is_dir() && !is_reserved(&name) {
            entries.push((name, entry.path()));
        }
    }
    entries.sort();

    let mut packages = Vec::with_capacity(entries.len());
    for (name, path) in entries {
        let dest = lib_dir.join(&name);
        fs::remove_dir_all_forced(&dest).await?;
        fs::copy_dir(&path, &dest).await?;
        log::debug!("  - {}", name);
        packages.push(name);
    }

    let package = app.package();
    let package_dir = lib_dir.join(&package);
    if !package_dir.is_dir() {
        return Err(Error::MissingAppPackage {
            package,
            lib_dir: lib_dir.to_path_buf(),
        });
    }

    let gui_module = if gui_resource.is_file() {
        log::info!("Injecting launcher from {}", gui_resource.display());
        let dest = package_dir.join(format!("{}.py", app.gui_module));
        fs::copy_file(gui_resource, &dest).await?;
        Some(dest)
    } else {
        log::warn!("Launcher not found at {}", gui_resource.display());
        None
    };

    let entry_point = package_dir.join("__main__.py");
    tokio::fs::write(&entry_point, entry_point_source(app))
        .await
        .fs_context("writing entry point", &entry_point)?;

    Ok(SourceInjection {
        packages,
        entry_point,
        gui_module,
    })
}

/// Contents of the generated `__main__` module.
pub fn entry_point_source(app: &AppSettings) -> String {
    format!(
        "from {package}.{module} import {function}\nif __name__ == '__main__':\n    {function}()\n",
        package = app.package(),
        module = app.entry_module,
        function = app.entry_function,
    )
}
