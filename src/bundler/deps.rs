//! Pinned dependency export and isolated install.

use crate::bundler::{error::Result, settings::DependencySettings, utils::command::ToolCommand};
use std::path::Path;

/// Exports the pinned dependency set to `lock_path`, then installs exactly that
/// set into `lib_dir`.
///
/// Both tool invocations run in `project_root`. The export carries versions
/// only (`--no-hashes`) and the install does not re-resolve (`--no-deps`), so
/// `lib_dir` receives precisely what the project lock pins.
///
/// # Errors
///
/// Either invocation failing to start or exiting nonzero is fatal; the error
/// carries both captured streams.
pub async fn materialize(
    settings: &DependencySettings,
    project_root: &Path,
    lock_path: &Path,
    lib_dir: &Path,
) -> Result<()> {
    log::info!("Exporting dependencies...");
    ToolCommand::new(&settings.tool)
        .args(["export", "--no-hashes", "--output-file"])
        .arg(lock_path)
        .current_dir(project_root)
        .run()
        .await?;

    log::info!("Installing dependencies to isolated lib directory...");
    ToolCommand::new(&settings.tool)
        .args(["pip", "install", "-r"])
        .arg(lock_path)
        .arg("--target")
        .arg(lib_dir)
        .arg("--no-deps")
        .current_dir(project_root)
        .run()
        .await?;

    Ok(())
}
