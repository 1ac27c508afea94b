//! File system utilities for bundling.
//!
//! Provides copy operations with automatic directory creation and symlink
//! preservation, plus a removal that gets past read-only bits left by earlier runs.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Permissions are carried over, so executables stay executable.
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating parent directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// Preserves symlinks on platforms that support them. Entries are visited in
/// file-name order so repeated copies produce the same tree.
/// Fails if the source path is not a directory or doesn't exist.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_dir() {
        return Err(Error::GenericError(format!("{from:?} is not a Directory")));
    }

    let from = from.to_path_buf();
    let to = to.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).fs_context("creating parent directory", parent)?;
        }

        for entry in walkdir::WalkDir::new(&from).sort_by_file_name() {
            let entry = entry?;
            let rel_path = entry.path().strip_prefix(&from)?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())
                    .fs_context("reading symlink", entry.path())?;
                let linked = if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)
                } else {
                    symlink_file(&target, &dest_path)
                };
                linked.fs_context("creating symlink", &dest_path)?;
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)
                    .fs_context("creating directory", &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path).fs_context("copying file", entry.path())?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {e}")))?
}

/// Removes a directory tree, clearing restrictive permissions once if needed.
///
/// A missing path is success. On `PermissionDenied` every entry of the tree is
/// made writable and the removal is retried a single time; any further failure
/// is returned.
pub async fn remove_dir_all_forced(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            log::debug!(
                "Removal of {} hit a permission error ({e}), clearing read-only attributes",
                path.display()
            );
        }
        Err(e) => return Err(e).fs_context("removing directory", path),
    }

    let root = path.to_path_buf();
    tokio::task::spawn_blocking(move || clear_readonly(&root))
        .await
        .map_err(|e| Error::GenericError(format!("Permission reset task panicked: {e}")))??;

    fs::remove_dir_all(path)
        .await
        .fs_context("removing directory after clearing read-only attributes", path)
}

fn clear_readonly(root: &Path) -> Result<()> {
    for entry in walkdir::WalkDir::new(root).contents_first(false) {
        let entry = entry?;
        if entry.file_type().is_symlink() {
            continue;
        }
        let metadata = entry.metadata()?;
        let mut permissions = metadata.permissions();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = permissions.mode();
            let wanted = if metadata.is_dir() { mode | 0o700 } else { mode | 0o200 };
            if wanted == mode {
                continue;
            }
            permissions.set_mode(wanted);
        }
        #[cfg(not(unix))]
        {
            if !permissions.readonly() {
                continue;
            }
            #[allow(clippy::permissions_set_readonly_false)]
            permissions.set_readonly(false);
        }

        std::fs::set_permissions(entry.path(), permissions)
            .fs_context("clearing read-only attribute", entry.path())?;
    }
    Ok(())
}

/// Marks a file executable on Unix; no-op elsewhere.
pub async fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .await
            .fs_context("setting executable permissions", path)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
