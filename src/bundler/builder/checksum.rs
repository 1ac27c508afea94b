//! Bundle tree checksum.
//!
//! Two bundles with the same relative paths, file contents and symlink targets
//! hash equal regardless of where they live or when they were written.

use crate::bundler::{Result, error::ErrorExt};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use walkdir::WalkDir;

/// What a tree entry contributes to the checksum.
enum Leaf {
    File(PathBuf),
    Link(PathBuf),
}

/// Calculates the SHA-256 of the directory tree at `root`.
///
/// # Algorithm
///
/// 1. Walk the tree without following links, in file-name order
/// 2. For each file: hash its relative path, then its content
/// 3. For each symlink: hash its relative path, then its target
///
/// Fields are NUL-terminated so adjacent entries cannot run together.
pub async fn calculate_tree_sha256(root: &Path) -> Result<String> {
    let walk_root = root.to_path_buf();
    let leaves = tokio::task::spawn_blocking(move || -> Result<Vec<(String, Leaf)>> {
        let mut leaves = Vec::new();
        for entry in WalkDir::new(&walk_root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry?;
            let rel = entry
                .path()
                .strip_prefix(&walk_root)?
                .to_string_lossy()
                .replace('\\', "/");
            let file_type = entry.file_type();
            if file_type.is_symlink() {
                let target = std::fs::read_link(entry.path())
                    .fs_context("reading symlink", entry.path())?;
                leaves.push((rel, Leaf::Link(target)));
            } else if file_type.is_file() {
                leaves.push((rel, Leaf::File(entry.into_path())));
            }
        }
        Ok(leaves)
    })
    .await
    .map_err(|e| crate::bundler::Error::GenericError(format!("checksum task failed: {e}")))??;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    for (rel, leaf) in leaves {
        hasher.update(rel.as_bytes());
        hasher.update([0u8]);

        match leaf {
            Leaf::Link(target) => {
                hasher.update(b"->");
                hasher.update(target.to_string_lossy().as_bytes());
            }
            Leaf::File(path) => {
                let mut file = tokio::fs::File::open(&path)
                    .await
                    .fs_context("opening file for hashing", &path)?;
                loop {
                    let n = file
                        .read(&mut buffer)
                        .await
                        .fs_context("reading file for hash calculation", &path)?;
                    if n == 0 {
                        break;
                    }
                    hasher.update(&buffer[..n]);
                }
            }
        }
        hasher.update([0u8]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}
