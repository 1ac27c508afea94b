//! The fixed directory contract of a bundle.
//!
//! ```text
//! <root>/
//!   bin/                          auxiliary runtime and helper executables
//!   runtime/                      primary language runtime
//!   lib/                          installed dependencies + first-party source
//!   data/<namespace>/<category>/  optional assets, one directory per name
//!   <lock file>, README.txt, two launchers
//! ```

use crate::bundler::{
    error::{ErrorExt, Result},
    utils::fs::remove_dir_all_forced,
};
use std::path::{Path, PathBuf};

/// Scratch directory used while unpacking downloads. Removed before the run ends.
const SCRATCH_DIR: &str = ".aux-scratch";

/// Paths of every fixed location inside a bundle.
#[derive(Debug, Clone)]
pub struct BundleLayout {
    root: PathBuf,
    namespace: String,
    category: String,
}

impl BundleLayout {
    /// Describes a bundle rooted at `root`; nothing is touched on disk.
    pub fn new(root: impl Into<PathBuf>, namespace: &str, category: &str) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.to_string(),
            category: category.to_string(),
        }
    }

    /// Bundle root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `bin/`
    pub fn bin_dir(&self) -> PathBuf {
        self.root.join("bin")
    }

    /// `runtime/`
    pub fn runtime_dir(&self) -> PathBuf {
        self.root.join("runtime")
    }

    /// `lib/`
    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }

    /// `data/`
    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    /// `data/<namespace>/`, the directory the launchers export.
    pub fn namespace_dir(&self) -> PathBuf {
        self.data_dir().join(&self.namespace)
    }

    /// `data/<namespace>/<category>/`
    pub fn assets_dir(&self) -> PathBuf {
        self.namespace_dir().join(&self.category)
    }

    /// Namespace name.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Category name.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Scratch area for runtime downloads.
    pub fn scratch_dir(&self) -> PathBuf {
        self.root.join(SCRATCH_DIR)
    }

    /// Every directory of the skeleton, parents first.
    pub fn skeleton(&self) -> Vec<PathBuf> {
        vec![
            self.root.clone(),
            self.bin_dir(),
            self.runtime_dir(),
            self.lib_dir(),
            self.data_dir(),
            self.namespace_dir(),
            self.assets_dir(),
        ]
    }

    /// Destroys any existing tree at the root and creates the full skeleton.
    pub async fn recreate(&self) -> Result<()> {
        if self.root.exists() {
            log::info!("Cleaning previous build: {}", self.root.display());
        }
        remove_dir_all_forced(&self.root).await?;

        for dir in self.skeleton() {
            tokio::fs::create_dir_all(&dir)
                .await
                .fs_context("creating bundle directory", &dir)?;
        }
        Ok(())
    }

    /// Whether the skeleton exists on disk.
    pub fn is_assembled(&self) -> bool {
        self.skeleton().iter().all(|dir| dir.is_dir())
    }
}
