//! Runtime discovery and acquisition.
//!
//! - [`primary`] reads the isolated environment's config artifact; failure is fatal
//! - [`auxiliary`] searches, then downloads; failure degrades the bundle

pub mod auxiliary;
pub mod primary;

use serde::Serialize;
use std::path::{Path, PathBuf};

pub use auxiliary::{
    AuxiliaryOutcome, AuxiliaryStrategy, acquire_auxiliary_runtime, locate_auxiliary_runtime,
    resolve_auxiliary_runtime,
};
pub use primary::locate_primary_runtime;

/// How a runtime location was discovered.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoveryMethod {
    /// Read from the isolated environment's config artifact
    ConfigFile,
    /// Found on the executable search path
    SearchPath,
    /// Fetched from a versioned archive
    Download,
}

/// A resolved runtime root or executable. Immutable once created.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RuntimeReference {
    path: PathBuf,
    method: DiscoveryMethod,
}

impl RuntimeReference {
    /// Records a discovered location.
    pub fn new(path: impl Into<PathBuf>, method: DiscoveryMethod) -> Self {
        Self {
            path: path.into(),
            method,
        }
    }

    /// Absolute location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How it was found.
    pub fn method(&self) -> DiscoveryMethod {
        self.method
    }
}
