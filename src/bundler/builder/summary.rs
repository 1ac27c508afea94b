//! Result of a completed assembly.

use crate::bundler::{
    assets::CurationReport, runtime::AuxiliaryOutcome, runtime::RuntimeReference,
    source::SourceInjection,
};
use serde::Serialize;
use std::path::PathBuf;

/// Everything a finished assembly produced, including what it had to skip.
#[derive(Clone, Debug, Serialize)]
pub struct BundleSummary {
    /// Bundle root
    pub root: PathBuf,
    /// Primary runtime the bundle was built from
    pub primary_runtime: RuntimeReference,
    /// Whether and how the auxiliary runtime was bundled
    pub auxiliary_runtime: AuxiliaryOutcome,
    /// Exported lock file inside the bundle
    pub lock_file: PathBuf,
    /// First-party packages and generated modules
    pub source: SourceInjection,
    /// Optional asset curation results
    pub assets: CurationReport,
    /// Launcher scripts, console first
    pub launchers: Vec<PathBuf>,
    /// Generated README
    pub readme: PathBuf,
    /// Every recoverable problem, in the order it happened
    pub warnings: Vec<String>,
    /// SHA-256 of the bundle tree
    pub checksum: String,
}
