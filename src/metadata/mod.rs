//! Project metadata from `pyproject.toml`.

use crate::error::{BundlerError, CliError, Result};
use std::path::Path;

/// Manifest file read from the project root.
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Package metadata extracted from the `[project]` table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectMetadata {
    /// Distribution name (e.g. "serena-agent")
    pub name: String,

    /// Version string, if declared statically
    pub version: Option<String>,

    /// One-line description
    pub description: Option<String>,
}

/// Loads project metadata from `<project_root>/pyproject.toml`.
///
/// Returns `Ok(None)` when the project has no manifest or no `[project]` table.
///
/// # Errors
///
/// The manifest exists but cannot be read or parsed, or `[project]` has no name.
pub fn load_project_metadata(project_root: &Path) -> Result<Option<ProjectMetadata>> {
    let manifest_path = project_root.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Ok(None);
    }

    let manifest = std::fs::read_to_string(&manifest_path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_pyproject".to_string(),
            reason: format!("Failed to read {}: {}", manifest_path.display(), e),
        })
    })?;

    parse_project_metadata(&manifest)
}

/// Parses manifest contents. See [`load_project_metadata`].
pub fn parse_project_metadata(manifest: &str) -> Result<Option<ProjectMetadata>> {
    let toml_value: toml::Value = toml::from_str(manifest)?;

    let Some(project) = toml_value.get("project") else {
        return Ok(None);
    };

    let field = |key: &str| project.get(key).and_then(|v| v.as_str()).map(str::to_string);

    let name = field("name").ok_or_else(|| {
        BundlerError::Cli(CliError::InvalidArguments {
            reason: format!("No name in [project] section of {MANIFEST_FILE}"),
        })
    })?;

    Ok(Some(ProjectMetadata {
        name,
        version: field("version"),
        description: field("description"),
    }))
}
