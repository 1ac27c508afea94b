//! Primary runtime discovery from the isolated environment's config file.

use super::{DiscoveryMethod, RuntimeReference};
use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Locates the primary runtime root named by `config_path`.
///
/// The file is a `key = value` list; its `home` entry is the runtime location.
/// When `home` is a `bin` directory (the POSIX interpreter layout) its parent is
/// returned so the whole installation is copied. The parent must look like a
/// standalone installation: it holds `lib/python*` and is not a shared system
/// prefix such as `/usr`.
///
/// # Errors
///
/// [`Error::PrimaryRuntime`] when the file is missing or unreadable, has no
/// `home` entry, `home` is not an existing directory, or `home` is the `bin`
/// directory of a system-wide prefix. There is no fallback.
pub fn locate_primary_runtime(config_path: &Path) -> Result<RuntimeReference> {
    let contents = std::fs::read_to_string(config_path).map_err(|e| Error::PrimaryRuntime {
        path: config_path.to_path_buf(),
        reason: format!(
            "cannot read runtime config ({e}); make sure the project has a managed virtual environment"
        ),
    })?;

    let home = parse_home(&contents).ok_or_else(|| Error::PrimaryRuntime {
        path: config_path.to_path_buf(),
        reason: "no `home` entry".into(),
    })?;

    if !home.is_dir() {
        return Err(Error::PrimaryRuntime {
            path: home,
            reason: "runtime home from config is not an existing directory".into(),
        });
    }

    let root = match (home.file_name(), home.parent()) {
        (Some(name), Some(parent)) if name == "bin" => {
            if SHARED_PREFIXES.iter().any(|p| parent == Path::new(p)) || !has_stdlib(parent) {
                return Err(Error::PrimaryRuntime {
                    path: home.clone(),
                    reason: format!(
                        "{} is not a standalone runtime installation; create the environment from a \
                         self-contained interpreter (e.g. `uv python install`) instead of a system one",
                        parent.display()
                    ),
                });
            }
            parent.to_path_buf()
        }
        _ => home,
    };

    log::info!("Found runtime home from {}: {}", config_path.display(), root.display());
    Ok(RuntimeReference::new(root, DiscoveryMethod::ConfigFile))
}

/// System-wide prefixes whose `bin` is shared with unrelated programs.
const SHARED_PREFIXES: &[&str] = &["/", "/usr", "/usr/local", "/opt/homebrew", "/opt/local"];

/// Whether `prefix/lib` holds a `python*` standard library directory.
fn has_stdlib(prefix: &Path) -> bool {
    std::fs::read_dir(prefix.join("lib"))
        .map(|entries| {
            entries.flatten().any(|e| {
                e.file_name().to_string_lossy().starts_with("python") && e.path().is_dir()
            })
        })
        .unwrap_or(false)
}

/// Extracts the `home` value from config file contents.
fn parse_home(contents: &str) -> Option<PathBuf> {
    contents.lines().find_map(|line| {
        let (key, value) = line.split_once('=')?;
        (key.trim() == "home")
            .then(|| value.trim())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}
