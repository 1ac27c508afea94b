//! Optional asset catalog, curation and cache population.
//!
//! Assets are directories under a cache root, one per name. Curation copies
//! a selected subset into the bundle and reports what it could not find; it
//! never aborts assembly.

use crate::bundler::{
    error::{Error, Result},
    settings::AssetSettings,
    utils::{command::ToolCommand, fs},
};
use serde::Serialize;
use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Component, Path, PathBuf},
};

/// Asset names the cache population tool knows how to download.
pub const KNOWN_ASSETS: &[&str] = &[
    "java",
    "kotlin",
    "typescript",
    "csharp",
    "cpp",
    "clojure",
    "bash",
    "lua",
    "markdown",
    "terraform",
    "dart",
    "julia",
    "scala",
    "swift",
    "elm",
    "zig",
    "yaml",
    "php",
    "perl",
    "ruby",
];

/// Cache locations probed, relative to the home directory, in order.
const CACHE_CANDIDATES: &[&str] = &[".solidlsp/language_servers", ".serena/language_servers"];

/// First existing well-known cache root, or the first candidate if none exists.
pub fn detect_cache_root() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    CACHE_CANDIDATES
        .iter()
        .map(|c| home.join(c))
        .find(|p| p.is_dir())
        .unwrap_or_else(|| home.join(CACHE_CANDIDATES[0]))
}

/// Whether `name` can name an asset: exactly one plain path component, so it
/// stays a direct child of both the cache root and the bundle's asset area.
pub fn is_valid_asset_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == name
    )
}

/// Catalog entry for one asset name.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AssetEntry {
    /// Whether the cache holds a directory for it
    pub cached: bool,
    /// Where that directory is (or would be)
    pub source_path: PathBuf,
}

/// Asset names mapped to their cache state.
#[derive(Clone, Debug, Default, Serialize)]
pub struct AssetCatalog {
    entries: BTreeMap<String, AssetEntry>,
}

impl AssetCatalog {
    /// Lists cached asset directories under `cache_root`.
    ///
    /// A missing cache root yields an empty catalog.
    pub async fn scan(cache_root: &Path) -> Result<Self> {
        let mut entries = BTreeMap::new();
        if !cache_root.is_dir() {
            return Ok(Self { entries });
        }

        let mut dir = tokio::fs::read_dir(cache_root).await?;
        while let Some(entry) = dir.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                entries.insert(
                    entry.file_name().to_string_lossy().into_owned(),
                    AssetEntry {
                        cached: true,
                        source_path: entry.path(),
                    },
                );
            }
        }
        Ok(Self { entries })
    }

    /// Adds `names` that are not cached as uncached entries.
    pub fn with_known_names<'a, I>(mut self, cache_root: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.entries
                .entry(name.to_string())
                .or_insert_with(|| AssetEntry {
                    cached: false,
                    source_path: cache_root.join(name),
                });
        }
        self
    }

    /// Names with a cache directory.
    pub fn cached_names(&self) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|(_, e)| e.cached)
            .map(|(n, _)| n.clone())
            .collect()
    }

    /// All entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An asset that was cached but could not be copied.
#[derive(Clone, Debug, Serialize)]
pub struct FailedAsset {
    /// Asset name
    pub name: String,
    /// Copy error
    pub reason: String,
}

/// Per-asset result of curation.
#[derive(Clone, Debug, Default, Serialize)]
pub struct CurationReport {
    /// Copied into the bundle, in name order
    pub copied: Vec<String>,
    /// Selected but not cached, in name order
    pub not_found: Vec<String>,
    /// Rejected names and cached assets that failed to copy
    pub failed: Vec<FailedAsset>,
    /// The cache root itself did not exist
    pub cache_root_missing: bool,
}

impl CurationReport {
    /// Human-readable warnings for everything that did not make it in.
    pub fn warnings(&self, cache_root: &Path) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.cache_root_missing {
            warnings.push(format!(
                "asset cache {} does not exist; the bundle ships without optional assets",
                cache_root.display()
            ));
        }
        warnings.extend(
            self.not_found
                .iter()
                .map(|n| format!("asset `{n}` not found in cache (skipped)")),
        );
        warnings.extend(
            self.failed
                .iter()
                .map(|f| format!("asset `{}` failed to copy: {}", f.name, f.reason)),
        );
        warnings
    }
}

/// Copies the selected assets from `cache_root` into `destination/<name>`.
///
/// `selection` of `None` means every asset present in the cache. Names without
/// a cache directory are reported as not found; a missing cache root produces
/// an empty report flagged `cache_root_missing`. Never fails.
pub async fn curate(
    cache_root: &Path,
    selection: Option<&BTreeSet<String>>,
    destination: &Path,
) -> CurationReport {
    let mut report = CurationReport::default();

    if !cache_root.is_dir() {
        log::warn!(
            "{} does not exist. Optional assets will be missing!",
            cache_root.display()
        );
        report.cache_root_missing = true;
        return report;
    }

    let selection = match selection {
        Some(selection) => selection.clone(),
        None => match AssetCatalog::scan(cache_root).await {
            Ok(catalog) => catalog.cached_names(),
            Err(e) => {
                log::warn!("Cannot list asset cache {}: {}", cache_root.display(), e);
                BTreeSet::new()
            }
        },
    };

    log::info!("Copying {} selected assets...", selection.len());

    for name in selection {
        if !is_valid_asset_name(&name) {
            log::warn!("  - {:?} is not a valid asset name (skipped)", name);
            report.failed.push(FailedAsset {
                name,
                reason: "not a valid asset name".into(),
            });
            continue;
        }

        let src = cache_root.join(&name);
        if !src.is_dir() {
            log::warn!("  - {} NOT FOUND in cache (skipped)", name);
            report.not_found.push(name);
            continue;
        }

        log::info!("  - {}", name);
        match fs::copy_dir(&src, &destination.join(&name)).await {
            Ok(()) => report.copied.push(name),
            Err(e) => {
                log::warn!("  - {} failed to copy: {}", name, e);
                report.failed.push(FailedAsset {
                    name,
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}

/// Runs the external cache population tool for `names` in `project_root`.
///
/// Output lines are forwarded to `on_line` as they arrive.
///
/// # Errors
///
/// An empty selection, a missing population script, or the tool failing.
pub async fn populate_cache<F>(
    settings: &AssetSettings,
    project_root: &Path,
    names: &BTreeSet<String>,
    on_line: F,
) -> Result<()>
where
    F: FnMut(&str),
{
    if names.is_empty() {
        return Err(Error::InvalidSettings(
            "no assets selected to download".into(),
        ));
    }
    if let Some(bad) = names.iter().find(|n| !is_valid_asset_name(n)) {
        return Err(Error::InvalidSettings(format!(
            "{bad:?} is not a valid asset name"
        )));
    }

    let script = project_root.join(&settings.fetch_script);
    if !script.is_file() {
        return Err(Error::GenericError(format!(
            "Download script not found: {}",
            script.display()
        )));
    }

    let (program, runner_args) = settings.fetch_runner.split_first().ok_or_else(|| {
        Error::InvalidSettings("assets.fetch_runner must name a program".into())
    })?;

    let languages = names.iter().cloned().collect::<Vec<_>>().join(",");
    ToolCommand::new(program)
        .args(runner_args)
        .arg(&script)
        .arg("--languages")
        .arg(languages)
        .current_dir(project_root)
        .stream(on_line)
        .await?;

    log::info!("Download Complete");
    Ok(())
}
