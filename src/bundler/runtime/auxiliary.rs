//! Auxiliary runtime resolution chain.
//!
//! Strategies are tried in order and the first success wins. Exhausting the
//! chain is not an error: the bundle is produced without the auxiliary runtime
//! and the outcome says why.
//!
//! A downloaded runtime contributes only its executable. Package-manager
//! tooling that ships alongside it in the archive is not bundled.

use super::{DiscoveryMethod, RuntimeReference};
use crate::bundler::{
    BundleLayout,
    error::{Context, Error, Result},
    settings::{AuxiliarySettings, Platform},
    utils::{archive, fs, http},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One way of obtaining the auxiliary runtime.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuxiliaryStrategy {
    /// Executable lookup on the search path
    SearchPath,
    /// Versioned archive download
    Download,
}

impl AuxiliaryStrategy {
    /// Ordered chain for the given settings.
    pub fn chain(settings: &AuxiliarySettings) -> Vec<Self> {
        if !settings.enabled {
            return Vec::new();
        }
        let mut chain = vec![AuxiliaryStrategy::SearchPath];
        if settings.download {
            chain.push(AuxiliaryStrategy::Download);
        }
        chain
    }
}

/// Result of running the resolution chain.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum AuxiliaryOutcome {
    /// The executable was placed in `bin/`.
    Installed {
        /// Where it came from
        source: RuntimeReference,
        /// Where it now lives inside the bundle
        destination: PathBuf,
    },
    /// Every strategy failed or the runtime is disabled.
    Unavailable {
        /// One entry per failed strategy
        reasons: Vec<String>,
    },
}

impl AuxiliaryOutcome {
    /// Whether the runtime made it into the bundle.
    pub fn is_installed(&self) -> bool {
        matches!(self, AuxiliaryOutcome::Installed { .. })
    }
}

/// Looks up the auxiliary executable on the search path.
///
/// Uses `settings.search_path` in place of `PATH` when set. Returns `None`
/// when nothing is found; the caller decides whether to download.
pub fn locate_auxiliary_runtime(settings: &AuxiliarySettings) -> Option<RuntimeReference> {
    let found = match &settings.search_path {
        Some(paths) => {
            let cwd = std::env::current_dir().ok()?;
            which::which_in(&settings.executable, Some(paths), cwd)
        }
        None => which::which(&settings.executable),
    };

    match found {
        Ok(path) => {
            log::info!("Found {} at: {}", settings.executable, path.display());
            Some(RuntimeReference::new(path, DiscoveryMethod::SearchPath))
        }
        Err(e) => {
            log::debug!("{} not found on search path: {}", settings.executable, e);
            None
        }
    }
}

/// Download URL of the versioned archive for `platform`.
pub fn archive_url(settings: &AuxiliarySettings, platform: Platform) -> Result<url::Url> {
    let base = format!("{}/", settings.base_url.trim_end_matches('/'));
    let name = format!(
        "{}/{}.{}",
        settings.version,
        archive_stem(settings, platform),
        platform.archive_kind().extension()
    );
    Ok(url::Url::parse(&base)?.join(&name)?)
}

fn archive_stem(settings: &AuxiliarySettings, platform: Platform) -> String {
    format!("{}-{}-{}", settings.executable, settings.version, platform)
}

/// Path of the executable inside an unpacked archive, relative to the scratch dir.
fn executable_in_archive(settings: &AuxiliarySettings, platform: Platform) -> PathBuf {
    let top = PathBuf::from(archive_stem(settings, platform));
    let exe = platform.executable_name(&settings.executable);
    if platform.is_windows() {
        top.join(exe)
    } else {
        top.join("bin").join(exe)
    }
}

/// Downloads the runtime archive, unpacks it into `scratch`, copies only the
/// executable into `destination_dir`, and removes `scratch`.
///
/// # Errors
///
/// Download, extraction or copy failures. Callers treat these as recoverable.
pub async fn acquire_auxiliary_runtime(
    settings: &AuxiliarySettings,
    platform: Platform,
    destination_dir: &Path,
    scratch: &Path,
) -> Result<RuntimeReference> {
    let url = archive_url(settings, platform)?;
    log::info!(
        "Downloading {} {} for {} from {}...",
        settings.executable,
        settings.version,
        platform,
        url
    );

    let data = http::download(url.as_str()).await?;

    let result = async {
        archive::extract(data, platform.archive_kind(), scratch).await?;

        let unpacked = scratch.join(executable_in_archive(settings, platform));
        let destination = destination_dir.join(platform.executable_name(&settings.executable));
        fs::copy_file(&unpacked, &destination)
            .await
            .with_context(|| format!("archive from {url} has no {}", unpacked.display()))?;
        fs::make_executable(&destination).await?;
        Ok::<_, Error>(destination)
    }
    .await;

    fs::remove_dir_all_forced(scratch).await?;

    let destination = result?;
    log::info!("{} downloaded and extracted.", settings.executable);
    Ok(RuntimeReference::new(destination, DiscoveryMethod::Download))
}

/// Runs the resolution chain and places the executable in the bundle's `bin/`.
///
/// Never fails: every problem becomes a reason in
/// [`AuxiliaryOutcome::Unavailable`] and a warning in the log.
pub async fn resolve_auxiliary_runtime(
    settings: &AuxiliarySettings,
    layout: &BundleLayout,
) -> AuxiliaryOutcome {
    let platform = settings.platform();
    let mut reasons = Vec::new();

    for strategy in AuxiliaryStrategy::chain(settings) {
        let attempt = match strategy {
            AuxiliaryStrategy::SearchPath => match locate_auxiliary_runtime(settings) {
                Some(source) => {
                    let destination = layout
                        .bin_dir()
                        .join(platform.executable_name(&settings.executable));
                    log::info!("Copying {}...", settings.executable);
                    fs::copy_file(source.path(), &destination)
                        .await
                        .map(|()| (source, destination))
                }
                None => Err(Error::GenericError(format!(
                    "{} not found on the search path",
                    settings.executable
                ))),
            },
            AuxiliaryStrategy::Download => acquire_auxiliary_runtime(
                settings,
                platform,
                &layout.bin_dir(),
                &layout.scratch_dir(),
            )
            .await
            .map(|source| {
                let destination = source.path().to_path_buf();
                (source, destination)
            }),
        };

        match attempt {
            Ok((source, destination)) => {
                return AuxiliaryOutcome::Installed {
                    source,
                    destination,
                };
            }
            Err(e) => {
                log::info!("{:?} strategy for {} failed: {}", strategy, settings.executable, e);
                reasons.push(format!("{strategy:?}: {e}"));
            }
        }
    }

    if !settings.enabled {
        reasons.push("auxiliary runtime disabled in settings".into());
    }

    log::warn!(
        "{} is unavailable; assets requiring it will not work. ({})",
        settings.executable,
        reasons.join("; ")
    );
    AuxiliaryOutcome::Unavailable { reasons }
}
