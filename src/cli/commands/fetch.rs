//! `fetch-assets`: run the external cache population tool.

use crate::{
    bundler::{AssetSettings, KNOWN_ASSETS, assets::populate_cache},
    cli::RuntimeConfig,
    error::Result,
};
use std::{collections::BTreeSet, path::Path};

/// Downloads `names` into the asset cache, streaming the tool's output.
pub async fn fetch_assets(
    settings: &AssetSettings,
    project_root: &Path,
    names: &[String],
    runtime: &RuntimeConfig,
) -> Result<i32> {
    let names: BTreeSet<String> = names.iter().map(|n| n.trim().to_string()).collect();
    for unknown in names.iter().filter(|n| !KNOWN_ASSETS.contains(&n.as_str())) {
        runtime.warn(&format!("`{unknown}` is not a known asset; passing it through"))?;
    }

    runtime.section(&format!(
        "Downloading assets: {}",
        names.iter().cloned().collect::<Vec<_>>().join(", ")
    ))?;

    let output = runtime.output().clone();
    populate_cache(settings, project_root, &names, |line| {
        // Progress output is best effort.
        let _ = output.indent(line);
    })
    .await?;

    runtime.success("Download complete")?;
    Ok(0)
}
