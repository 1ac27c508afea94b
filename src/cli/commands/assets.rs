//! `assets`: show which optional assets are known and which are cached.

use crate::{
    bundler::{AssetCatalog, AssetSettings, KNOWN_ASSETS},
    cli::RuntimeConfig,
    error::Result,
};
use console::Style;

/// Prints the asset catalog for the configured cache root.
pub async fn list_assets(settings: &AssetSettings, json: bool, runtime: &RuntimeConfig) -> Result<i32> {
    let cache_root = settings.cache_root();
    let catalog = AssetCatalog::scan(&cache_root)
        .await?
        .with_known_names(&cache_root, KNOWN_ASSETS.iter().copied());

    if json {
        runtime.output().data(&serde_json::to_string_pretty(&catalog)?)?;
        return Ok(0);
    }

    runtime.section(&format!("Assets in {}", cache_root.display()))?;
    if !cache_root.is_dir() {
        runtime.warn("cache root does not exist; nothing is cached yet")?;
    }
    for (name, entry) in catalog.iter() {
        let line = if entry.cached {
            format!("{} {}", Style::new().green().apply_to("cached "), name)
        } else {
            format!("{} {}", Style::new().dim().apply_to("missing"), name)
        };
        runtime.output().data(&line)?;
    }
    Ok(0)
}
