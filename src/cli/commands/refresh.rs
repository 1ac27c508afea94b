//! `refresh-source`: overlay the latest project source onto an existing bundle.

use crate::{
    bundler::{Bundler, Settings},
    cli::RuntimeConfig,
    error::Result,
};

/// Re-copies first-party source without reinstalling dependencies.
pub async fn refresh_source(settings: Settings, runtime: &RuntimeConfig) -> Result<i32> {
    runtime.section(&format!("Refreshing {} source", settings.app().name))?;

    let bundler = Bundler::new(settings);
    let injection = bundler.refresh_source().await?;

    for package in &injection.packages {
        runtime.indent(package)?;
    }
    if injection.gui_module.is_none() {
        runtime.warn("launcher resource not found; only the console launcher will work")?;
    }
    runtime.success(&format!(
        "Source refreshed in {}",
        bundler.layout().lib_dir().display()
    ))?;
    Ok(0)
}
