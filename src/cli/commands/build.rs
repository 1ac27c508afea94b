//! `build`: full assembly.

use crate::{
    bundler::{AssemblyEvent, AuxiliaryOutcome, BundleSummary, Settings, spawn_assembly},
    cli::RuntimeConfig,
    error::Result,
};

/// Assembles the bundle on a background task, reporting progress as it runs.
pub async fn build_bundle(settings: Settings, json: bool, runtime: &RuntimeConfig) -> Result<i32> {
    runtime.section(&format!(
        "Building {} standalone bundle",
        settings.app().name
    ))?;
    runtime.verbose(&format!("Project: {}", settings.project_root().display()))?;
    runtime.verbose(&format!("Output:  {}", settings.output_dir().display()))?;

    let mut handle = spawn_assembly(settings);
    while let Some(event) = handle.next_event().await {
        match event {
            AssemblyEvent::Step(step) => runtime.progress(&format!(
                "[{}/{}] {}",
                step.number(),
                crate::bundler::Step::ALL.len(),
                step
            ))?,
            AssemblyEvent::Warning(message) => runtime.warn(&message)?,
        }
    }
    let summary = handle.wait().await?;

    if json {
        runtime
            .output()
            .data(&serde_json::to_string_pretty(&summary)?)?;
    } else {
        report(&summary, runtime)?;
    }
    Ok(0)
}

fn report(summary: &BundleSummary, runtime: &RuntimeConfig) -> Result<()> {
    runtime.success(&format!("Build complete: {}", summary.root.display()))?;

    match &summary.auxiliary_runtime {
        AuxiliaryOutcome::Installed { source, .. } => runtime.indent(&format!(
            "auxiliary runtime: {} ({:?})",
            source.path().display(),
            source.method()
        ))?,
        AuxiliaryOutcome::Unavailable { .. } => runtime.indent("auxiliary runtime: not bundled")?,
    }
    runtime.indent(&format!("packages: {}", summary.source.packages.join(", ")))?;
    runtime.indent(&format!(
        "assets: {} copied, {} not found",
        summary.assets.copied.len(),
        summary.assets.not_found.len()
    ))?;
    for launcher in &summary.launchers {
        runtime.indent(&format!("launcher: {}", launcher.display()))?;
    }
    runtime.verbose(&format!("sha256: {}", summary.checksum))?;

    if !summary.warnings.is_empty() {
        runtime.warn(&format!(
            "{} warning(s); the bundle is usable with reduced features",
            summary.warnings.len()
        ))?;
    }
    Ok(())
}
