//! Main assembly orchestration.
//!
//! This module provides the [`Bundler`] that sequences every pipeline step
//! into one output tree.

use super::{AssemblyEvent, BundleSummary, Step, checksum::calculate_tree_sha256};
use crate::{
    bail,
    bundler::{
        BundleLayout, Result, Settings, assets, deps,
        launcher::{self, ReadmeContext},
        runtime::{self, AuxiliaryOutcome},
        source::{self, SourceInjection},
        utils::fs,
    },
};
use tokio::sync::mpsc::UnboundedSender;

/// Assembles a relocatable bundle from validated [`Settings`].
///
/// Steps run strictly in sequence, each relying on the directories and files
/// the previous one left behind:
///
/// 1. Resolve the primary runtime (fatal if missing, before anything is touched)
/// 2. Destroy and recreate the output tree
/// 3. Copy the primary runtime
/// 4. Bundle the auxiliary runtime (degrades on failure)
/// 5. Export and install pinned dependencies (fatal on failure)
/// 6. Copy first-party source and write the entry point
/// 7. Copy optional assets (degrades per asset)
/// 8. Write launchers and README
/// 9. Hash the finished tree
///
/// A failing step aborts the run and leaves the partial tree for inspection.
/// The next run clears it.
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_portable::bundler::{Bundler, Settings};
///
/// # async fn example(settings: Settings) -> kodegen_bundler_portable::bundler::Result<()> {
/// let summary = Bundler::new(settings).assemble().await?;
/// println!("Built {} ({})", summary.root.display(), summary.checksum);
/// for warning in &summary.warnings {
///     println!("warning: {warning}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
    layout: BundleLayout,
    events: Option<UnboundedSender<AssemblyEvent>>,
}

impl Bundler {
    /// Creates a bundler for the given settings. Nothing is touched on disk.
    pub fn new(settings: Settings) -> Self {
        let layout = BundleLayout::new(
            settings.output_dir(),
            &settings.assets().namespace,
            &settings.assets().category,
        );
        Self {
            settings,
            layout,
            events: None,
        }
    }

    /// Reports step starts and warnings to `events` as they happen.
    pub fn with_events(mut self, events: UnboundedSender<AssemblyEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Settings this bundler was built with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Layout of the bundle this bundler writes.
    pub fn layout(&self) -> &BundleLayout {
        &self.layout
    }

    fn step(&self, step: Step) {
        log::info!("[{}/{}] {}...", step.number(), Step::ALL.len(), step);
        self.emit(AssemblyEvent::Step(step));
    }

    fn warn(&self, warnings: &mut Vec<String>, message: String) {
        self.emit(AssemblyEvent::Warning(message.clone()));
        warnings.push(message);
    }

    fn emit(&self, event: AssemblyEvent) {
        if let Some(tx) = &self.events {
            // A receiver that went away only stops progress reporting.
            let _ = tx.send(event);
        }
    }

    /// Runs the full pipeline and returns what it produced.
    ///
    /// # Errors
    ///
    /// The originating error of the first fatal step. A missing primary
    /// runtime fails before the output tree is created or removed.
    pub async fn assemble(&self) -> Result<BundleSummary> {
        let settings = &self.settings;
        let layout = &self.layout;
        let mut warnings = Vec::new();

        log::info!(
            "Building {} from {}",
            settings.app().name,
            settings.project_root().display()
        );

        self.step(Step::ResolveRuntime);
        let primary_runtime = runtime::locate_primary_runtime(&settings.runtime_config_path())?;

        self.step(Step::PrepareLayout);
        layout.recreate().await?;

        self.step(Step::CopyRuntime);
        fs::copy_dir(primary_runtime.path(), &layout.runtime_dir()).await?;

        self.step(Step::AuxiliaryRuntime);
        let auxiliary_runtime =
            runtime::resolve_auxiliary_runtime(settings.auxiliary(), layout).await;
        if let AuxiliaryOutcome::Unavailable { reasons } = &auxiliary_runtime {
            self.warn(
                &mut warnings,
                format!(
                    "{} is not bundled; assets that need it will not work ({})",
                    settings.auxiliary().executable,
                    reasons.join("; ")
                ),
            );
        }

        self.step(Step::Dependencies);
        let lock_file = layout.root().join(&settings.dependencies().lock_file);
        deps::materialize(
            settings.dependencies(),
            settings.project_root(),
            &lock_file,
            &layout.lib_dir(),
        )
        .await?;

        self.step(Step::Source);
        let source = self.inject_source().await?;
        if source.gui_module.is_none() {
            self.warn(
                &mut warnings,
                format!(
                    "launcher resource {} not found; only the console launcher will work",
                    settings.launcher().resource().display()
                ),
            );
        }

        self.step(Step::Assets);
        let cache_root = settings.assets().cache_root();
        let curation = assets::curate(
            &cache_root,
            settings.assets().selection.as_ref(),
            &layout.assets_dir(),
        )
        .await;
        for warning in curation.warnings(&cache_root) {
            self.warn(&mut warnings, warning);
        }

        self.step(Step::Launchers);
        let launchers = launcher::emit(layout, settings.app(), settings.launcher()).await?;
        let readme = launcher::write_readme(
            layout,
            &ReadmeContext::new(
                layout,
                settings.app(),
                settings.launcher().flavor(),
                &settings.auxiliary().executable,
                &auxiliary_runtime,
                &curation.copied,
                &settings.dependencies().lock_file,
            ),
        )
        .await?;

        self.step(Step::Checksum);
        let checksum = calculate_tree_sha256(layout.root()).await?;

        log::info!("Build Complete: {}", layout.root().display());

        Ok(BundleSummary {
            root: layout.root().to_path_buf(),
            primary_runtime,
            auxiliary_runtime,
            lock_file,
            source,
            assets: curation,
            launchers,
            readme,
            warnings,
            checksum,
        })
    }

    /// Re-copies first-party source into an existing bundle.
    ///
    /// Dependencies, runtimes and assets are left as they are.
    ///
    /// # Errors
    ///
    /// Fails when the bundle has not been assembled yet, or when injection fails.
    pub async fn refresh_source(&self) -> Result<SourceInjection> {
        if !self.layout.lib_dir().is_dir() {
            bail!(
                "No bundle at {}; run a full build first",
                self.layout.root().display()
            );
        }
        self.step(Step::Source);
        self.inject_source().await
    }

    async fn inject_source(&self) -> Result<SourceInjection> {
        source::inject_source(
            self.settings.app(),
            &self.settings.source_root(),
            &self.layout.lib_dir(),
            &self.settings.launcher().resource(),
        )
        .await
    }
}
