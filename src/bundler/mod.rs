//! Distribution assembly pipeline.
//!
//! Builds a self-contained, relocatable application bundle from a project
//! checkout: a copied interpreter, pinned dependencies, first-party source,
//! optional assets and launcher scripts that locate everything relative to
//! themselves.
//!
//! ```no_run
//! use kodegen_bundler_portable::bundler::{AppSettings, Bundler, SettingsBuilder};
//!
//! # async fn example() -> kodegen_bundler_portable::bundler::Result<()> {
//! let settings = SettingsBuilder::new()
//!     .project_root("/src/serena")
//!     .output_dir("/src/serena/dist/serena-standalone")
//!     .app(AppSettings {
//!         name: "serena".into(),
//!         ..Default::default()
//!     })
//!     .build()?;
//!
//! let summary = Bundler::new(settings).assemble().await?;
//! println!("{}", summary.root.display());
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod builder;
pub mod deps;
pub mod error;
pub mod launcher;
pub mod layout;
pub mod runtime;
pub mod settings;
pub mod source;
pub mod utils;

pub use assets::{AssetCatalog, AssetEntry, CurationReport, KNOWN_ASSETS};
pub use builder::{AssemblyEvent, AssemblyHandle, BundleSummary, Bundler, Step, spawn_assembly};
pub use error::{Error, Result};
pub use layout::BundleLayout;
pub use runtime::{AuxiliaryOutcome, DiscoveryMethod, RuntimeReference};
pub use settings::{
    AppSettings, AssetSettings, AuxiliarySettings, DependencySettings, LauncherFlavor,
    LauncherSettings, Platform, RuntimeSettings, Settings, SettingsBuilder,
};
pub use source::SourceInjection;
