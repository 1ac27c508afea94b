//! Subcommand implementations.
//!
//! Each command turns the merged config into pipeline calls and reports
//! through the [`RuntimeConfig`](crate::cli::RuntimeConfig) output manager.

mod assets;
mod build;
mod fetch;
mod refresh;

pub use assets::list_assets;
pub use build::build_bundle;
pub use fetch::fetch_assets;
pub use refresh::refresh_source;
